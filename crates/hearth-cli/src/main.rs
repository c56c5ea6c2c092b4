//! Hearth CLI - Household naming and relationship tooling for a Bloomerang directory.

use clap::Parser;
use hearth_bloomerang::BloomerangClient;
use hearth_cli::commands;
use hearth_cli::{Cli, CliError, Command, Config, Formatter};
use hearth_registrar::{Registrar, RegistrarConfig};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> hearth_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load or create config
    let mut config = Config::load().unwrap_or_else(|_| {
        let cfg = Config::default();
        cfg.save().ok();
        cfg
    });

    // Override profile if specified
    if let Some(profile_name) = &cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Handle commands
    match cli.command {
        Command::Preview(args) => {
            commands::execute_preview(args, &config, &formatter).await?;
        }
        Command::Profile(args) => {
            commands::execute_profile(args, &mut config, &formatter).await?;
        }
        cmd => {
            // Commands that talk to the directory
            let profile = config.get_active_profile()?;
            let api_key = cli
                .api_key
                .clone()
                .or_else(|| profile.api_key.clone())
                .ok_or(CliError::MissingApiKey)?;
            let client = BloomerangClient::new(api_key).with_base_url(&profile.api_url);

            let registrar_config = RegistrarConfig {
                naming: profile.naming_config()?,
                ..RegistrarConfig::default()
            };
            let mut registrar = Registrar::new(client, registrar_config);

            match cmd {
                Command::Create(args) => {
                    commands::execute_create(args, &mut registrar, &formatter).await?;
                }
                Command::AddChild(args) => {
                    commands::execute_add_child(args, &mut registrar, &formatter).await?;
                }
                Command::AddSpouse(args) => {
                    commands::execute_add_spouse(args, &mut registrar, &formatter).await?;
                }
                Command::Lookup(args) => {
                    commands::execute_lookup(args, registrar.client(), &formatter).await?;
                }
                _ => unreachable!(),
            }
        }
    }

    Ok(())
}

/// Route logs to stderr so command output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
