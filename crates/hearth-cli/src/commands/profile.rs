//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs, SpouseTitleArg};
use crate::config::{Config, Profile};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the profile command.
pub async fn execute_profile(
    args: ProfileArgs,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set {
            name,
            api_url,
            api_key,
            spouse_title,
        } => set_profile(config, name, api_url, api_key, spouse_title, formatter),
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        let marker = if name == &config.active_profile {
            "* "
        } else {
            "  "
        };
        println!(
            "{}{}",
            marker,
            if name == &config.active_profile {
                formatter.success(name)
            } else {
                name.clone()
            }
        );
        println!("    URL: {}", profile.api_url);
        println!("    API key: {}", key_display(profile));
        println!("    Second-spouse title: {}", profile.second_spouse_title);
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    println!("  URL: {}", profile.api_url);
    println!("  API key: {}", key_display(profile));
    println!("  Second-spouse title: {}", profile.second_spouse_title);

    Ok(())
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(&name)?;
    config.save()?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Create or update a profile.
fn set_profile(
    config: &mut Config,
    name: String,
    api_url: Option<String>,
    api_key: Option<String>,
    spouse_title: Option<SpouseTitleArg>,
    formatter: &Formatter,
) -> Result<()> {
    let mut profile = config.profiles.get(&name).cloned().unwrap_or_default();
    if let Some(url) = api_url {
        profile.api_url = url.trim_end_matches('/').to_string();
    }
    if let Some(key) = api_key {
        profile.api_key = Some(key);
    }
    if let Some(title) = spouse_title {
        profile.second_spouse_title = title.config_value().to_string();
    }

    let action = if config.profiles.contains_key(&name) {
        "Updated"
    } else {
        "Created"
    };

    config.set_profile(name.clone(), profile);
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, name))
    );

    Ok(())
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if name == config.active_profile {
        return Err(crate::error::CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
    }

    Ok(())
}

// The key itself is never echoed back.
fn key_display(profile: &Profile) -> &'static str {
    if profile.api_key.is_some() {
        "configured"
    } else {
        "not set"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_delete_active_profile() {
        let mut config = Config::default();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = delete_profile(&mut config, "default".to_string(), &formatter);
        assert!(result.is_err());
        assert!(config.profiles.contains_key("default"));
    }

    #[test]
    fn test_delete_missing_profile_is_not_an_error() {
        let mut config = Config::default();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let result = delete_profile(&mut config, "ghost".to_string(), &formatter);
        assert!(result.is_ok());
    }

    #[test]
    fn test_key_display_hides_the_key() {
        let mut profile = Profile::default();
        assert_eq!(key_display(&profile), "not set");

        profile.api_key = Some("secret-key".to_string());
        assert_eq!(key_display(&profile), "configured");
    }
}
