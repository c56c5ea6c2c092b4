//! CLI command definitions and argument parsing.

use crate::error::{CliError, Result};
use clap::{Parser, Subcommand};
use hearth_registrar::PersonSpec;

/// Hearth CLI - Household naming and relationship inference for a donor directory.
#[derive(Debug, Parser)]
#[command(name = "hearth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Bloomerang API key (overrides the profile's key)
    #[arg(long, global = true, env = "BLOOMERANG_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (FullName / ids only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Preview household names and relationships without touching the directory
    Preview(PreviewArgs),

    /// Create a household and record its relationships
    Create(CreateArgs),

    /// Attach an existing constituent to a household as a child
    AddChild(AddChildArgs),

    /// Attach a spouse to an existing member's household and rename it
    AddSpouse(AddSpouseArgs),

    /// Search constituents and show their household membership
    Lookup(LookupArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Arguments for the preview command.
#[derive(Debug, Parser)]
pub struct PreviewArgs {
    /// First adult as "First,Last[,role]"
    pub adult1: String,

    /// Second adult as "First,Last[,role]"
    pub adult2: Option<String>,

    /// Child as "First,Last,role" (repeatable)
    #[arg(short, long = "child")]
    pub children: Vec<String>,

    /// Title for a different-surname second spouse
    #[arg(long, value_enum)]
    pub spouse_title: Option<SpouseTitleArg>,
}

/// Arguments for the create command.
#[derive(Debug, Parser)]
pub struct CreateArgs {
    /// First adult as "First,Last[,role[,account#]]"
    pub adult1: String,

    /// Second adult as "First,Last[,role[,account#]]"
    pub adult2: Option<String>,

    /// Child as "First,Last,role[,account#]" (repeatable)
    #[arg(short, long = "child")]
    pub children: Vec<String>,

    /// Resolve and plan, but write nothing
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the add-child command.
#[derive(Debug, Parser)]
pub struct AddChildArgs {
    /// Household id to attach to
    #[arg(long)]
    pub household: Option<i64>,

    /// Locate the household via an existing member ("First,Last")
    #[arg(long)]
    pub of: Option<String>,

    /// Child as "First,Last,role[,account#]"
    #[arg(long)]
    pub child: String,

    /// Role of an existing member toward the child, as "<account_id>=<role>" (repeatable)
    #[arg(long = "member-role")]
    pub member_roles: Vec<String>,
}

/// Arguments for the add-spouse command.
#[derive(Debug, Parser)]
pub struct AddSpouseArgs {
    /// Existing household member as "First,Last"
    #[arg(long)]
    pub to: Option<String>,

    /// Existing household member's account number
    #[arg(long)]
    pub to_account: Option<String>,

    /// New spouse as "First,Last"
    #[arg(long)]
    pub spouse: Option<String>,

    /// New spouse's account number
    #[arg(long)]
    pub spouse_account: Option<String>,

    /// Role of the new spouse
    #[arg(long, value_enum)]
    pub role: SpouseRoleArg,
}

/// Arguments for the lookup command.
#[derive(Debug, Parser)]
pub struct LookupArgs {
    /// Name as "First,Last"
    pub name: Option<String>,

    /// Account number
    #[arg(short, long)]
    pub account: Option<String>,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// API endpoint URL
        #[arg(long)]
        api_url: Option<String>,
        /// API key
        #[arg(long)]
        api_key: Option<String>,
        /// Title for a different-surname second spouse
        #[arg(long, value_enum)]
        spouse_title: Option<SpouseTitleArg>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Second-spouse title argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SpouseTitleArg {
    /// "Mrs." for a different-surname second spouse
    Mrs,
    /// "Ms." for a different-surname second spouse
    Ms,
}

impl SpouseTitleArg {
    /// The value stored in profile configuration
    pub fn config_value(self) -> &'static str {
        match self {
            SpouseTitleArg::Mrs => "mrs",
            SpouseTitleArg::Ms => "ms",
        }
    }
}

impl From<SpouseTitleArg> for hearth_engine::SpouseTitle {
    fn from(title: SpouseTitleArg) -> Self {
        match title {
            SpouseTitleArg::Mrs => hearth_engine::SpouseTitle::Mrs,
            SpouseTitleArg::Ms => hearth_engine::SpouseTitle::Ms,
        }
    }
}

/// Spouse role argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SpouseRoleArg {
    /// The new spouse is the husband
    Husband,
    /// The new spouse is the wife
    Wife,
}

impl SpouseRoleArg {
    /// The role label submitted to the directory
    pub fn as_str(self) -> &'static str {
        match self {
            SpouseRoleArg::Husband => "husband",
            SpouseRoleArg::Wife => "wife",
        }
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

/// Parse a person argument of the form "First,Last[,role[,account#]]".
pub fn parse_person_arg(input: &str, require_role: bool) -> Result<PersonSpec> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() < 2 || parts.len() > 4 {
        return Err(CliError::InvalidInput(format!(
            "Invalid person '{}'. Expected 'First,Last[,role[,account#]]'",
            input
        )));
    }
    if parts[0].is_empty() || parts[1].is_empty() {
        return Err(CliError::InvalidInput(format!(
            "Invalid person '{}': first and last name must be non-blank",
            input
        )));
    }

    let role = parts.get(2).copied().unwrap_or("");
    if require_role && role.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "Invalid person '{}': a role is required (e.g. 'Amy,Smith,daughter')",
            input
        )));
    }

    let mut spec = PersonSpec::new(parts[0], parts[1], role);
    if let Some(account) = parts.get(3).copied().filter(|a| !a.is_empty()) {
        spec = spec.with_account_number(account);
    }
    Ok(spec)
}

/// Parse a member-role argument of the form "<account_id>=<role>".
pub fn parse_member_role(input: &str) -> Result<(i64, String)> {
    let (id, role) = input.split_once('=').ok_or_else(|| {
        CliError::InvalidInput(format!(
            "Invalid member role '{}'. Expected '<account_id>=<role>'",
            input
        ))
    })?;

    let id: i64 = id.trim().parse().map_err(|_| {
        CliError::InvalidInput(format!("Invalid account id in member role '{}'", input))
    })?;

    let role = role.trim();
    if role.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "Invalid member role '{}': the role is blank",
            input
        )));
    }
    Ok((id, role.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_person_full_tuple() {
        let spec = parse_person_arg("John , Smith , husband , #123", false).unwrap();
        assert_eq!(spec.first_name, "John");
        assert_eq!(spec.last_name, "Smith");
        assert_eq!(spec.role, "husband");
        assert_eq!(spec.account_number.as_deref(), Some("#123"));
    }

    #[test]
    fn test_parse_person_name_only() {
        let spec = parse_person_arg("Jane,Doe", false).unwrap();
        assert_eq!(spec.role, "");
        assert!(spec.account_number.is_none());
    }

    #[test]
    fn test_parse_person_requires_role_for_children() {
        assert!(parse_person_arg("Amy,Smith", true).is_err());
        assert!(parse_person_arg("Amy,Smith,daughter", true).is_ok());
    }

    #[test]
    fn test_parse_person_rejects_blank_names() {
        assert!(parse_person_arg("John", false).is_err());
        assert!(parse_person_arg(",Smith,husband", false).is_err());
        assert!(parse_person_arg("John,,husband", false).is_err());
    }

    #[test]
    fn test_parse_member_role() {
        let (id, role) = parse_member_role("123=mother").unwrap();
        assert_eq!(id, 123);
        assert_eq!(role, "mother");

        assert!(parse_member_role("no-equals").is_err());
        assert!(parse_member_role("abc=mother").is_err());
        assert!(parse_member_role("123=").is_err());
    }

    #[test]
    fn test_preview_command_parses() {
        let cli = Cli::parse_from([
            "hearth",
            "preview",
            "John,Smith,husband",
            "Jane,Smith,wife",
            "--child",
            "Amy,Smith,daughter",
        ]);
        match cli.command {
            Command::Preview(args) => {
                assert_eq!(args.adult1, "John,Smith,husband");
                assert_eq!(args.adult2.as_deref(), Some("Jane,Smith,wife"));
                assert_eq!(args.children.len(), 1);
            }
            _ => panic!("Expected Preview command"),
        }
    }

    #[test]
    fn test_add_child_command_parses() {
        let cli = Cli::parse_from([
            "hearth",
            "add-child",
            "--household",
            "5001",
            "--child",
            "Amy,Smith,daughter",
            "--member-role",
            "123=mother",
        ]);
        match cli.command {
            Command::AddChild(args) => {
                assert_eq!(args.household, Some(5001));
                assert_eq!(args.member_roles.len(), 1);
            }
            _ => panic!("Expected AddChild command"),
        }
    }

    #[test]
    fn test_global_format_flag() {
        let cli = Cli::parse_from(["hearth", "--format", "json", "lookup", "John,Smith"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
    }
}
