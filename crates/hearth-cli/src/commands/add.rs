//! Add-child and add-spouse command implementations.

use crate::cli::{parse_member_role, parse_person_arg, AddChildArgs, AddSpouseArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use hearth_bloomerang::BloomerangClient;
use hearth_registrar::{PersonSpec, Registrar};

/// Execute the add-child command.
pub async fn execute_add_child(
    args: AddChildArgs,
    registrar: &mut Registrar<BloomerangClient>,
    formatter: &Formatter,
) -> Result<()> {
    let child = parse_person_arg(&args.child, true)?;

    let household_id = match args.household {
        Some(id) => id,
        None => {
            let of = args.of.as_deref().ok_or_else(|| {
                CliError::InvalidInput("Pass --household <id> or --of First,Last".to_string())
            })?;
            let member = parse_person_arg(of, false)?;
            registrar.household_of(&member).await?
        }
    };

    let member_roles: Vec<(i64, String)> = args
        .member_roles
        .iter()
        .map(|input| parse_member_role(input))
        .collect::<Result<Vec<_>>>()?;

    let addition = registrar
        .add_child(household_id, child, &member_roles)
        .await?;

    println!(
        "{}",
        formatter.success(&format!(
            "Attached {} to household {} (\"{}\")",
            addition.member.display_name(),
            addition.household.id,
            addition.household.full_name
        ))
    );
    println!(
        "{}",
        formatter.relationship_summary(
            addition.relationships_created,
            addition.relationships_existing,
            addition.relationships_skipped,
        )
    );

    Ok(())
}

/// Execute the add-spouse command.
pub async fn execute_add_spouse(
    args: AddSpouseArgs,
    registrar: &mut Registrar<BloomerangClient>,
    formatter: &Formatter,
) -> Result<()> {
    let existing = spec_from_name_or_account(
        args.to.as_deref(),
        args.to_account.as_deref(),
        "--to or --to-account",
    )?;
    let spouse = spec_from_name_or_account(
        args.spouse.as_deref(),
        args.spouse_account.as_deref(),
        "--spouse or --spouse-account",
    )?;

    let addition = registrar
        .add_spouse(existing, spouse, args.role.as_str())
        .await?;

    if let Some(names) = &addition.names {
        println!("{}", formatter.format_names(names)?);
    }
    println!(
        "{}",
        formatter.success(&format!(
            "Attached {} to household {} (\"{}\")",
            addition.member.display_name(),
            addition.household.id,
            addition.household.full_name
        ))
    );
    println!(
        "{}",
        formatter.relationship_summary(
            addition.relationships_created,
            addition.relationships_existing,
            addition.relationships_skipped,
        )
    );

    Ok(())
}

/// Build a spec from a "First,Last" name, an account number, or both.
fn spec_from_name_or_account(
    name: Option<&str>,
    account: Option<&str>,
    flags: &str,
) -> Result<PersonSpec> {
    let mut spec = match name {
        Some(name) => parse_person_arg(name, false)?,
        None => {
            if account.is_none() {
                return Err(CliError::InvalidInput(format!("Pass {}", flags)));
            }
            PersonSpec::new("", "", "")
        }
    };
    if let Some(account) = account {
        spec = spec.with_account_number(account);
    }
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_from_name() {
        let spec = spec_from_name_or_account(Some("John,Smith"), None, "--to").unwrap();
        assert_eq!(spec.first_name, "John");
        assert!(spec.account_number.is_none());
    }

    #[test]
    fn test_spec_from_account_only() {
        let spec = spec_from_name_or_account(None, Some("#123"), "--to").unwrap();
        assert!(!spec.has_names());
        assert_eq!(spec.account_number.as_deref(), Some("#123"));
    }

    #[test]
    fn test_spec_requires_name_or_account() {
        let result = spec_from_name_or_account(None, None, "--to or --to-account");
        assert!(result.is_err());
    }
}
