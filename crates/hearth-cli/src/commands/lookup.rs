//! Lookup command implementation.

use crate::cli::{parse_person_arg, LookupArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use hearth_bloomerang::BloomerangClient;
use hearth_domain::traits::ConstituentLookup;

/// Execute the lookup command.
pub async fn execute_lookup(
    args: LookupArgs,
    client: &BloomerangClient,
    formatter: &Formatter,
) -> Result<()> {
    let constituents = if let Some(name) = &args.name {
        let spec = parse_person_arg(name, false)?;
        client
            .matches_by_name(&spec.first_name, &spec.last_name)
            .await?
    } else if let Some(account) = &args.account {
        client
            .find_by_account_number(account)
            .await?
            .into_iter()
            .collect()
    } else {
        return Err(CliError::InvalidInput(
            "Pass a name ('First,Last') or --account <number>".to_string(),
        ));
    };

    println!("{}", formatter.format_constituents(&constituents)?);

    for constituent in &constituents {
        if let Some(household_id) = constituent.in_household() {
            if let Some(household) = client.household(household_id).await? {
                println!(
                    "{}",
                    formatter.info(&format!(
                        "{} belongs to \"{}\" (household {})",
                        constituent.display_name(),
                        household.full_name,
                        household.id
                    ))
                );
            }
        }
    }

    Ok(())
}
