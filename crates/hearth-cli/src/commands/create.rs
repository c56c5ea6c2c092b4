//! Create command implementation.

use crate::cli::{parse_person_arg, CreateArgs};
use crate::error::Result;
use crate::output::Formatter;
use hearth_bloomerang::BloomerangClient;
use hearth_registrar::{PersonSpec, Registrar};

/// Execute the create command.
pub async fn execute_create(
    args: CreateArgs,
    registrar: &mut Registrar<BloomerangClient>,
    formatter: &Formatter,
) -> Result<()> {
    let first = parse_person_arg(&args.adult1, false)?;
    let second = match &args.adult2 {
        Some(input) => Some(parse_person_arg(input, false)?),
        None => None,
    };
    let children: Vec<PersonSpec> = args
        .children
        .iter()
        .map(|input| parse_person_arg(input, true))
        .collect::<Result<Vec<_>>>()?;

    if args.dry_run {
        let (plan, warnings) = registrar.preview_household(first, second, children).await?;
        for warning in &warnings {
            println!("{}", formatter.warning(warning));
        }
        println!("{}", formatter.format_plan(&plan)?);
        println!("{}", formatter.info("Dry run: nothing was written"));
        return Ok(());
    }

    let creation = registrar.create_household(first, second, children).await?;

    for warning in &creation.duplicate_warnings {
        println!("{}", formatter.warning(warning));
    }
    println!("{}", formatter.format_plan(&creation.plan)?);
    println!("{}", formatter.household_created(&creation.household));
    println!(
        "{}",
        formatter.relationship_summary(
            creation.relationships_created,
            creation.relationships_existing,
            creation.relationships_skipped,
        )
    );

    Ok(())
}
