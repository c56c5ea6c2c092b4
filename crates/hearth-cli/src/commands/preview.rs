//! Preview command implementation.

use crate::cli::{parse_person_arg, PreviewArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use hearth_domain::Person;
use hearth_engine::{plan_household, NamingConfig};
use hearth_registrar::PersonSpec;

/// Execute the preview command.
///
/// Runs the naming and relationship engine on the supplied people without
/// resolving anyone against the directory or writing anything.
pub async fn execute_preview(
    args: PreviewArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let first = person_from_spec(parse_person_arg(&args.adult1, false)?)?;

    let second = match &args.adult2 {
        Some(input) => Some(person_from_spec(parse_person_arg(input, false)?)?),
        None => None,
    };

    let mut children = Vec::new();
    for input in &args.children {
        children.push(person_from_spec(parse_person_arg(input, true)?)?);
    }

    let naming = match args.spouse_title {
        Some(title) => NamingConfig {
            second_spouse_title: title.into(),
        },
        None => config.get_active_profile()?.naming_config()?,
    };

    let plan = plan_household(first, second, children, &naming);
    println!("{}", formatter.format_plan(&plan)?);

    Ok(())
}

fn person_from_spec(spec: PersonSpec) -> Result<Person> {
    Person::new(spec.first_name, spec.last_name, spec.role).map_err(CliError::InvalidInput)
}
