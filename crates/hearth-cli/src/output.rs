//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use hearth_domain::{CanonicalNameSet, Constituent, HouseholdPlan, HouseholdRecord};
use colored::*;
use serde_json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a canonical name set.
    pub fn format_names(&self, names: &CanonicalNameSet) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&names_json(names))?),
            OutputFormat::Table => Ok(self.names_table(names)),
            OutputFormat::Quiet => Ok(names.full_name.clone()),
        }
    }

    /// Format a full household plan: names, members, and relationships.
    pub fn format_plan(&self, plan: &HouseholdPlan) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_plan_json(plan),
            OutputFormat::Table => Ok(self.format_plan_table(plan)),
            OutputFormat::Quiet => Ok(plan.names.full_name.clone()),
        }
    }

    /// Format constituent search results.
    pub fn format_constituents(&self, constituents: &[Constituent]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_constituents_json(constituents),
            OutputFormat::Table => Ok(self.format_constituents_table(constituents)),
            OutputFormat::Quiet => Ok(constituents
                .iter()
                .map(|c| c.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn names_table(&self, names: &CanonicalNameSet) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (label, value) in names.fields() {
            builder.push_record([label, value]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn format_plan_table(&self, plan: &HouseholdPlan) -> String {
        let mut sections = vec![self.names_table(&plan.names)];

        let mut builder = Builder::default();
        builder.push_record(["#", "Name", "Role"]);
        for (i, member) in plan.members.iter().enumerate() {
            builder.push_record([
                &(i + 1).to_string(),
                &member.display_name(),
                &member.declared_role,
            ]);
        }
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        sections.push(table.to_string());

        if !plan.edges.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["From", "To", "Roles"]);
            for edge in &plan.edges {
                let from = plan
                    .members
                    .get(edge.a)
                    .map(|m| m.display_name())
                    .unwrap_or_default();
                let to = plan
                    .members
                    .get(edge.b)
                    .map(|m| m.display_name())
                    .unwrap_or_default();
                let roles = format!("{} / {}", edge.role_a_to_b, edge.role_b_to_a);
                builder.push_record([&from, &to, &roles]);
            }
            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            sections.push(table.to_string());
        }

        sections.join("\n")
    }

    fn format_plan_json(&self, plan: &HouseholdPlan) -> Result<String> {
        let members: Vec<serde_json::Value> = plan
            .members
            .iter()
            .map(|m| {
                serde_json::json!({
                    "id": m.id,
                    "name": m.display_name(),
                    "role": m.declared_role,
                })
            })
            .collect();

        let relationships: Vec<serde_json::Value> = plan
            .edges
            .iter()
            .map(|e| {
                serde_json::json!({
                    "from": plan.members.get(e.a).map(|m| m.display_name()),
                    "to": plan.members.get(e.b).map(|m| m.display_name()),
                    "role_from_to": e.role_a_to_b,
                    "role_to_from": e.role_b_to_a,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&serde_json::json!({
            "names": names_json(&plan.names),
            "members": members,
            "relationships": relationships,
        }))?)
    }

    fn format_constituents_table(&self, constituents: &[Constituent]) -> String {
        if constituents.is_empty() {
            return self.colorize("No matching constituents.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Id", "Account", "Name", "Household"]);
        for constituent in constituents {
            let account = constituent
                .account_number
                .map(|n| n.to_string())
                .unwrap_or_default();
            let household = constituent
                .in_household()
                .map(|id| id.to_string())
                .unwrap_or_default();
            builder.push_record([
                &constituent.id.to_string(),
                &account,
                &constituent.display_name(),
                &household,
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    fn format_constituents_json(&self, constituents: &[Constituent]) -> Result<String> {
        let values: Vec<serde_json::Value> = constituents
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "account_number": c.account_number,
                    "name": c.display_name(),
                    "household_id": c.in_household(),
                })
            })
            .collect();
        Ok(serde_json::to_string_pretty(&values)?)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format a household creation result.
    pub fn household_created(&self, household: &HouseholdRecord) -> String {
        self.success(&format!(
            "Household {} created: \"{}\"",
            household.id, household.full_name
        ))
    }

    /// Format a relationship submission summary.
    pub fn relationship_summary(&self, created: usize, existing: usize, skipped: usize) -> String {
        let message = format!(
            "{} relationship(s) recorded, {} already present, {} skipped",
            created, existing, skipped
        );
        if skipped > 0 {
            self.warning(&message)
        } else {
            self.success(&message)
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn names_json(names: &CanonicalNameSet) -> serde_json::Value {
    serde_json::json!({
        "full_name": names.full_name,
        "sort_name": names.sort_name,
        "informal_name": names.informal_name,
        "formal_name": names.formal_name,
        "envelope_name": names.envelope_name,
        "recognition_name": names.recognition_name,
    })
}
