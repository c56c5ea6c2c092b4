//! Person module - a role-tagged household participant

use std::fmt;

/// A household participant as supplied to the inference engine
///
/// `id` is present only when the person has been matched to an existing
/// directory record; identity is external, so two `Person` values are
/// distinct unless they carry the same id. `declared_role` is the raw role
/// the caller collected (possibly empty), canonicalized to trimmed lowercase
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Directory record id, when matched
    pub id: Option<i64>,

    /// Given name (trimmed, never empty)
    pub first_name: String,

    /// Surname (trimmed, never empty)
    pub last_name: String,

    /// Declared family role (trimmed lowercase, possibly empty)
    pub declared_role: String,
}

impl Person {
    /// Create a person, validating the required name fields
    ///
    /// Both names are trimmed and must be non-empty afterwards; the role is
    /// trimmed and lowercased but may be empty. Participants with blank
    /// names must be excluded by the caller, not passed through.
    ///
    /// # Examples
    ///
    /// ```
    /// use hearth_domain::Person;
    ///
    /// let person = Person::new("John", "Smith", "Husband").unwrap();
    /// assert_eq!(person.declared_role, "husband");
    /// assert!(Person::new("", "Smith", "husband").is_err());
    /// ```
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        declared_role: impl Into<String>,
    ) -> Result<Self, String> {
        let first_name = first_name.into().trim().to_string();
        let last_name = last_name.into().trim().to_string();

        if first_name.is_empty() {
            return Err("First name cannot be empty".to_string());
        }
        if last_name.is_empty() {
            return Err("Last name cannot be empty".to_string());
        }

        Ok(Self {
            id: None,
            first_name,
            last_name,
            declared_role: declared_role.into().trim().to_lowercase(),
        })
    }

    /// Attach the matched directory record id
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// True when the person is matched to an existing directory record
    pub fn is_matched(&self) -> bool {
        self.id.is_some()
    }

    /// "First Last" display form
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
