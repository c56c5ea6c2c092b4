//! Directory records exchanged with the external collaborators

/// A constituent record matched in the remote directory
///
/// Optional demographic fields are carried through so household creation can
/// preserve them; the engine itself never reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constituent {
    /// Directory record id
    pub id: i64,

    /// Human-facing account number, when the directory exposes one
    pub account_number: Option<i64>,

    /// Given name
    pub first_name: String,

    /// Surname
    pub last_name: String,

    /// Middle name, when on file
    pub middle_name: Option<String>,

    /// Gender, when on file
    pub gender: Option<String>,

    /// Birthdate (directory's own string form), when on file
    pub birthdate: Option<String>,

    /// Household the constituent currently belongs to, if any
    pub household_id: Option<i64>,
}

impl Constituent {
    /// "First Last" display form
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The household id when the constituent already belongs to one
    ///
    /// The directory reports "no household" as either an absent field or a
    /// zero id; both read as `None` here.
    pub fn in_household(&self) -> Option<i64> {
        self.household_id.filter(|id| *id > 0)
    }
}

/// A household record as stored in the remote directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseholdRecord {
    /// Household id
    pub id: i64,

    /// The household's FullName field
    pub full_name: String,

    /// Head-of-household constituent id, when set
    pub head_id: Option<i64>,

    /// Member constituent ids (may include the head)
    pub member_ids: Vec<i64>,
}

/// One recorded relationship between two constituents
///
/// `role_1` is the role of `account_id_1` toward `account_id_2`, and
/// `role_2` the reverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipRecord {
    /// First participant's constituent id
    pub account_id_1: i64,

    /// Second participant's constituent id
    pub account_id_2: i64,

    /// Role of the first participant toward the second
    pub role_1: String,

    /// Role of the second participant toward the first
    pub role_2: String,
}

/// Result of submitting one relationship to the store
///
/// The store reports an already-existing relationship as a distinct outcome
/// because callers must treat it as success, not retry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipOutcome {
    /// The relationship was newly created
    Created,

    /// The relationship was already on file
    AlreadyExists,
}
