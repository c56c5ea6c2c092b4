//! Canonical household name set

/// The six canonical household name strings
///
/// Produced atomically: every formatter branch fills all six fields, so a
/// value of this type is never partially populated. Field meanings follow
/// the donor CRM's household record (FullName, SortName, InformalName,
/// FormalName, EnvelopeName, RecognitionName).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalNameSet {
    /// Main household name, e.g. "The John Smith Family"
    pub full_name: String,

    /// Sorting/search form, surname first, e.g. "Smith, John and Jane"
    pub sort_name: String,

    /// Casual form, first names only, e.g. "John and Jane"
    pub informal_name: String,

    /// Formal address form, e.g. "Mr. and Mrs. Smith"
    pub formal_name: String,

    /// Mailing envelope form, e.g. "John and Jane Smith"
    pub envelope_name: String,

    /// Recognition/donor-wall form, e.g. "Mr. and Mrs. John and Jane Smith"
    pub recognition_name: String,
}

impl CanonicalNameSet {
    /// Assemble a name set from all six fields at once
    pub fn new(
        full_name: impl Into<String>,
        sort_name: impl Into<String>,
        informal_name: impl Into<String>,
        formal_name: impl Into<String>,
        envelope_name: impl Into<String>,
        recognition_name: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            sort_name: sort_name.into(),
            informal_name: informal_name.into(),
            formal_name: formal_name.into(),
            envelope_name: envelope_name.into(),
            recognition_name: recognition_name.into(),
        }
    }

    /// The six fields with their CRM labels, in canonical order
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("FullName", self.full_name.as_str()),
            ("SortName", self.sort_name.as_str()),
            ("InformalName", self.informal_name.as_str()),
            ("FormalName", self.formal_name.as_str()),
            ("EnvelopeName", self.envelope_name.as_str()),
            ("RecognitionName", self.recognition_name.as_str()),
        ]
    }
}
