//! Relationship role directory
//!
//! Bloomerang identifies relationship roles by numeric id, not by label.
//! The table below is the fixed id assignment for the roles this
//! organization's database defines; labels outside it (notably the generic
//! "sibling" fallback) cannot be submitted and must be skipped by callers.

/// Role label to Bloomerang relationship role id
///
/// "mom" and "dad" are accepted as informal aliases of mother and father.
pub const RELATIONSHIP_ROLES: &[(&str, u32)] = &[
    ("brother", 16),
    ("co-worker", 17),
    ("daughter", 18),
    ("employee", 19),
    ("employer", 20),
    ("father", 21),
    ("friend", 22),
    ("husband", 23),
    ("mother", 24),
    ("partner", 25),
    ("sister", 26),
    ("son", 27),
    ("wife", 28),
    ("mom", 24),
    ("dad", 21),
];

/// Look up the role id for a label, case-insensitively
pub fn relationship_role_id(role: &str) -> Option<u32> {
    let role = role.trim().to_lowercase();
    RELATIONSHIP_ROLES
        .iter()
        .find(|(label, _)| *label == role)
        .map(|(_, id)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ids() {
        assert_eq!(relationship_role_id("wife"), Some(28));
        assert_eq!(relationship_role_id("husband"), Some(23));
        assert_eq!(relationship_role_id("daughter"), Some(18));
        assert_eq!(relationship_role_id("son"), Some(27));
    }

    #[test]
    fn test_informal_aliases_share_ids() {
        assert_eq!(relationship_role_id("mom"), relationship_role_id("mother"));
        assert_eq!(relationship_role_id("dad"), relationship_role_id("father"));
    }

    #[test]
    fn test_lookup_normalizes_input() {
        assert_eq!(relationship_role_id(" Sister "), Some(26));
        assert_eq!(relationship_role_id("BROTHER"), Some(16));
    }

    #[test]
    fn test_roles_without_directory_entries() {
        assert_eq!(relationship_role_id("sibling"), None);
        assert_eq!(relationship_role_id("spouse"), None);
        assert_eq!(relationship_role_id("child"), None);
        assert_eq!(relationship_role_id(""), None);
    }
}
