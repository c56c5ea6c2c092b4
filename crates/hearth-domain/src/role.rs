//! Role module - classification of declared family roles

use std::fmt;

/// Semantic category of a declared family role
///
/// Every concrete role label maps to exactly one category. Labels outside the
/// vocabulary (including blank ones) classify as `Unknown`; callers must
/// handle `Unknown` explicitly rather than expecting an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleCategory {
    /// husband, wife, partner, spouse
    Spouse,

    /// father, mother, dad, mom
    Parent,

    /// son, daughter, child
    Child,

    /// brother, sister
    Sibling,

    /// Anything else, including the blank role
    Unknown,
}

impl RoleCategory {
    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCategory::Spouse => "spouse",
            RoleCategory::Parent => "parent",
            RoleCategory::Child => "child",
            RoleCategory::Sibling => "sibling",
            RoleCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a free-form role label into its semantic category
///
/// Lower-cases and trims the input first. Never fails: unrecognized or blank
/// labels classify as [`RoleCategory::Unknown`].
///
/// # Examples
///
/// ```
/// use hearth_domain::role::{classify, RoleCategory};
///
/// assert_eq!(classify("Husband"), RoleCategory::Spouse);
/// assert_eq!(classify(" mom "), RoleCategory::Parent);
/// assert_eq!(classify("daughter"), RoleCategory::Child);
/// assert_eq!(classify(""), RoleCategory::Unknown);
/// ```
pub fn classify(role: &str) -> RoleCategory {
    match role.trim().to_lowercase().as_str() {
        "husband" | "wife" | "partner" | "spouse" => RoleCategory::Spouse,
        "father" | "mother" | "dad" | "mom" => RoleCategory::Parent,
        "son" | "daughter" | "child" => RoleCategory::Child,
        "brother" | "sister" => RoleCategory::Sibling,
        _ => RoleCategory::Unknown,
    }
}

/// Collapse a role to the canonical parent role it implies
///
/// {husband, father, dad} become "father" and {wife, mother, mom} become
/// "mother"; any other label passes through unchanged (trimmed, lowercased).
/// Used whenever a parent-facing role must be emitted toward a child.
///
/// # Examples
///
/// ```
/// use hearth_domain::role::normalize_parent_role;
///
/// assert_eq!(normalize_parent_role("husband"), "father");
/// assert_eq!(normalize_parent_role("Mom"), "mother");
/// assert_eq!(normalize_parent_role("partner"), "partner");
/// ```
pub fn normalize_parent_role(role: &str) -> String {
    let role = role.trim().to_lowercase();
    match role.as_str() {
        "husband" | "father" | "dad" => "father".to_string(),
        "wife" | "mother" | "mom" => "mother".to_string(),
        _ => role,
    }
}

/// True if the role classifies as [`RoleCategory::Spouse`]
pub fn is_spouse_role(role: &str) -> bool {
    classify(role) == RoleCategory::Spouse
}

/// True if the role classifies as [`RoleCategory::Parent`]
pub fn is_parent_role(role: &str) -> bool {
    classify(role) == RoleCategory::Parent
}

/// True if the role classifies as [`RoleCategory::Child`]
pub fn is_child_role(role: &str) -> bool {
    classify(role) == RoleCategory::Child
}

/// True if the role classifies as [`RoleCategory::Sibling`]
pub fn is_sibling_role(role: &str) -> bool {
    classify(role) == RoleCategory::Sibling
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_vocabulary() {
        assert_eq!(classify("husband"), RoleCategory::Spouse);
        assert_eq!(classify("wife"), RoleCategory::Spouse);
        assert_eq!(classify("partner"), RoleCategory::Spouse);
        assert_eq!(classify("spouse"), RoleCategory::Spouse);
        assert_eq!(classify("father"), RoleCategory::Parent);
        assert_eq!(classify("mother"), RoleCategory::Parent);
        assert_eq!(classify("dad"), RoleCategory::Parent);
        assert_eq!(classify("mom"), RoleCategory::Parent);
        assert_eq!(classify("son"), RoleCategory::Child);
        assert_eq!(classify("daughter"), RoleCategory::Child);
        assert_eq!(classify("child"), RoleCategory::Child);
        assert_eq!(classify("brother"), RoleCategory::Sibling);
        assert_eq!(classify("sister"), RoleCategory::Sibling);
    }

    #[test]
    fn test_classify_normalizes_case_and_whitespace() {
        assert_eq!(classify("  Husband "), RoleCategory::Spouse);
        assert_eq!(classify("MOTHER"), RoleCategory::Parent);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify(""), RoleCategory::Unknown);
        assert_eq!(classify("   "), RoleCategory::Unknown);
        assert_eq!(classify("friend"), RoleCategory::Unknown);
        assert_eq!(classify("grandmother"), RoleCategory::Unknown);
    }

    #[test]
    fn test_normalize_parent_role() {
        assert_eq!(normalize_parent_role("husband"), "father");
        assert_eq!(normalize_parent_role("father"), "father");
        assert_eq!(normalize_parent_role("dad"), "father");
        assert_eq!(normalize_parent_role("wife"), "mother");
        assert_eq!(normalize_parent_role("mother"), "mother");
        assert_eq!(normalize_parent_role("mom"), "mother");
    }

    #[test]
    fn test_normalize_parent_role_passthrough() {
        assert_eq!(normalize_parent_role("brother"), "brother");
        assert_eq!(normalize_parent_role("Partner"), "partner");
        assert_eq!(normalize_parent_role(""), "");
    }

    #[test]
    fn test_predicates() {
        assert!(is_spouse_role("wife"));
        assert!(is_parent_role("dad"));
        assert!(is_child_role("child"));
        assert!(is_sibling_role("sister"));
        assert!(!is_parent_role("sister"));
        assert!(!is_child_role(""));
    }

    #[test]
    fn test_category_display() {
        assert_eq!(RoleCategory::Parent.to_string(), "parent");
        assert_eq!(RoleCategory::Unknown.to_string(), "unknown");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn classify_is_total(role in ".*") {
            // Must never panic, whatever the label looks like
            let _ = classify(&role);
        }

        #[test]
        fn normalize_is_idempotent(role in "[a-zA-Z ]{0,24}") {
            let once = normalize_parent_role(&role);
            prop_assert_eq!(normalize_parent_role(&once), once.clone());
        }

        #[test]
        fn parent_roles_normalize_to_father_or_mother(role in ".*") {
            if is_parent_role(&role) {
                let normalized = normalize_parent_role(&role);
                prop_assert!(normalized == "father" || normalized == "mother");
            }
        }
    }
}
