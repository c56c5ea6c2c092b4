//! Pairwise relationship resolution
//!
//! Given an existing household member's role and an incoming person's role,
//! [`resolve_pair`] produces the bidirectional role pair to record between
//! them, reconciling category mismatches (a "sister" joining a household
//! whose member is a "father" becomes his "daughter", and so on). The
//! resolver is total: unrecognized combinations pass through unchanged
//! rather than failing.

use hearth_domain::RelationshipRecord;

/// Resolve the bidirectional roles between an existing member and an
/// incoming person
///
/// `recorded_parent` is the member's parent role already on file, if any;
/// when present it overrides whatever role the caller supplied for the
/// member, and the incoming role is taken as given. All inputs are trimmed
/// and lowercased before the table is consulted.
///
/// Returns `(role_member_to_incoming, role_incoming_to_member)`.
///
/// # Examples
///
/// ```
/// use hearth_engine::resolve_pair;
///
/// let (member, incoming) = resolve_pair("father", "sister", None);
/// assert_eq!((member.as_str(), incoming.as_str()), ("father", "daughter"));
///
/// let (member, incoming) = resolve_pair("brother", "daughter", Some("father"));
/// assert_eq!((member.as_str(), incoming.as_str()), ("father", "daughter"));
/// ```
pub fn resolve_pair(
    member_role: &str,
    incoming_role: &str,
    recorded_parent: Option<&str>,
) -> (String, String) {
    let member = recorded_parent
        .unwrap_or(member_role)
        .trim()
        .to_lowercase();
    let incoming = incoming_role.trim().to_lowercase();

    match member.as_str() {
        "father" | "mother" => match incoming.as_str() {
            "daughter" | "son" => (member, incoming),
            "sister" => (member, "daughter".to_string()),
            "brother" => (member, "son".to_string()),
            _ => {
                let child = if member == "mother" { "daughter" } else { "son" };
                (member, child.to_string())
            }
        },
        "brother" | "sister" => match incoming.as_str() {
            // The incoming person's own gender-coded role decides the
            // sibling form; the member's role stays as given
            "daughter" => (member, "sister".to_string()),
            "son" => (member, "brother".to_string()),
            "brother" | "sister" => (member, incoming),
            _ => {
                let opposite = if member == "brother" {
                    "sister"
                } else {
                    "brother"
                };
                (member, opposite.to_string())
            }
        },
        "daughter" | "son" => {
            let member_sibling = if member == "daughter" {
                "sister"
            } else {
                "brother"
            };
            match incoming.as_str() {
                "father" | "mother" => (member, incoming),
                "daughter" => (member_sibling.to_string(), "sister".to_string()),
                "son" => (member_sibling.to_string(), "brother".to_string()),
                "brother" | "sister" => (member_sibling.to_string(), incoming),
                _ => {
                    let opposite = if member_sibling == "brother" {
                        "sister"
                    } else {
                        "brother"
                    };
                    (member_sibling.to_string(), opposite.to_string())
                }
            }
        }
        _ => (member, incoming),
    }
}

/// Derive the sibling role pair for two children from their declared roles
///
/// daughter maps to sister and son to brother, each side independently;
/// any other label on either side makes the whole pair the generic
/// `("sibling", "sibling")`.
pub fn sibling_pair(role_a: &str, role_b: &str) -> (String, String) {
    match (sibling_form(role_a), sibling_form(role_b)) {
        (Some(a), Some(b)) => (a.to_string(), b.to_string()),
        _ => ("sibling".to_string(), "sibling".to_string()),
    }
}

fn sibling_form(role: &str) -> Option<&'static str> {
    match role.trim().to_lowercase().as_str() {
        "daughter" => Some("sister"),
        "son" => Some("brother"),
        _ => None,
    }
}

/// Find the parent role a member already holds in their recorded
/// relationships
///
/// Scans the records for ones where the member appears on either side and
/// returns the first role that reads "father" or "mother" (case
/// insensitive). Spouse roles and informal labels like "mom" never count as
/// recorded parent roles.
pub fn recorded_parent_role(records: &[RelationshipRecord], member_id: i64) -> Option<String> {
    for record in records {
        let role = if record.account_id_1 == member_id {
            &record.role_1
        } else if record.account_id_2 == member_id {
            &record.role_2
        } else {
            continue;
        };
        let role = role.trim().to_lowercase();
        if role == "father" || role == "mother" {
            return Some(role);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn test_parent_with_child_roles_pass_through() {
        assert_eq!(resolve_pair("father", "daughter", None), pair("father", "daughter"));
        assert_eq!(resolve_pair("mother", "son", None), pair("mother", "son"));
    }

    #[test]
    fn test_parent_converts_sibling_to_child() {
        assert_eq!(resolve_pair("father", "sister", None), pair("father", "daughter"));
        assert_eq!(resolve_pair("mother", "brother", None), pair("mother", "son"));
    }

    #[test]
    fn test_parent_defaults_to_natural_child_role() {
        assert_eq!(resolve_pair("mother", "friend", None), pair("mother", "daughter"));
        assert_eq!(resolve_pair("father", "", None), pair("father", "son"));
    }

    #[test]
    fn test_sibling_converts_child_by_incoming_role() {
        // The incoming role, not the member's, decides the sibling form
        assert_eq!(resolve_pair("sister", "son", None), pair("sister", "brother"));
        assert_eq!(resolve_pair("brother", "daughter", None), pair("brother", "sister"));
        assert_eq!(resolve_pair("sister", "daughter", None), pair("sister", "sister"));
        assert_eq!(resolve_pair("brother", "son", None), pair("brother", "brother"));
    }

    #[test]
    fn test_sibling_pairs_pass_through() {
        assert_eq!(resolve_pair("brother", "sister", None), pair("brother", "sister"));
        assert_eq!(resolve_pair("sister", "sister", None), pair("sister", "sister"));
    }

    #[test]
    fn test_sibling_defaults_to_opposite_of_member() {
        assert_eq!(resolve_pair("brother", "friend", None), pair("brother", "sister"));
        assert_eq!(resolve_pair("sister", "", None), pair("sister", "brother"));
    }

    #[test]
    fn test_child_with_incoming_parent_passes_through() {
        assert_eq!(resolve_pair("daughter", "mother", None), pair("daughter", "mother"));
        assert_eq!(resolve_pair("son", "father", None), pair("son", "father"));
    }

    #[test]
    fn test_two_children_become_siblings() {
        assert_eq!(resolve_pair("daughter", "son", None), pair("sister", "brother"));
        assert_eq!(resolve_pair("son", "son", None), pair("brother", "brother"));
    }

    #[test]
    fn test_child_with_incoming_sibling() {
        assert_eq!(resolve_pair("son", "sister", None), pair("brother", "sister"));
        assert_eq!(resolve_pair("daughter", "brother", None), pair("sister", "brother"));
    }

    #[test]
    fn test_child_defaults_to_opposite_siblings() {
        assert_eq!(resolve_pair("daughter", "friend", None), pair("sister", "brother"));
        assert_eq!(resolve_pair("son", "", None), pair("brother", "sister"));
    }

    #[test]
    fn test_unrecognized_member_roles_pass_through() {
        // The table matches concrete labels only; informal parent labels
        // and the generic "child" land in the fallback untouched
        assert_eq!(resolve_pair("mom", "daughter", None), pair("mom", "daughter"));
        assert_eq!(resolve_pair("dad", "son", None), pair("dad", "son"));
        assert_eq!(resolve_pair("child", "son", None), pair("child", "son"));
        assert_eq!(resolve_pair("friend", "pal", None), pair("friend", "pal"));
        assert_eq!(resolve_pair("", "son", None), pair("", "son"));
    }

    #[test]
    fn test_recorded_parent_role_overrides_member_role() {
        assert_eq!(
            resolve_pair("brother", "daughter", Some("father")),
            pair("father", "daughter")
        );
        assert_eq!(resolve_pair("", "son", Some("mother")), pair("mother", "son"));
        assert_eq!(
            resolve_pair("daughter", "brother", Some(" Mother ")),
            pair("mother", "son")
        );
    }

    #[test]
    fn test_inputs_are_normalized() {
        assert_eq!(
            resolve_pair(" Father ", "DAUGHTER", None),
            pair("father", "daughter")
        );
    }

    #[test]
    fn test_sibling_pair_derivation() {
        assert_eq!(sibling_pair("daughter", "son"), pair("sister", "brother"));
        assert_eq!(sibling_pair("son", "daughter"), pair("brother", "sister"));
        assert_eq!(sibling_pair("son", "son"), pair("brother", "brother"));
        assert_eq!(sibling_pair("daughter", "daughter"), pair("sister", "sister"));
    }

    #[test]
    fn test_sibling_pair_generic_fallback() {
        assert_eq!(sibling_pair("daughter", "child"), pair("sibling", "sibling"));
        assert_eq!(sibling_pair("", "son"), pair("sibling", "sibling"));
        assert_eq!(sibling_pair("niece", "nephew"), pair("sibling", "sibling"));
    }

    fn record(id1: i64, role1: &str, id2: i64, role2: &str) -> RelationshipRecord {
        RelationshipRecord {
            account_id_1: id1,
            account_id_2: id2,
            role_1: role1.to_string(),
            role_2: role2.to_string(),
        }
    }

    #[test]
    fn test_recorded_parent_role_found_on_either_side() {
        let records = vec![
            record(10, "Husband", 11, "Wife"),
            record(10, "Father", 12, "Son"),
        ];
        assert_eq!(recorded_parent_role(&records, 10), Some("father".to_string()));

        let records = vec![record(12, "Son", 11, "Mother")];
        assert_eq!(recorded_parent_role(&records, 11), Some("mother".to_string()));
    }

    #[test]
    fn test_recorded_parent_role_ignores_other_roles() {
        let records = vec![
            record(10, "Husband", 11, "Wife"),
            record(10, "Brother", 13, "Sister"),
        ];
        assert_eq!(recorded_parent_role(&records, 10), None);
    }

    #[test]
    fn test_recorded_parent_role_requires_concrete_label() {
        // "mom" may appear in free-form roles but is never a recorded one
        let records = vec![record(10, "mom", 12, "daughter")];
        assert_eq!(recorded_parent_role(&records, 10), None);
    }

    #[test]
    fn test_recorded_parent_role_ignores_unrelated_records() {
        let records = vec![record(20, "Father", 21, "Daughter")];
        assert_eq!(recorded_parent_role(&records, 10), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use hearth_domain::role::{classify, RoleCategory};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn recognized_members_resolve_to_consistent_categories(
            member in proptest::sample::select(vec![
                "father", "mother", "brother", "sister", "daughter", "son",
            ]),
            incoming in ".*",
        ) {
            let (a, b) = resolve_pair(member, &incoming, None);
            let categories = (classify(&a), classify(&b));
            prop_assert!(
                matches!(
                    categories,
                    (RoleCategory::Parent, RoleCategory::Child)
                        | (RoleCategory::Child, RoleCategory::Parent)
                        | (RoleCategory::Sibling, RoleCategory::Sibling)
                ),
                "inconsistent categories {:?} for ({}, {})",
                categories,
                member,
                incoming
            );
        }

        #[test]
        fn recorded_parent_always_wins(
            member in "[a-z]{0,10}",
            incoming in "[a-z]{0,10}",
            recorded in proptest::sample::select(vec!["father", "mother"]),
        ) {
            let (a, b) = resolve_pair(&member, &incoming, Some(recorded));
            prop_assert_eq!(a, recorded);
            prop_assert_eq!(classify(&b), RoleCategory::Child);
        }

        #[test]
        fn sibling_pair_is_total(a in ".*", b in ".*") {
            let (left, right) = sibling_pair(&a, &b);
            prop_assert!(!left.is_empty());
            prop_assert!(!right.is_empty());
        }
    }
}
