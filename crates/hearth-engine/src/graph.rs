//! Relationship graph construction
//!
//! Builds the complete edge set for a brand-new household, or resolves the
//! role pairs for inserting one person into an existing household. Edge
//! emission order is part of the contract: spouse edge first, then each
//! child's parent edges (head adult before second adult), then sibling
//! pairs in nested `i < j` order.

use crate::naming::{FormatRequest, NameFormatter, NamingConfig};
use crate::order::order_adults;
use crate::resolver::{resolve_pair, sibling_pair};
use hearth_domain::role::normalize_parent_role;
use hearth_domain::{HouseholdPlan, Person, RelationshipEdge};
use tracing::debug;

/// Role inputs for one existing household member during insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRole {
    /// Role supplied for the member in this operation, possibly blank
    pub declared: String,

    /// Parent role already on file for the member, if any
    pub recorded: Option<String>,
}

impl MemberRole {
    /// A member role with nothing recorded in the directory
    pub fn declared(role: impl Into<String>) -> Self {
        Self {
            declared: role.into(),
            recorded: None,
        }
    }

    /// Attach the parent role found in the member's recorded relationships
    pub fn with_recorded(mut self, role: impl Into<String>) -> Self {
        self.recorded = Some(role.into());
        self
    }
}

/// Plan a new household: order the adults, derive the six names, and emit
/// every relationship edge
///
/// Member order in the plan is head, optional second adult, then the
/// children in input order. The spouse edge appears only when both adult
/// roles are literally husband/wife; unmarried parent pairs get no edge
/// between the adults. Each adult contributes a parent edge per child only
/// when their role is non-blank, with the adult-side role collapsed through
/// [`normalize_parent_role`].
pub fn plan_household(
    first_adult: Person,
    second_adult: Option<Person>,
    children: Vec<Person>,
    config: &NamingConfig,
) -> HouseholdPlan {
    // Settle who leads before indices or names are derived
    let (head, second) = match second_adult {
        Some(second) => {
            let (head, second) = order_adults(first_adult, second);
            (head, Some(second))
        }
        None => (first_adult, None),
    };

    let formatter = NameFormatter::new(config.clone());
    let names = formatter.format(&FormatRequest::for_members(
        &head,
        second.as_ref(),
        &children,
    ));

    let mut edges = Vec::new();
    let first_child_index = if second.is_some() { 2 } else { 1 };

    if let Some(second) = &second {
        let married = matches!(head.declared_role.as_str(), "husband" | "wife")
            && matches!(second.declared_role.as_str(), "husband" | "wife");
        if married {
            edges.push(RelationshipEdge::new(
                0,
                1,
                head.declared_role.clone(),
                second.declared_role.clone(),
            ));
        }
    }

    for (offset, child) in children.iter().enumerate() {
        let child_index = first_child_index + offset;
        if !head.declared_role.is_empty() {
            edges.push(RelationshipEdge::new(
                0,
                child_index,
                normalize_parent_role(&head.declared_role),
                child.declared_role.clone(),
            ));
        }
        if let Some(second) = &second {
            if !second.declared_role.is_empty() {
                edges.push(RelationshipEdge::new(
                    1,
                    child_index,
                    normalize_parent_role(&second.declared_role),
                    child.declared_role.clone(),
                ));
            }
        }
    }

    for i in 0..children.len() {
        for j in (i + 1)..children.len() {
            let (role_i, role_j) =
                sibling_pair(&children[i].declared_role, &children[j].declared_role);
            edges.push(RelationshipEdge::new(
                first_child_index + i,
                first_child_index + j,
                role_i,
                role_j,
            ));
        }
    }

    let mut members = vec![head];
    members.extend(second);
    members.extend(children);

    debug!(
        "Planned household: {} members, {} edges",
        members.len(),
        edges.len()
    );

    HouseholdPlan {
        members,
        names,
        edges,
    }
}

/// Resolve the role pair between each existing member and one incoming
/// person, in member order
///
/// Sibling edges among the existing members are assumed to be on file
/// already and are not regenerated here.
pub fn resolve_insertion(members: &[MemberRole], incoming_role: &str) -> Vec<(String, String)> {
    members
        .iter()
        .map(|member| resolve_pair(&member.declared, incoming_role, member.recorded.as_deref()))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn role_strategy() -> impl Strategy<Value = String> {
        proptest::sample::select(vec![
            "", "husband", "wife", "partner", "father", "mother", "dad", "mom",
        ])
        .prop_map(str::to_string)
    }

    proptest! {
        #[test]
        fn edge_count_matches_household_shape(
            role1 in role_strategy(),
            second in proptest::option::of(role_strategy()),
            child_count in 0usize..5,
        ) {
            let first = Person::new("A", "Smith", role1).unwrap();
            let second_adult = second
                .as_ref()
                .map(|role| Person::new("B", "Smith", role.clone()).unwrap());
            let children: Vec<Person> = (0..child_count)
                .map(|i| Person::new(format!("C{}", i), "Smith", "daughter").unwrap())
                .collect();

            let plan = plan_household(
                first,
                second_adult,
                children,
                &NamingConfig::default(),
            );

            let adult_count = if second.is_some() { 2 } else { 1 };
            let sibling_edges = child_count * child_count.saturating_sub(1) / 2;
            let max_edges = 1 + 2 * child_count + sibling_edges;

            prop_assert_eq!(plan.members.len(), adult_count + child_count);
            prop_assert!(plan.edges.len() <= max_edges);

            // Sibling edges are always all present; spouse and parent
            // edges depend on the declared roles
            prop_assert!(plan.edges.len() >= sibling_edges);
        }
    }
}
