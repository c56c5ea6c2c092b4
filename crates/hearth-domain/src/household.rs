//! Household plan - the engine's output bundle

use crate::names::CanonicalNameSet;
use crate::person::Person;

/// One bidirectional relationship between two planned household members
///
/// `a` and `b` index the plan's member order (0 = head). The two roles are
/// concrete role labels; for recognized pairings their categories are
/// mutually consistent (Parent↔Child, Spouse↔Spouse, Sibling↔Sibling), while
/// unrecognized pairings carry the caller's labels through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipEdge {
    /// Index of the first member in the plan's member order
    pub a: usize,

    /// Index of the second member in the plan's member order
    pub b: usize,

    /// Role of member `a` toward member `b`
    pub role_a_to_b: String,

    /// Role of member `b` toward member `a`
    pub role_b_to_a: String,
}

impl RelationshipEdge {
    /// Create an edge between two member indices
    pub fn new(
        a: usize,
        b: usize,
        role_a_to_b: impl Into<String>,
        role_b_to_a: impl Into<String>,
    ) -> Self {
        Self {
            a,
            b,
            role_a_to_b: role_a_to_b.into(),
            role_b_to_a: role_b_to_a.into(),
        }
    }
}

/// A fully planned household, ready for the persistence collaborators
///
/// Constructed once per engine invocation from an immutable list of
/// role-tagged persons; member 0 is the head of household. The engine never
/// mutates a `Person` it was given and holds no state across invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseholdPlan {
    /// Ordered members, head first
    pub members: Vec<Person>,

    /// The six canonical household names
    pub names: CanonicalNameSet,

    /// Every pairwise relationship to persist, by member index
    pub edges: Vec<RelationshipEdge>,
}

impl HouseholdPlan {
    /// The head of household (member 0), if any members exist
    pub fn head(&self) -> Option<&Person> {
        self.members.first()
    }

    /// Members after the head, in plan order
    pub fn other_members(&self) -> &[Person] {
        if self.members.is_empty() {
            &[]
        } else {
            &self.members[1..]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> CanonicalNameSet {
        CanonicalNameSet::new("a", "b", "c", "d", "e", "f")
    }

    #[test]
    fn test_head_and_other_members() {
        let head = Person::new("John", "Smith", "husband").unwrap();
        let second = Person::new("Jane", "Smith", "wife").unwrap();
        let plan = HouseholdPlan {
            members: vec![head.clone(), second.clone()],
            names: names(),
            edges: vec![RelationshipEdge::new(0, 1, "husband", "wife")],
        };

        assert_eq!(plan.head(), Some(&head));
        assert_eq!(plan.other_members(), &[second]);
    }

    #[test]
    fn test_empty_plan_has_no_head() {
        let plan = HouseholdPlan {
            members: Vec::new(),
            names: names(),
            edges: Vec::new(),
        };

        assert!(plan.head().is_none());
        assert!(plan.other_members().is_empty());
    }
}
