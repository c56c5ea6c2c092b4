//! Head-of-household ordering for a pair of adults

use hearth_domain::Person;

/// Roles that place a person first in the household
///
/// A male spouse or an explicit parent role precedes an unclassified or
/// blank one. "wife" is deliberately absent: a wife paired with a husband
/// keeps the input order, and paired with a blank role she stays where the
/// caller put her.
pub const HEAD_ELIGIBLE_ROLES: [&str; 5] = ["husband", "father", "mother", "dad", "mom"];

/// True if the role makes its holder eligible to lead the member list
pub fn is_head_eligible(role: &str) -> bool {
    HEAD_ELIGIBLE_ROLES.contains(&role.trim().to_lowercase().as_str())
}

/// Decide which adult is head of household
///
/// Swaps the pair only when the second adult's role is head-eligible and the
/// first adult's is not; otherwise the input order is preserved. Children
/// are never reordered.
///
/// # Examples
///
/// ```
/// use hearth_domain::Person;
/// use hearth_engine::order_adults;
///
/// let wife = Person::new("Jane", "Smith", "wife").unwrap();
/// let husband = Person::new("John", "Smith", "husband").unwrap();
/// let (head, second) = order_adults(wife, husband);
/// assert_eq!(head.first_name, "John");
/// assert_eq!(second.first_name, "Jane");
/// ```
pub fn order_adults(first: Person, second: Person) -> (Person, Person) {
    if is_head_eligible(&second.declared_role) && !is_head_eligible(&first.declared_role) {
        (second, first)
    } else {
        (first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(first: &str, role: &str) -> Person {
        Person::new(first, "Smith", role).unwrap()
    }

    #[test]
    fn test_husband_moves_ahead_of_wife() {
        let (head, second) = order_adults(person("Jane", "wife"), person("John", "husband"));
        assert_eq!(head.first_name, "John");
        assert_eq!(second.first_name, "Jane");
    }

    #[test]
    fn test_head_eligible_first_is_preserved() {
        let (head, second) = order_adults(person("John", "husband"), person("Jane", "wife"));
        assert_eq!(head.first_name, "John");
        assert_eq!(second.first_name, "Jane");
    }

    #[test]
    fn test_two_parents_keep_input_order() {
        let (head, second) = order_adults(person("Maria", "mother"), person("Luis", "father"));
        assert_eq!(head.first_name, "Maria");
        assert_eq!(second.first_name, "Luis");
    }

    #[test]
    fn test_parent_moves_ahead_of_blank_role() {
        let (head, second) = order_adults(person("Alex", ""), person("Maria", "mother"));
        assert_eq!(head.first_name, "Maria");
        assert_eq!(second.first_name, "Alex");
    }

    #[test]
    fn test_blank_pair_keeps_input_order() {
        let (head, second) = order_adults(person("Alex", ""), person("Sam", ""));
        assert_eq!(head.first_name, "Alex");
        assert_eq!(second.first_name, "Sam");
    }

    #[test]
    fn test_is_head_eligible_normalizes() {
        assert!(is_head_eligible(" Dad "));
        assert!(is_head_eligible("MOM"));
        assert!(!is_head_eligible("wife"));
        assert!(!is_head_eligible("daughter"));
        assert!(!is_head_eligible(""));
    }
}
