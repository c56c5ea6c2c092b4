//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates. All three ports are
//! async because every production implementation talks to a remote directory
//! over HTTP; the engine itself never calls them.

use crate::directory::{Constituent, HouseholdRecord, RelationshipOutcome, RelationshipRecord};
use crate::names::CanonicalNameSet;
use crate::person::Person;

/// Trait for resolving people and households against the remote directory
///
/// Implemented by the infrastructure layer (hearth-bloomerang)
pub trait ConstituentLookup {
    /// Error type for lookup operations
    type Error;

    /// Find one constituent by name: exact case-insensitive match preferred,
    /// otherwise the first search result
    fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Constituent>, Self::Error>>;

    /// All exact case-insensitive name matches, for duplicate warnings
    fn matches_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Constituent>, Self::Error>>;

    /// Find one constituent by exact account number (a leading `#` is ignored)
    fn find_by_account_number(
        &self,
        account_number: &str,
    ) -> impl std::future::Future<Output = Result<Option<Constituent>, Self::Error>>;

    /// Fetch a constituent by id
    fn constituent(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Constituent>, Self::Error>>;

    /// Fetch a household by id
    fn household(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<HouseholdRecord>, Self::Error>>;
}

/// Trait for reading a constituent's recorded relationships
///
/// Implemented by the infrastructure layer (hearth-bloomerang)
pub trait RelationshipHistory {
    /// Error type for history operations
    type Error;

    /// Every relationship on file for the given constituent
    fn relationships(
        &self,
        constituent_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<RelationshipRecord>, Self::Error>>;
}

/// Trait for persisting households and relationships
///
/// Implemented by the infrastructure layer (hearth-bloomerang)
pub trait HouseholdStore {
    /// Error type for store operations
    type Error;

    /// Create a household with the given names, head, and further members;
    /// members without an id are created as new constituents
    fn create_household(
        &self,
        names: &CanonicalNameSet,
        head: &Person,
        members: &[Person],
    ) -> impl std::future::Future<Output = Result<HouseholdRecord, Self::Error>>;

    /// Replace a household's names while preserving the given roster
    fn update_household(
        &self,
        household_id: i64,
        names: &CanonicalNameSet,
        head: &Constituent,
        members: &[Constituent],
    ) -> impl std::future::Future<Output = Result<(), Self::Error>>;

    /// Attach an existing constituent to a household
    fn attach_to_household(
        &self,
        household_id: i64,
        member: &Constituent,
    ) -> impl std::future::Future<Output = Result<(), Self::Error>>;

    /// Submit one bidirectional relationship between two constituents
    fn create_relationship(
        &self,
        account_id_1: i64,
        account_id_2: i64,
        role_1: &str,
        role_2: &str,
    ) -> impl std::future::Future<Output = Result<RelationshipOutcome, Self::Error>>;
}
