//! Hearth Domain Layer
//!
//! This crate contains the core household/family model for Hearth.
//! It has ZERO external dependencies and defines the fundamental
//! concepts, value objects, and trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Person**: a role-tagged household participant (possibly matched to a
//!   directory record)
//! - **RoleCategory**: the semantic family of a declared role
//!   (spouse / parent / child / sibling / unknown)
//! - **CanonicalNameSet**: the six household name strings, produced atomically
//! - **RelationshipEdge**: one bidirectional relationship between two members
//! - **HouseholdPlan**: names + ordered members + edge list, ready to persist
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - No external crate dependencies
//! - Pure business logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod directory;
pub mod household;
pub mod names;
pub mod person;
pub mod role;
pub mod traits;

// Re-exports for convenience
pub use directory::{Constituent, HouseholdRecord, RelationshipOutcome, RelationshipRecord};
pub use household::{HouseholdPlan, RelationshipEdge};
pub use names::CanonicalNameSet;
pub use person::Person;
pub use role::RoleCategory;
