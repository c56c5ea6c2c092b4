//! Error types for registrar flows

use thiserror::Error;

/// Errors that can occur while orchestrating household flows
#[derive(Error, Debug)]
pub enum RegistrarError {
    /// Directory lookup error
    #[error("Directory lookup failed: {0}")]
    Lookup(String),

    /// Directory write error
    #[error("Directory write failed: {0}")]
    Store(String),

    /// A person who must already exist has no directory record
    #[error("No directory record found for {0}")]
    PersonNotFound(String),

    /// A referenced household does not exist
    #[error("Household {0} not found")]
    HouseholdNotFound(i64),

    /// The person is not a member of any household
    #[error("{0} does not belong to a household")]
    NotInHousehold(String),

    /// The directory accepted an attachment but the record is unchanged
    #[error("Attachment of {0} was not confirmed by the directory")]
    AttachmentNotConfirmed(String),

    /// Caller-supplied input failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
