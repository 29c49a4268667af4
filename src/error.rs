/// Unified error types for the profile subsystem
use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Local profile document absent (recoverable: "no profile yet")
    #[error("Profile not found")]
    NotFound,

    /// Identity resolution failed or returned nothing
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// Content fetch failed or returned zero bytes
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Fetched bytes do not decode as a profile document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Profile violates a field constraint
    #[error("Validation error: {0}")]
    Validation(String),

    /// Cached pointer record no longer decodes
    #[error("Malformed pointer record: {0}")]
    MalformedRecord(String),

    /// Datastore errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for profile operations
pub type ProfileResult<T> = Result<T, ProfileError>;
