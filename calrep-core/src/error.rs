//! Error types for the calrep ecosystem.

use thiserror::Error;

/// Errors that can occur in calrep operations.
///
/// Per-event placement failures are not errors: they flow through
/// [`crate::unplaced::UnplacedEntry`] values in the allocation result.
#[derive(Error, Debug)]
pub enum ReplicaError {
    /// A calendar failed its structural precondition check.
    #[error("Invalid calendar '{name}': {reason}")]
    InvalidCalendar { name: String, reason: String },

    /// Source data is inconsistent (e.g. professor events exist but the
    /// source workable space is empty).
    #[error("Inconsistent source data: {0}")]
    Inconsistent(String),

    /// A replication run violated an internal invariant. The run is aborted
    /// and no calendar state has been touched.
    #[error("Internal consistency violation: {0}")]
    Invariant(String),

    /// No unplaced entry with the given id exists in the store.
    #[error("No unplaced entry with id '{0}'")]
    UnknownEntry(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for calrep operations.
pub type ReplicaResult<T> = Result<T, ReplicaError>;
