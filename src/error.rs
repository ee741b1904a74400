//! Error types for the field synchronization subsystem.

use thiserror::Error;

/// Host template store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("template rejected by structural rules: {0}")]
    Validation(String),

    #[error("host store unavailable: {0}")]
    Unavailable(String),

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("template JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Field synchronization errors
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("no sync group with base name '{0}'")]
    UnknownGroup(String),

    #[error("a propagation is already in flight")]
    PropagationInFlight,

    #[error("registry is not attached to a template store")]
    Unattached,

    #[error("candidate template rejected: {reason}")]
    CandidateRejected { reason: String },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration and logging bootstrap errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    #[error("configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
}
