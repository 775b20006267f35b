// crates/instdir-core/src/error.rs
use thiserror::Error;

/// Errors produced while loading, building or querying the directory.
///
/// Ignorable query input (non-numeric rank bounds, unknown ordering fields)
/// never ends up here; it is dropped while the query is compiled.
#[derive(Debug, Error)]
pub enum DirError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary dataset error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A dataset file could not be located.
    #[error("not found: {0}")]
    NotFound(String),

    /// Detail lookup for an identity that does not exist.
    #[error("institution not found: {0}")]
    InstitutionNotFound(String),

    /// The underlying store failed to answer a read.
    #[error("store unavailable: {0}")]
    Store(String),
}

impl DirError {
    /// True for the "unknown identity" outcome, as opposed to a server-side failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DirError::InstitutionNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, DirError>;
