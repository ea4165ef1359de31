//! Error types shared across the Holocron crates.

use thiserror::Error;

/// Result type alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Storage-level failures, reported without driver detail.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("{0}")]
    Internal(String),
}

/// Failures while fetching one collection from the upstream catalog.
///
/// Single attempt per call, no retries; every variant aborts a running sync.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("Upstream request failed: {0}")]
    Unavailable(String),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned HTTP {0}")]
    Status(u16),

    /// Payload did not decode as the expected collection.
    #[error("Upstream payload malformed: {0}")]
    Malformed(String),
}

/// Top-level application error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The single externally visible failure kind for a synchronization run.
    /// The concrete cause is logged by the orchestrator and never forwarded.
    #[error("Catalog synchronization failed")]
    SyncFailed,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Unexpected(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}
