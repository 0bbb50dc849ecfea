//! Error types for team storage, catalog access and synchronization

use thiserror::Error;

use crate::models::TeamId;

/// Failure talking to a team store backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// The addressed team does not exist in the store
    #[error("team not found: {0}")]
    NotFound(TeamId),

    /// Transport level failure (connect, timeout, TLS)
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("store returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored document could not be decoded into a team
    #[error("malformed team document: {0}")]
    Malformed(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("lock error: {0}")]
    Lock(String),
}

/// Failure talking to the catalog source
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
    },
}

/// Failure of a synchronizer operation.
///
/// Validation failures are not errors; they surface as
/// [`Outcome::Skipped`](crate::sync::Outcome::Skipped).
#[derive(Error, Debug)]
pub enum SyncError {
    /// The write or the refresh that follows it failed.
    /// Local state is left as it was before the call.
    #[error("team store unavailable during {operation}: {source}")]
    StoreUnavailable {
        /// Store call that failed (`create`, `update`, `delete`, `refresh`)
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

impl SyncError {
    pub(crate) fn store(operation: &'static str, source: StoreError) -> Self {
        Self::StoreUnavailable { operation, source }
    }
}

/// Invalid or unreadable configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    /// Firestore backend selected without a project id
    #[error("firestore store requires FIRESTORE_PROJECT_ID")]
    MissingProjectId,
}
