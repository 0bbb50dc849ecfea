//! # Team Store
//!
//! The authoritative copy of every team lives behind [`TeamStore`]. The
//! synchronizer only ever talks to this trait.
//!
//! ## Backends
//!
//! ```text
//!                 TeamStore
//!                     ↓
//!   FirestoreTeamStore | SqliteTeamStore | InMemoryTeamStore
//!   (REST documents)     (local file)      (process memory)
//! ```

pub mod firestore;
pub mod firestore_value;
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::error::{ConfigError, StoreError};
use crate::models::{NewTeam, Team, TeamId, TeamPatch};

pub use firestore::{FirestoreConfig, FirestoreTeamStore};
pub use memory::InMemoryTeamStore;
pub use sqlite::SqliteTeamStore;

/// Document collection holding team records
pub const TEAMS_COLLECTION: &str = "teams";

/// Create / update / delete / list-all access to team documents.
///
/// No locking, transactions or version checks: last writer wins.
#[async_trait]
pub trait TeamStore: Send + Sync {
    /// Insert a team and return the id the store assigned to it
    async fn create(&self, team: &NewTeam) -> Result<TeamId, StoreError>;

    /// Write only the fields present in `patch`
    async fn update(&self, id: &TeamId, patch: &TeamPatch) -> Result<(), StoreError>;

    async fn delete(&self, id: &TeamId) -> Result<(), StoreError>;

    /// Every team, in the store's list order
    async fn list_all(&self) -> Result<Vec<Team>, StoreError>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// Build the store selected by the configuration
pub fn open_store(config: &AppConfig) -> Result<Arc<dyn TeamStore>, ConfigError> {
    let store: Arc<dyn TeamStore> = match &config.store {
        StoreBackend::Memory => Arc::new(InMemoryTeamStore::new()),
        StoreBackend::Sqlite { path } => {
            let store = SqliteTeamStore::open_at(path).map_err(|e| ConfigError::InvalidValue {
                key: "TEAMBUILDER_SQLITE_PATH",
                value: format!("{} ({})", path, e),
            })?;
            Arc::new(store)
        }
        StoreBackend::Firestore(firestore) => {
            let store = FirestoreTeamStore::new(firestore.clone(), config.http_timeout()).map_err(
                |e| ConfigError::InvalidValue {
                    key: "FIRESTORE_PROJECT_ID",
                    value: format!("{} ({})", firestore.project_id, e),
                },
            )?;
            Arc::new(store)
        }
    };

    tracing::info!(backend = store.backend_name(), "Team store opened");
    Ok(store)
}
