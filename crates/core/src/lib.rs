//! # Team Builder Core
//!
//! Team state, its synchronization with a remote document store, and
//! read-only access to the species catalog.
//!
//! ## Architecture
//!
//! - `models` - Teams, members, catalog entries and write patches
//! - `store/` - The `TeamStore` seam and its Firestore, SQLite and memory backends
//! - `catalog/` - The `CatalogSource` seam and the PokeAPI client
//! - `sync/` - `BuilderState`, its reducer, and the `TeamSynchronizer`
//! - `stats` - Derived team statistics
//! - `config` - File and environment configuration
//!
//! ## Usage
//!
//! ```rust,ignore
//! use teambuilder_core::{open_store, AppConfig, Member, TeamSynchronizer};
//!
//! let config = AppConfig::load()?;
//! let sync = TeamSynchronizer::new(open_store(&config)?);
//! sync.load_teams().await?;
//! if let Some(id) = sync.create_team("Kanto").await?.applied() {
//!     sync.add_member(&id, Member::new("pikachu", "electric", 112)).await?;
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod stats;
pub mod store;
pub mod sync;

pub use catalog::{CatalogSource, PokeApiCatalog};
pub use config::AppConfig;
pub use error::{CatalogError, ConfigError, StoreError, SyncError};
pub use models::{
    Availability, CatalogEntry, Member, NewTeam, Team, TeamId, TeamPatch, TEAM_CAPACITY,
};
pub use stats::TeamStats;
pub use store::{open_store, TeamStore};
pub use sync::{BuilderState, Outcome, SkipReason, SyncEvent, SyncEventKind, TeamSynchronizer};
