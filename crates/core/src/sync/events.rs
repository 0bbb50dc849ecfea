//! # Sync Events
//!
//! Published after every state transition that the presentation layer
//! should re-render from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Team, TeamId};

/// Kind of sync event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyncEventKind {
    /// Teams loaded for the first time
    TeamsLoaded,
    /// Teams re-read after a write
    TeamsRefreshed,
    /// Active selection changed without a store call
    SelectionChanged,
    CatalogLoaded,
    /// A store call failed; local state unchanged
    StoreFailed,
}

/// An event carrying the refreshed team list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: SyncEventKind,
    /// Operation that triggered the event (`create_team`, `add_member`, ...)
    pub operation: String,
    pub teams: Vec<Team>,
    pub active_team_id: Option<TeamId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SyncEvent {
    pub fn new(kind: SyncEventKind, operation: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            operation: operation.to_string(),
            teams: Vec::new(),
            active_team_id: None,
            error: None,
        }
    }

    /// Attach the team list and selection the event reflects
    pub fn with_teams(mut self, teams: &[Team], active_team_id: Option<&TeamId>) -> Self {
        self.teams = teams.to_vec();
        self.active_team_id = active_team_id.cloned();
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }
}
