//! # Team Synchronization
//!
//! Keeps the local [`BuilderState`] consistent with the team store.
//!
//! Every mutation follows the same protocol:
//!
//! ```text
//! intent → validate against cached state → one store write
//!        → list_all (full re-read) → BuilderState::apply(Resynced)
//! ```
//!
//! Validation failures are silent skips ([`Outcome::Skipped`]), store
//! failures are errors ([`SyncError`](crate::error::SyncError)) that leave
//! local state untouched.

pub mod events;
pub mod state;
pub mod synchronizer;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use events::{SyncEvent, SyncEventKind};
pub use state::{Action, BuilderState, Selection};
pub use synchronizer::TeamSynchronizer;

/// Why an intent was not carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Team name empty after trimming
    EmptyName,
    /// Rename to the name the team already has
    UnchangedName,
    /// No team with that id in local state
    UnknownTeam,
    /// Team already holds six members
    TeamFull,
    /// A member with that name is already on the team
    DuplicateMember,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::EmptyName => "team name is empty",
            Self::UnchangedName => "team already has that name",
            Self::UnknownTeam => "no such team",
            Self::TeamFull => "team is full",
            Self::DuplicateMember => "already in team",
        };
        f.write_str(text)
    }
}

/// Result of an intent that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Written to the store and refreshed
    Applied(T),
    /// Precondition failed; nothing was written
    Skipped(SkipReason),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Skipped(_) => None,
        }
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::Skipped(reason) => Some(*reason),
        }
    }
}
