//! # Builder State
//!
//! The whole client-side state of the team builder, and the only way to
//! change it: [`BuilderState::apply`]. Teams held here are a cache of the
//! store, replaced wholesale on every refresh.

use serde::{Deserialize, Serialize};

use crate::catalog::filter_entries;
use crate::models::{Availability, CatalogEntry, Team, TeamId};
use crate::stats::TeamStats;

/// Which team should be active after a refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Keep the current selection (falls back to the first team if it vanished)
    Keep,
    /// Select a specific team, e.g. one just created
    Select(TeamId),
    /// Select the first team in store order, or none
    FirstRemaining,
}

/// State transitions
#[derive(Debug, Clone)]
pub enum Action {
    /// Initial team load; selects the first team
    TeamsLoaded(Vec<Team>),
    /// Full list re-read after a write
    Resynced { teams: Vec<Team>, selection: Selection },
    /// User picked a team
    TeamSelected(TeamId),
    CatalogLoaded(Vec<CatalogEntry>),
    QueryChanged(String),
    MutationStarted,
    MutationFinished,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuilderState {
    pub teams: Vec<Team>,
    pub active_team_id: Option<TeamId>,
    pub catalog: Vec<CatalogEntry>,
    pub query: String,
    /// Mutations currently in flight
    pub pending_mutations: usize,
}

impl BuilderState {
    /// Apply one transition
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::TeamsLoaded(teams) => {
                self.active_team_id = teams.first().map(|t| t.id.clone());
                self.teams = teams;
            }
            Action::Resynced { teams, selection } => {
                self.teams = teams;
                self.active_team_id = match selection {
                    Selection::Select(id) => Some(id),
                    Selection::FirstRemaining => self.first_team_id(),
                    Selection::Keep => match self.active_team_id.take() {
                        Some(id) if self.team(&id).is_some() => Some(id),
                        _ => self.first_team_id(),
                    },
                };
            }
            Action::TeamSelected(id) => {
                if self.team(&id).is_some() {
                    self.active_team_id = Some(id);
                }
            }
            Action::CatalogLoaded(entries) => self.catalog = entries,
            Action::QueryChanged(query) => self.query = query,
            Action::MutationStarted => self.pending_mutations += 1,
            Action::MutationFinished => {
                self.pending_mutations = self.pending_mutations.saturating_sub(1)
            }
        }
    }

    fn first_team_id(&self) -> Option<TeamId> {
        self.teams.first().map(|t| t.id.clone())
    }

    pub fn team(&self, id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| &t.id == id)
    }

    pub fn active_team(&self) -> Option<&Team> {
        self.active_team_id.as_ref().and_then(|id| self.team(id))
    }

    /// Statistics of the active team (empty stats when none is active)
    pub fn active_stats(&self) -> TeamStats {
        let members = self
            .active_team()
            .map(|t| t.pokemons.as_slice())
            .unwrap_or_default();
        TeamStats::of(members)
    }

    pub fn is_loading(&self) -> bool {
        self.pending_mutations > 0
    }

    /// Catalog entries matching the current query
    pub fn filtered_catalog(&self) -> Vec<&CatalogEntry> {
        filter_entries(&self.catalog, &self.query)
    }

    /// Availability of a catalog entry with respect to the active team
    pub fn availability_of(&self, name: &str) -> Availability {
        self.active_team()
            .map(|t| t.availability_of(name))
            .unwrap_or_default()
    }
}
