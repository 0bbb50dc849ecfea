//! # HTTP API
//!
//! Thin JSON layer over the [`TeamSynchronizer`]. Handlers translate
//! requests into intents and intent results into status codes:
//!
//! - applied → `200` with `success: true`
//! - skipped → `200` with `success: false` and the skip reason
//!   (`404` when the team does not exist)
//! - store failure → `502 Bad Gateway`

pub mod catalog;
pub mod teams;

use axum::{http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use teambuilder_core::{
    BuilderState, CatalogEntry, CatalogSource, Member, Outcome, SkipReason, SyncError, Team,
    TeamStats, TeamSynchronizer,
};
use utoipa::ToSchema;

/// Shared application state
pub struct AppState {
    pub sync: TeamSynchronizer,
    pub catalog: Arc<dyn CatalogSource>,
    pub catalog_limit: u32,
}

pub type SharedState = Arc<AppState>;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse>);

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    /// Set when the intent was skipped without a store write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            skipped: None,
        }
    }

    pub fn skipped(reason: SkipReason) -> Self {
        let code = serde_json::to_value(reason)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string));
        Self {
            success: false,
            message: reason.to_string(),
            skipped: code,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            skipped: None,
        }
    }
}

/// Map a store failure to `502 Bad Gateway`
pub fn store_failure(err: SyncError) -> ApiError {
    (StatusCode::BAD_GATEWAY, Json(ApiResponse::failed(err.to_string())))
}

pub fn not_found(message: impl Into<String>) -> ApiError {
    (StatusCode::NOT_FOUND, Json(ApiResponse::failed(message)))
}

/// Turn an intent result into a response
pub fn respond<T>(
    result: Result<Outcome<T>, SyncError>,
    applied: impl FnOnce(T) -> ApiResponse,
) -> Result<Json<ApiResponse>, ApiError> {
    match result.map_err(store_failure)? {
        Outcome::Applied(value) => Ok(Json(applied(value))),
        Outcome::Skipped(SkipReason::UnknownTeam) => {
            Err(not_found(SkipReason::UnknownTeam.to_string()))
        }
        Outcome::Skipped(reason) => Ok(Json(ApiResponse::skipped(reason))),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberView {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub image: Option<String>,
    pub base_experience: u32,
}

impl From<&Member> for MemberView {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            type_: member.type_.clone(),
            image: member.image.clone(),
            base_experience: member.base_experience,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeamView {
    pub id: String,
    pub name: String,
    pub pokemons: Vec<MemberView>,
}

impl From<&Team> for TeamView {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id.to_string(),
            name: team.name.clone(),
            pokemons: team.pokemons.iter().map(MemberView::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsView {
    pub size: usize,
    pub capacity: usize,
    pub types_covered: Vec<String>,
    pub average_base_experience: u32,
}

impl From<TeamStats> for StatsView {
    fn from(stats: TeamStats) -> Self {
        Self {
            size: stats.size,
            capacity: stats.capacity,
            types_covered: stats.types_covered,
            average_base_experience: stats.average_base_experience,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StateView {
    pub teams: Vec<TeamView>,
    pub active_team_id: Option<String>,
    pub active_stats: StatsView,
    /// True while any mutation is in flight
    pub loading: bool,
    pub query: String,
    pub catalog_size: usize,
}

impl From<&BuilderState> for StateView {
    fn from(state: &BuilderState) -> Self {
        Self {
            teams: state.teams.iter().map(TeamView::from).collect(),
            active_team_id: state.active_team_id.as_ref().map(|id| id.to_string()),
            active_stats: state.active_stats().into(),
            loading: state.is_loading(),
            query: state.query.clone(),
            catalog_size: state.catalog.len(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogItem {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub image: Option<String>,
    pub base_experience: u32,
    /// `available`, `in_team` or `team_full` with respect to the active team
    pub availability: String,
}

impl CatalogItem {
    pub fn new(entry: &CatalogEntry, state: &BuilderState) -> Self {
        let availability = state.availability_of(&entry.name);
        Self {
            name: entry.name.clone(),
            type_: entry.type_.clone(),
            image: entry.image.clone(),
            base_experience: entry.base_experience,
            availability: serde_json::to_value(availability)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default(),
        }
    }
}
