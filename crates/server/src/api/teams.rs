//! # Teams API
//!
//! Team lifecycle, membership and selection.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use teambuilder_core::{TeamId, TeamStats};
use utoipa::ToSchema;

use super::{
    not_found, respond, store_failure, ApiError, ApiResponse, SharedState, StateView, StatsView,
    TeamView,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTeamRequest {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateTeamResponse {
    pub success: bool,
    pub message: String,
    pub team_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RenameTeamRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddMemberRequest {
    /// Catalog entry name
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectTeamRequest {
    pub team_id: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

pub fn team_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_teams).post(create_team))
        .route("/:id", patch(rename_team).delete(delete_team))
        .route("/:id/members", post(add_member))
        .route("/:id/members/:name", delete(remove_member))
        .route("/:id/stats", get(team_stats))
}

/// Current builder state
#[utoipa::path(
    get,
    path = "/api/v1/state",
    tag = "teams",
    responses(
        (status = 200, description = "Teams, active team and its stats", body = StateView)
    )
)]
pub async fn get_state(State(state): State<SharedState>) -> Json<StateView> {
    let snapshot = state.sync.snapshot().await;
    Json(StateView::from(&snapshot))
}

/// List teams, re-read from the store
#[utoipa::path(
    get,
    path = "/api/v1/teams",
    tag = "teams",
    responses(
        (status = 200, description = "All teams in store order", body = Vec<TeamView>),
        (status = 502, description = "Team store unavailable", body = ApiResponse)
    )
)]
pub async fn list_teams(State(state): State<SharedState>) -> Result<Json<Vec<TeamView>>, ApiError> {
    let teams = state.sync.resync().await.map_err(store_failure)?;
    Ok(Json(teams.iter().map(TeamView::from).collect()))
}

/// Create an empty team and make it active
#[utoipa::path(
    post,
    path = "/api/v1/teams",
    tag = "teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 200, description = "Team created or skipped", body = CreateTeamResponse),
        (status = 502, description = "Team store unavailable", body = ApiResponse)
    )
)]
pub async fn create_team(
    State(state): State<SharedState>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Json<CreateTeamResponse>, ApiError> {
    let outcome = state
        .sync
        .create_team(&req.name)
        .await
        .map_err(store_failure)?;
    let skip = outcome.skip_reason();
    let response = match outcome.applied() {
        Some(id) => CreateTeamResponse {
            success: true,
            message: format!("Team {} created", req.name.trim()),
            team_id: Some(id.to_string()),
        },
        None => CreateTeamResponse {
            success: false,
            message: skip.map(|r| r.to_string()).unwrap_or_default(),
            team_id: None,
        },
    };
    Ok(Json(response))
}

/// Rename a team
#[utoipa::path(
    patch,
    path = "/api/v1/teams/{id}",
    tag = "teams",
    params(("id" = String, Path, description = "Team ID")),
    request_body = RenameTeamRequest,
    responses(
        (status = 200, description = "Team renamed or skipped", body = ApiResponse),
        (status = 404, description = "No such team", body = ApiResponse),
        (status = 502, description = "Team store unavailable", body = ApiResponse)
    )
)]
pub async fn rename_team(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<RenameTeamRequest>,
) -> Result<Json<ApiResponse>, ApiError> {
    let id = TeamId::new(id);
    let result = state.sync.rename_team(&id, &req.name).await;
    respond(result, |_| ApiResponse::ok(format!("Team {} renamed", id)))
}

/// Delete a team. Requires `?confirm=true`.
#[utoipa::path(
    delete,
    path = "/api/v1/teams/{id}",
    tag = "teams",
    params(
        ("id" = String, Path, description = "Team ID"),
        ("confirm" = bool, Query, description = "Must be true to delete")
    ),
    responses(
        (status = 200, description = "Team deleted", body = ApiResponse),
        (status = 400, description = "Deletion not confirmed", body = ApiResponse),
        (status = 404, description = "No such team", body = ApiResponse),
        (status = 502, description = "Team store unavailable", body = ApiResponse)
    )
)]
pub async fn delete_team(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<ApiResponse>, ApiError> {
    if !params.confirm {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::failed("Deleting a team requires confirm=true")),
        ));
    }
    let id = TeamId::new(id);
    let result = state.sync.delete_team(&id).await;
    respond(result, |_| ApiResponse::ok(format!("Team {} deleted", id)))
}

/// Add a catalog entry to a team
#[utoipa::path(
    post,
    path = "/api/v1/teams/{id}/members",
    tag = "teams",
    params(("id" = String, Path, description = "Team ID")),
    request_body = AddMemberRequest,
    responses(
        (status = 200, description = "Member added or skipped", body = ApiResponse),
        (status = 404, description = "No such team or catalog entry", body = ApiResponse),
        (status = 502, description = "Team store unavailable", body = ApiResponse)
    )
)]
pub async fn add_member(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<AddMemberRequest>,
) -> Result<Json<ApiResponse>, ApiError> {
    let entry = state
        .sync
        .catalog_entry(&req.name)
        .await
        .ok_or_else(|| not_found(format!("{} is not in the catalog", req.name)))?;

    let id = TeamId::new(id);
    let result = state.sync.add_member(&id, entry.to_member()).await;
    respond(result, |_| ApiResponse::ok(format!("{} added", entry.name)))
}

/// Remove a member from a team by name
#[utoipa::path(
    delete,
    path = "/api/v1/teams/{id}/members/{name}",
    tag = "teams",
    params(
        ("id" = String, Path, description = "Team ID"),
        ("name" = String, Path, description = "Member name")
    ),
    responses(
        (status = 200, description = "Member removed", body = ApiResponse),
        (status = 404, description = "No such team", body = ApiResponse),
        (status = 502, description = "Team store unavailable", body = ApiResponse)
    )
)]
pub async fn remove_member(
    State(state): State<SharedState>,
    Path((id, name)): Path<(String, String)>,
) -> Result<Json<ApiResponse>, ApiError> {
    let id = TeamId::new(id);
    let result = state.sync.remove_member(&id, &name).await;
    respond(result, |_| ApiResponse::ok(format!("{} removed", name)))
}

/// Statistics of one team
#[utoipa::path(
    get,
    path = "/api/v1/teams/{id}/stats",
    tag = "teams",
    params(("id" = String, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team statistics", body = StatsView),
        (status = 404, description = "No such team", body = ApiResponse)
    )
)]
pub async fn team_stats(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<StatsView>, ApiError> {
    let snapshot = state.sync.snapshot().await;
    let team = snapshot
        .team(&TeamId::new(id.as_str()))
        .ok_or_else(|| not_found(format!("Team {} not found", id)))?;
    Ok(Json(TeamStats::of(&team.pokemons).into()))
}

/// Make a team the active one
#[utoipa::path(
    put,
    path = "/api/v1/active",
    tag = "teams",
    request_body = SelectTeamRequest,
    responses(
        (status = 200, description = "Active team changed", body = ApiResponse),
        (status = 404, description = "No such team", body = ApiResponse)
    )
)]
pub async fn select_team(
    State(state): State<SharedState>,
    Json(req): Json<SelectTeamRequest>,
) -> Result<Json<ApiResponse>, ApiError> {
    let id = TeamId::new(req.team_id);
    let outcome = state.sync.select_team(&id).await;
    respond(Ok(outcome), |_| ApiResponse::ok(format!("Team {} selected", id)))
}
