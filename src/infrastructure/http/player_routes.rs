//! Player API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Redirect,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::{authorize, parse_body, parse_identifier, render, service_error, ApiError};
use crate::application::pipeline::{to_json, to_json_collection};
use crate::application::ports::outbound::Action;
use crate::application::services::PlayerService;
use crate::infrastructure::state::AppState;

pub async fn redirect_to_index() -> Redirect {
    Redirect::to("/player/index")
}

/// List all players
pub async fn list_players(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    authorize(&state, Action::PlayerIndex, None)?;

    let players = state
        .player_service
        .list_players()
        .await
        .map_err(service_error)?;

    render(to_json_collection(&players))
}

/// Get a player by identifier
pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let identifier = parse_identifier(&identifier)?;
    authorize(&state, Action::PlayerDisplay, Some(&identifier))?;

    let player = state
        .player_service
        .get_player(&identifier)
        .await
        .map_err(service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Player not found".to_string()))?;

    render(to_json(&player))
}

/// Create a player
pub async fn create_player(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    authorize(&state, Action::PlayerCreate, None)?;
    let payload = parse_body(&body)?;

    let player = state
        .player_service
        .create_player(payload)
        .await
        .map_err(service_error)?;

    Ok((StatusCode::CREATED, render(to_json(&player))?))
}

/// Update a player
pub async fn modify_player(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
    body: String,
) -> Result<Json<Value>, ApiError> {
    let identifier = parse_identifier(&identifier)?;
    authorize(&state, Action::PlayerModify, Some(&identifier))?;
    let payload = parse_body(&body)?;

    let player = state
        .player_service
        .modify_player(&identifier, payload)
        .await
        .map_err(service_error)?;

    render(to_json(&player))
}

/// Delete a player
pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let identifier = parse_identifier(&identifier)?;
    authorize(&state, Action::PlayerDelete, Some(&identifier))?;

    state
        .player_service
        .delete_player(&identifier)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({ "delete": true })))
}
