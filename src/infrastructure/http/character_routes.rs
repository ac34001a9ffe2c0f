//! Character API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Redirect,
    Json,
};
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;

use super::{authorize, parse_body, parse_identifier, render, service_error, ApiError};
use crate::application::pipeline::{to_json, to_json_collection};
use crate::application::ports::outbound::Action;
use crate::application::services::CharacterService;
use crate::domain::value_objects::CharacterAttribute;
use crate::infrastructure::state::AppState;

pub async fn redirect_to_index() -> Redirect {
    Redirect::to("/character/index")
}

/// List all characters
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, Action::CharacterIndex, None)?;

    let characters = state
        .character_service
        .list_characters()
        .await
        .map_err(service_error)?;

    render(to_json_collection(&characters))
}

/// Get a character by identifier
pub async fn get_character(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let identifier = parse_identifier(&identifier)?;
    authorize(&state, Action::CharacterDisplay, Some(&identifier))?;

    let character = state
        .character_service
        .get_character(&identifier)
        .await
        .map_err(service_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Character not found".to_string()))?;

    render(to_json(&character))
}

/// Create a character from a JSON body
pub async fn create_character(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    authorize(&state, Action::CharacterCreate, None)?;
    let payload = parse_body(&body)?;

    let character = state
        .character_service
        .create_character(payload)
        .await
        .map_err(service_error)?;

    Ok((StatusCode::CREATED, render(to_json(&character))?))
}

/// Apply a partial JSON body to a character
pub async fn modify_character(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
    body: String,
) -> Result<Json<Value>, ApiError> {
    let identifier = parse_identifier(&identifier)?;
    authorize(&state, Action::CharacterModify, Some(&identifier))?;
    let payload = parse_body(&body)?;

    let character = state
        .character_service
        .modify_character(&identifier, payload)
        .await
        .map_err(service_error)?;

    render(to_json(&character))
}

/// Delete a character
pub async fn delete_character(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let identifier = parse_identifier(&identifier)?;
    authorize(&state, Action::CharacterDelete, Some(&identifier))?;

    state
        .character_service
        .delete_character(&identifier)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({ "delete": true })))
}

pub async fn list_by_intelligence(
    State(state): State<Arc<AppState>>,
    Path(value): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let value = parse_digits(&value, STAT_DIGITS)?;
    authorize(&state, Action::CharacterIntelligence, None)?;
    list_by(&state, CharacterAttribute::Intelligence(value)).await
}

pub async fn list_by_life(
    State(state): State<Arc<AppState>>,
    Path(value): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let value = parse_digits(&value, STAT_DIGITS)?;
    authorize(&state, Action::CharacterLife, None)?;
    list_by(&state, CharacterAttribute::Life(value)).await
}

pub async fn list_by_caste(
    State(state): State<Arc<AppState>>,
    Path(caste): Path<String>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, Action::CharacterCaste, None)?;
    list_by(&state, CharacterAttribute::Caste(caste)).await
}

pub async fn list_by_knowledge(
    State(state): State<Arc<AppState>>,
    Path(knowledge): Path<String>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, Action::CharacterKnowledge, None)?;
    list_by(&state, CharacterAttribute::Knowledge(knowledge)).await
}

async fn list_by(state: &AppState, attribute: CharacterAttribute) -> Result<Json<Value>, ApiError> {
    let characters = state
        .character_service
        .list_characters_by(attribute)
        .await
        .map_err(service_error)?;

    render(to_json_collection(&characters))
}

/// Up to `number` image paths across every kind
pub async fn list_images(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let number = parse_digits(&number, IMAGE_COUNT_DIGITS)?;
    authorize(&state, Action::CharacterIndex, None)?;
    images(&state, number, None).await
}

/// Up to `number` image paths for one character kind
pub async fn list_images_of_kind(
    State(state): State<Arc<AppState>>,
    Path((kind, number)): Path<(String, String)>,
) -> Result<Json<Vec<String>>, ApiError> {
    let number = parse_digits(&number, IMAGE_COUNT_DIGITS)?;
    authorize(&state, Action::CharacterIndex, None)?;
    images(&state, number, Some(kind)).await
}

async fn images(
    state: &AppState,
    number: usize,
    kind: Option<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let images = state
        .character_service
        .list_images(number, kind)
        .await
        .map_err(service_error)?;

    Ok(Json(images))
}

const STAT_DIGITS: usize = 3;
const IMAGE_COUNT_DIGITS: usize = 2;

/// Numeric path segments match one to `max_digits` digits; anything else is no route
fn parse_digits<T: FromStr>(raw: &str, max_digits: usize) -> Result<T, ApiError> {
    let not_found = || (StatusCode::NOT_FOUND, format!("No route for value {raw}"));
    if raw.is_empty() || raw.len() > max_digits || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_found());
    }
    raw.parse().map_err(|_| not_found())
}
