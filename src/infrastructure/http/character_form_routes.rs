//! Character form submissions
//!
//! Form fields arrive as strings; the hydrator coerces them like any other
//! payload. Every successful submission answers with a 303 redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Form,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use super::{authorize, parse_identifier, service_error, ApiError};
use crate::application::ports::outbound::Action;
use crate::application::services::CharacterService;
use crate::infrastructure::state::AppState;

fn form_payload(fields: HashMap<String, String>) -> Value {
    Value::Object(
        fields
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect::<Map<_, _>>(),
    )
}

pub async fn submit_new(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, ApiError> {
    authorize(&state, Action::CharacterCreate, None)?;

    let character = state
        .character_service
        .create_character(form_payload(fields))
        .await
        .map_err(service_error)?;

    Ok(Redirect::to(&format!(
        "/character/display/{}",
        character.identifier
    )))
}

pub async fn submit_edit(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, ApiError> {
    let identifier = parse_identifier(&identifier)?;
    authorize(&state, Action::CharacterModify, Some(&identifier))?;

    state
        .character_service
        .modify_character(&identifier, form_payload(fields))
        .await
        .map_err(service_error)?;

    Ok(Redirect::to(&format!("/character/display/{identifier}")))
}

pub async fn submit_delete(
    State(state): State<Arc<AppState>>,
    Path(identifier): Path<String>,
) -> Result<Redirect, ApiError> {
    let identifier = parse_identifier(&identifier)?;
    authorize(&state, Action::CharacterDelete, Some(&identifier))?;

    state
        .character_service
        .delete_character(&identifier)
        .await
        .map_err(service_error)?;

    Ok(Redirect::to("/character/index"))
}
