//! HTTP REST API routes

mod character_form_routes;
mod character_routes;
mod player_routes;

use axum::{
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::application::pipeline::PipelineError;
use crate::application::ports::outbound::{AccessDenied, Action};
use crate::application::services::ServiceError;
use crate::domain::value_objects::Identifier;
use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Character routes
        .route("/character", get(character_routes::redirect_to_index))
        .route("/character/index", get(character_routes::list_characters))
        .route(
            "/character/display/{identifier}",
            get(character_routes::get_character),
        )
        .route("/character/create", post(character_routes::create_character))
        .route(
            "/character/modify/{identifier}",
            put(character_routes::modify_character),
        )
        .route(
            "/character/delete/{identifier}",
            delete(character_routes::delete_character),
        )
        .route(
            "/character/intelligence/{value}",
            get(character_routes::list_by_intelligence),
        )
        .route("/character/life/{value}", get(character_routes::list_by_life))
        .route("/character/caste/{caste}", get(character_routes::list_by_caste))
        .route(
            "/character/knowledge/{knowledge}",
            get(character_routes::list_by_knowledge),
        )
        .route(
            "/character/images/{number}",
            get(character_routes::list_images),
        )
        .route(
            "/character/images/{kind}/{number}",
            get(character_routes::list_images_of_kind),
        )
        // Character form routes
        .route(
            "/character/html/new",
            post(character_form_routes::submit_new),
        )
        .route(
            "/character/html/{identifier}/edit",
            post(character_form_routes::submit_edit),
        )
        .route(
            "/character/html/{identifier}/delete",
            post(character_form_routes::submit_delete),
        )
        // Player routes
        .route("/player", get(player_routes::redirect_to_index))
        .route("/player/index", get(player_routes::list_players))
        .route("/player/display/{identifier}", get(player_routes::get_player))
        .route("/player/create", post(player_routes::create_player))
        .route(
            "/player/modify/{identifier}",
            put(player_routes::modify_player),
        )
        .route(
            "/player/delete/{identifier}",
            delete(player_routes::delete_player),
        )
}

type ApiError = (StatusCode, String);

/// Map a service failure onto the response status
fn service_error(err: ServiceError) -> ApiError {
    let status = match &err {
        ServiceError::Pipeline(PipelineError::Serialization(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ServiceError::Pipeline(pipeline) => {
            return (StatusCode::UNPROCESSABLE_ENTITY, rejection_body(pipeline))
        }
        ServiceError::AccessDenied(_) => StatusCode::FORBIDDEN,
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "Entity store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}

/// JSON body of a 422: the message plus every offending field
fn rejection_body(err: &PipelineError) -> String {
    json!({
        "message": err.to_string(),
        "errors": err.field_errors(),
    })
    .to_string()
}

/// Ask the gate for `action` on `subject`
fn authorize(
    state: &AppState,
    action: Action,
    subject: Option<&Identifier>,
) -> Result<(), ApiError> {
    state
        .gate
        .check(action, subject)
        .map_err(|e: AccessDenied| service_error(e.into()))
}

fn parse_identifier(raw: &str) -> Result<Identifier, ApiError> {
    Identifier::parse(raw).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

fn parse_body(raw: &str) -> Result<Value, ApiError> {
    crate::application::pipeline::parse_payload(raw).map_err(|e| service_error(e.into()))
}

fn render(rendered: Result<Value, PipelineError>) -> Result<Json<Value>, ApiError> {
    rendered.map(Json).map_err(|e| service_error(e.into()))
}
