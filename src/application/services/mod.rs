//! Application services - Use case implementations
//!
//! Each service drives the entity pipeline (hydrate, check completeness,
//! fire listeners) and only then touches the repository port, so nothing is
//! stored unless the whole pipeline succeeded.

pub mod character_service;
pub mod player_service;

use crate::application::pipeline::PipelineError;
use crate::application::ports::outbound::AccessDenied;
use crate::domain::value_objects::Identifier;

pub use character_service::{CharacterService, CharacterServiceImpl};
pub use player_service::{PlayerService, PlayerServiceImpl};

/// Failure of a service operation
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The payload or the resulting entity was rejected
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    #[error("{entity} not found: {identifier}")]
    NotFound {
        entity: &'static str,
        identifier: Identifier,
    },

    /// Entity store failure, passed through as reported by the store
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

fn rejected(entity: &'static str, err: PipelineError) -> ServiceError {
    tracing::warn!(
        entity,
        fields = err.field_errors().len(),
        error = %err,
        "Rejected {} payload",
        entity
    );
    ServiceError::Pipeline(err)
}
