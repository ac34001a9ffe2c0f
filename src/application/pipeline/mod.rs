//! Entity request pipeline
//!
//! Payloads travel through three pure stages before anything reaches the
//! entity store: the hydrator merges a partial payload into an entity, the
//! completeness check enforces required fields, and the serializer renders
//! the stored result. Every failure is terminal for the request.

mod completeness;
mod hydrator;
mod schema;
mod serializer;

use std::collections::HashMap;

use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

pub use completeness::ensure_complete;
pub use hydrator::{hydrate, parse_payload, FieldInput, FieldKind, Hydratable};
pub use serializer::{to_json, to_json_collection, Node, Normalize};

/// A single offending field and the reason it was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Submitted data is not an object -> {0}")]
    InvalidPayloadShape(String),

    #[error("Invalid submitted data: {}", join(.0))]
    Hydration(Vec<FieldError>),

    #[error("{} Missing data for entity -> {state}", join(.violations))]
    IncompleteEntity {
        violations: Vec<FieldError>,
        /// Serialized entity at the time of the check
        state: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PipelineError {
    /// Offending fields, when the error carries any
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Hydration(errors) => errors,
            Self::IncompleteEntity { violations, .. } => violations,
            _ => &[],
        }
    }
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Flatten constraint violations into field errors, keeping those `keep` accepts
fn collect_violations(
    errors: &ValidationErrors,
    keep: impl Fn(&str, &ValidationError) -> bool,
) -> Vec<FieldError> {
    let mut collected = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        let field: &str = &field;
        for error in field_errors.iter().filter(|e| keep(field, *e)) {
            collected.push(FieldError::new(field, describe(error)));
        }
    }
    collected.sort_by(|a, b| a.field.cmp(&b.field));
    collected
}

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match &*error.code {
        "required" => "This value should not be blank.".to_string(),
        "email" => "This value is not a valid email address.".to_string(),
        "length" => format!("This value should have {} characters.", bounds(&error.params)),
        "range" => format!("This value should be {}.", bounds(&error.params)),
        code => format!("This value violates the '{code}' constraint."),
    }
}

fn bounds(params: &HashMap<std::borrow::Cow<'static, str>, serde_json::Value>) -> String {
    match (params.get("min"), params.get("max")) {
        (Some(min), Some(max)) => format!("between {min} and {max}"),
        (Some(min), None) => format!("at least {min}"),
        (None, Some(max)) => format!("at most {max}"),
        (None, None) => "within bounds".to_string(),
    }
}
