//! Completeness check run at the end of every create and modify

use validator::Validate;

use super::{collect_violations, to_json, Normalize, PipelineError};

/// Fail with `IncompleteEntity` unless every required field is set and every
/// constraint holds.
pub fn ensure_complete<E: Validate + Normalize>(entity: &E) -> Result<(), PipelineError> {
    let Err(errors) = entity.validate() else {
        return Ok(());
    };

    let state = match to_json(entity) {
        Ok(value) => value.to_string(),
        Err(err) => format!("<{err}>"),
    };
    Err(PipelineError::IncompleteEntity {
        violations: collect_violations(&errors, |_, _| true),
        state,
    })
}
