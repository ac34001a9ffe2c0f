//! Hydrator - merges a partial payload into an entity
//!
//! Only keys present in the payload are touched. Type errors and field-local
//! constraint violations are collected across the whole payload; the target
//! is replaced only when none were found.

use serde_json::Value;
use validator::Validate;

use super::{collect_violations, FieldError, PipelineError};

const EXTRA_FIELD: &str = "This form should not contain extra fields.";
const NOT_A_STRING: &str = "This value should be of type string.";
const NOT_AN_INTEGER: &str = "This value should be of type integer.";
const NOT_VALID: &str = "This value is not valid.";
const OUT_OF_RANGE: &str = "This value is out of range.";

/// Wire type a hydratable field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

/// A payload value after coercion to its field's kind
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Null,
    Text(String),
    Integer(i64),
}

impl FieldInput {
    pub fn into_text(self) -> Result<Option<String>, String> {
        match self {
            Self::Null => Ok(None),
            Self::Text(text) => Ok(Some(text)),
            Self::Integer(_) => Err(NOT_A_STRING.to_string()),
        }
    }

    pub fn into_integer<T: TryFrom<i64>>(self) -> Result<Option<T>, String> {
        match self {
            Self::Null => Ok(None),
            Self::Integer(n) => T::try_from(n)
                .map(Some)
                .map_err(|_| OUT_OF_RANGE.to_string()),
            Self::Text(_) => Err(NOT_AN_INTEGER.to_string()),
        }
    }
}

/// An entity whose client-editable fields can be set from a payload
pub trait Hydratable: Clone + Validate {
    /// Payload keys accepted for this entity and their kinds
    const FIELDS: &'static [(&'static str, FieldKind)];

    /// Store one coerced value; `field` is always one of `FIELDS`
    fn assign(&mut self, field: &str, input: FieldInput) -> Result<(), String>;
}

/// Decode a raw request body. An empty body is a null payload.
pub fn parse_payload(raw: &str) -> Result<Value, PipelineError> {
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(raw).map_err(|_| PipelineError::InvalidPayloadShape(raw.to_string()))
}

/// Apply `payload` onto `entity`, all-or-nothing
pub fn hydrate<E: Hydratable>(entity: &mut E, payload: &Value) -> Result<(), PipelineError> {
    let payload = match payload {
        Value::Null => return Ok(()),
        Value::Object(map) => map,
        other => return Err(PipelineError::InvalidPayloadShape(other.to_string())),
    };

    let mut staged = entity.clone();
    let mut errors = Vec::new();

    for (key, value) in payload {
        let Some((name, kind)) = E::FIELDS.iter().find(|(name, _)| *name == key.as_str()) else {
            errors.push(FieldError::new(key, EXTRA_FIELD));
            continue;
        };
        let outcome = coerce(*kind, value).and_then(|input| staged.assign(name, input));
        if let Err(message) = outcome {
            errors.push(FieldError::new(key, message));
        }
    }

    // Constraints run for submitted fields only; required-ness is checked
    // once the whole entity is assembled.
    if let Err(violations) = staged.validate() {
        let constraint_errors = collect_violations(&violations, |field, error| {
            error.code != "required"
                && payload.contains_key(field)
                && !errors.iter().any(|e: &FieldError| e.field == field)
        });
        errors.extend(constraint_errors);
    }

    if !errors.is_empty() {
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        return Err(PipelineError::Hydration(errors));
    }

    *entity = staged;
    Ok(())
}

fn coerce(kind: FieldKind, value: &Value) -> Result<FieldInput, String> {
    match (kind, value) {
        (_, Value::Null) => Ok(FieldInput::Null),
        (FieldKind::Text, Value::String(text)) if text.is_empty() => Ok(FieldInput::Null),
        (FieldKind::Text, Value::String(text)) => Ok(FieldInput::Text(text.clone())),
        (FieldKind::Text, _) => Err(NOT_A_STRING.to_string()),
        (FieldKind::Integer, Value::Number(number)) => number
            .as_i64()
            .map(FieldInput::Integer)
            .ok_or_else(|| NOT_AN_INTEGER.to_string()),
        // Form submissions carry numbers as strings
        (FieldKind::Integer, Value::String(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(FieldInput::Null)
            } else {
                text.parse()
                    .map(FieldInput::Integer)
                    .map_err(|_| NOT_VALID.to_string())
            }
        }
        (FieldKind::Integer, _) => Err(NOT_AN_INTEGER.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    use crate::domain::entities::{Character, Player};
    use crate::domain::value_objects::Identifier;

    fn blank_character() -> Character {
        let now = Utc::now();
        Character::new(Identifier::generate(now), now)
    }

    fn complete_payload() -> Value {
        json!({
            "kind": "Dame",
            "name": "Maeglin",
            "surname": "Oriel",
            "caste": "Erudit",
            "knowledge": "Lettres",
            "intelligence": 120,
            "life": 12,
            "image": "/images/maeglin.jpg"
        })
    }

    #[test]
    fn test_complete_payload_is_applied() {
        let mut character = blank_character();
        hydrate(&mut character, &complete_payload()).unwrap();

        assert_eq!(character.kind.as_deref(), Some("Dame"));
        assert_eq!(character.name.as_deref(), Some("Maeglin"));
        assert_eq!(character.surname.as_deref(), Some("Oriel"));
        assert_eq!(character.caste.as_deref(), Some("Erudit"));
        assert_eq!(character.knowledge.as_deref(), Some("Lettres"));
        assert_eq!(character.intelligence, Some(120));
        assert_eq!(character.life, Some(12));
        assert_eq!(character.image.as_deref(), Some("/images/maeglin.jpg"));
    }

    #[test]
    fn test_null_payload_is_noop() {
        let mut character = blank_character();
        let before = character.clone();
        hydrate(&mut character, &Value::Null).unwrap();
        assert_eq!(character, before);
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        let mut character = blank_character();
        for payload in [json!([1, 2]), json!("name"), json!(42), json!(true)] {
            let err = hydrate(&mut character, &payload).unwrap_err();
            assert!(matches!(err, PipelineError::InvalidPayloadShape(_)));
        }
    }

    #[test]
    fn test_partial_payload_leaves_other_fields() {
        let mut character = blank_character();
        hydrate(&mut character, &complete_payload()).unwrap();

        hydrate(&mut character, &json!({ "life": 40 })).unwrap();
        assert_eq!(character.life, Some(40));
        assert_eq!(character.name.as_deref(), Some("Maeglin"));
        assert_eq!(character.intelligence, Some(120));
    }

    #[test]
    fn test_type_errors_are_collected_and_entity_unchanged() {
        let mut character = blank_character();
        hydrate(&mut character, &complete_payload()).unwrap();
        let before = character.clone();

        let err = hydrate(
            &mut character,
            &json!({ "name": "Renamed", "intelligence": "clever", "caste": 7 }),
        )
        .unwrap_err();

        let PipelineError::Hydration(errors) = err else {
            panic!("expected hydration error, got {err:?}");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["caste", "intelligence"]);
        assert_eq!(character, before);
    }

    #[test]
    fn test_numeric_strings_are_accepted_for_integers() {
        let mut character = blank_character();
        hydrate(&mut character, &json!({ "intelligence": " 42 ", "life": "" })).unwrap();
        assert_eq!(character.intelligence, Some(42));
        assert_eq!(character.life, None);
    }

    #[test]
    fn test_unknown_and_server_managed_keys_are_rejected() {
        let mut character = blank_character();
        let err = hydrate(
            &mut character,
            &json!({ "identifier": "0".repeat(40), "power": 3 }),
        )
        .unwrap_err();
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn test_constraints_checked_for_submitted_fields_only() {
        let mut character = blank_character();
        // Missing required fields are not the hydrator's concern
        hydrate(&mut character, &json!({ "name": "Iris" })).unwrap();

        let err = hydrate(&mut character, &json!({ "life": 251, "name": "" })).unwrap_err();
        let fields: Vec<_> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["life"]);
        assert_eq!(character.name.as_deref(), Some("Iris"));
    }

    #[test]
    fn test_integer_overflow_is_a_field_error() {
        let mut character = blank_character();
        let err = hydrate(&mut character, &json!({ "life": 9_000_000_000i64 })).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "life");
    }

    #[test]
    fn test_player_email_format() {
        let now = Utc::now();
        let mut player = Player::new(Identifier::generate(now), now);
        let err = hydrate(&mut player, &json!({ "email": "not-an-address" })).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "email");
        assert_eq!(player.email, None);

        hydrate(&mut player, &json!({ "email": "mae@example.org", "mirian": 10 })).unwrap();
        assert_eq!(player.email.as_deref(), Some("mae@example.org"));
        assert_eq!(player.mirian, Some(10));
    }

    #[test]
    fn test_parse_payload() {
        assert_eq!(parse_payload("").unwrap(), Value::Null);
        assert_eq!(parse_payload("  \n").unwrap(), Value::Null);
        assert_eq!(parse_payload(r#"{"life": 3}"#).unwrap(), json!({ "life": 3 }));
        assert!(matches!(
            parse_payload("{not json"),
            Err(PipelineError::InvalidPayloadShape(_))
        ));
    }
}
