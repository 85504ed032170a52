use serde_json::{Map, Value};

use crate::models::Entity;

use super::ValidationError;

/// Reject any key outside `known`, reporting every offender in request order
pub fn reject_unknown_fields(
    payload: &Map<String, Value>,
    known: &[&str],
) -> Result<(), ValidationError> {
    let unknown: Vec<String> = payload
        .keys()
        .filter(|key| !known.contains(&key.as_str()))
        .cloned()
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::UnknownFields(unknown))
    }
}

/// [`reject_unknown_fields`] against an entity's declared field set
pub fn check_fields<E: Entity>(payload: &Map<String, Value>) -> Result<(), ValidationError> {
    reject_unknown_fields(payload, E::FIELDS)
}
