use serde_json::{Map, Value};

use crate::models::{CompanyPatch, CompanyType, NewCompany, Patch};

use super::ValidationError;

const EMPLOYEES_CONSTRAINT: &str =
    "The field amount_of_employees has to be an integer greater than 0.";

/// Parse a raw request body into a JSON object
pub fn parse_body(body: &[u8]) -> Result<Map<String, Value>, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ValidationError::MalformedBody("Body is empty".to_string()));
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ValidationError::MalformedBody(
            "Request body must be a JSON object".to_string(),
        )),
        Err(e) => Err(ValidationError::MalformedBody(format!("Invalid JSON: {}", e))),
    }
}

/// Creation mode: every required field present and valid, all violations reported together.
/// A supplied `id` is ignored; the store assigns one.
pub fn validate_create(payload: &Map<String, Value>) -> Result<NewCompany, ValidationError> {
    let mut errors: Vec<String> = Vec::new();

    let name = match payload.get("name") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::String(_)) | Some(Value::Null) | None => {
            errors.push("The field name cannot be empty.".to_string());
            None
        }
        Some(_) => {
            errors.push("The field name must be a string.".to_string());
            None
        }
    };

    let description = match payload.get("description") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(_) => {
            errors.push("The field description must be a string.".to_string());
            String::new()
        }
    };

    let amount_of_employees = match payload.get("amount_of_employees") {
        Some(Value::Null) | None => None,
        Some(value) => match employee_count(value) {
            Ok(n) => Some(n),
            Err(violation) => {
                errors.push(violation);
                None
            }
        },
    };

    let registered = match payload.get("registered") {
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::Null) | None => {
            errors.push("The field registered cannot be empty.".to_string());
            None
        }
        Some(_) => {
            errors.push("The field registered must be a boolean.".to_string());
            None
        }
    };

    let company_type = match payload.get("type") {
        Some(Value::String(s)) if s.is_empty() => {
            errors.push("The field type cannot be empty.".to_string());
            None
        }
        Some(Value::String(s)) => match s.parse::<CompanyType>() {
            Ok(kind) => Some(kind),
            Err(_) => {
                errors.push(type_violation(s));
                None
            }
        },
        Some(Value::Null) | None => {
            errors.push("The field type cannot be empty.".to_string());
            None
        }
        Some(other) => {
            errors.push(type_violation(&other.to_string()));
            None
        }
    };

    match (name, registered, company_type) {
        (Some(name), Some(registered), Some(company_type)) if errors.is_empty() => Ok(NewCompany {
            name,
            description,
            amount_of_employees,
            registered,
            company_type,
        }),
        _ => Err(ValidationError::InvalidPayload(errors.join(" "))),
    }
}

/// Update mode: only supplied fields are checked; the first violation wins
pub fn validate_update(payload: &Map<String, Value>) -> Result<CompanyPatch, ValidationError> {
    let mut patch = CompanyPatch::default();

    for (key, value) in payload {
        if key == "id" {
            return Err(ValidationError::ImmutableField("id"));
        }
        if key != "description" && matches!(value, Value::String(s) if s.is_empty()) {
            return Err(ValidationError::EmptyField(key.clone()));
        }

        match key.as_str() {
            "name" => match value {
                Value::String(s) => patch.name = Patch::Present(s.clone()),
                Value::Null => return Err(ValidationError::EmptyField(key.clone())),
                _ => {
                    return Err(ValidationError::InvalidPayload(
                        "The field name must be a string.".to_string(),
                    ))
                }
            },
            "description" => match value {
                Value::String(s) => patch.description = Patch::Present(s.clone()),
                Value::Null => patch.description = Patch::Present(String::new()),
                _ => {
                    return Err(ValidationError::InvalidPayload(
                        "The field description must be a string.".to_string(),
                    ))
                }
            },
            "amount_of_employees" => match value {
                Value::Null => patch.amount_of_employees = Patch::Present(None),
                other => match employee_count(other) {
                    Ok(n) => patch.amount_of_employees = Patch::Present(Some(n)),
                    Err(violation) => {
                        return Err(ValidationError::InvalidPayload(format!(
                            "{} Received: {}",
                            violation, other
                        )))
                    }
                },
            },
            "registered" => match value {
                Value::Bool(b) => patch.registered = Patch::Present(*b),
                Value::Null => return Err(ValidationError::EmptyField(key.clone())),
                _ => {
                    return Err(ValidationError::InvalidPayload(
                        "The field registered must be a boolean.".to_string(),
                    ))
                }
            },
            "type" => match value {
                Value::String(s) => match s.parse::<CompanyType>() {
                    Ok(kind) => patch.company_type = Patch::Present(kind),
                    Err(_) => return Err(ValidationError::InvalidPayload(type_violation(s))),
                },
                Value::Null => return Err(ValidationError::EmptyField(key.clone())),
                other => {
                    return Err(ValidationError::InvalidPayload(type_violation(
                        &other.to_string(),
                    )))
                }
            },
            _ => return Err(ValidationError::UnknownFields(vec![key.clone()])),
        }
    }

    if patch.is_empty() {
        return Err(ValidationError::InvalidPayload(
            "No fields supplied for update.".to_string(),
        ));
    }

    Ok(patch)
}

/// Integer >= 1 that fits the column
fn employee_count(value: &Value) -> Result<i32, String> {
    match value.as_i64() {
        Some(n) if n >= 1 => i32::try_from(n).map_err(|_| employees_out_of_range()),
        Some(_) => Err(EMPLOYEES_CONSTRAINT.to_string()),
        None if value.as_u64().is_some() => Err(employees_out_of_range()),
        None => Err(EMPLOYEES_CONSTRAINT.to_string()),
    }
}

fn employees_out_of_range() -> String {
    format!("The field amount_of_employees cannot exceed {}.", i32::MAX)
}

fn type_violation(received: &str) -> String {
    format!(
        "The type field accepts only the values {}. Received: {}",
        CompanyType::accepted_values(),
        received
    )
}
