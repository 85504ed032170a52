use thiserror::Error;

/// Request rejections raised before any datastore call is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide a valid company ID. Provided: {0}")]
    InvalidIdentifier(String),

    #[error("A company ID is required for this operation")]
    MissingIdentifier,

    #[error("Unknown fields in request")]
    UnknownFields(Vec<String>),

    #[error("Field '{0}' is not updatable")]
    ImmutableField(&'static str),

    #[error("Field {0} cannot be empty")]
    EmptyField(String),

    /// One or more field constraints failed; creation mode aggregates every message
    #[error("{0}")]
    InvalidPayload(String),

    #[error("{0}")]
    MalformedBody(String),
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidIdentifier(_) | ValidationError::MissingIdentifier => {
                "INVALID_IDENTIFIER"
            }
            ValidationError::UnknownFields(_) => "UNKNOWN_FIELDS",
            ValidationError::ImmutableField(_) => "IMMUTABLE_FIELD",
            ValidationError::EmptyField(_) => "EMPTY_FIELD",
            ValidationError::InvalidPayload(_) => "VALIDATION_ERROR",
            ValidationError::MalformedBody(_) => "INVALID_JSON",
        }
    }
}
