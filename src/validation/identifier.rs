use uuid::{Uuid, Variant};

use super::ValidationError;

const CANONICAL_LEN: usize = 36;

/// Canonical hyphenated UUID v4 (version nibble 4, RFC 4122 variant), either hex case
fn parse_v4(raw: &str) -> Option<Uuid> {
    if raw.len() != CANONICAL_LEN {
        return None;
    }
    Uuid::try_parse(raw)
        .ok()
        .filter(|id| id.get_version_num() == 4 && id.get_variant() == Variant::RFC4122)
}

pub fn is_uuid_v4(raw: &str) -> bool {
    parse_v4(raw).is_some()
}

/// Validate an optional path token. Empty means "no specific resource".
pub fn parse_identifier(raw: &str) -> Result<Option<Uuid>, ValidationError> {
    if raw.is_empty() {
        return Ok(None);
    }
    parse_v4(raw)
        .map(Some)
        .ok_or_else(|| ValidationError::InvalidIdentifier(raw.to_string()))
}

/// Like [`parse_identifier`], for operations that must target one resource
pub fn require_identifier(raw: &str) -> Result<Uuid, ValidationError> {
    parse_identifier(raw)?.ok_or(ValidationError::MissingIdentifier)
}
