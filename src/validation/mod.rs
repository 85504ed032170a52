pub mod error;
pub mod fields;
pub mod identifier;
pub mod payload;

pub use error::ValidationError;
pub use fields::{check_fields, reject_unknown_fields};
pub use identifier::{is_uuid_v4, parse_identifier, require_identifier};
pub use payload::{parse_body, validate_create, validate_update};
