pub mod auth;
pub mod errors;
pub mod response;

pub use auth::basic_auth_middleware;
pub use errors::mask_internal_errors;
pub use response::{ApiResponse, ApiResult};
