use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::{ApiError, InternalError};

pub const MASKED_MESSAGE: &str = "An error occurred while processing your request";

/// Swaps the body of any internal-fault response for a generic message.
/// The detail has already been logged where the error was converted.
pub async fn mask_internal_errors(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    if response.extensions().get::<InternalError>().is_none() {
        return response;
    }
    ApiError::internal_server_error(MASKED_MESSAGE).into_response()
}
