use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::AuthError;
use crate::error::ApiError;

/// Basic-auth middleware for mutating routes. Injects `AuthUser` on success.
pub async fn basic_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let user = state
        .authenticator
        .authenticate(header.as_deref())
        .await
        .map_err(|e| {
            if !matches!(e, AuthError::Store(_)) {
                tracing::warn!(
                    method = %request.method(),
                    path = %request.uri().path(),
                    "Authentication failed: {}",
                    e
                );
            }
            ApiError::from(e)
        })?;

    tracing::debug!(user = %user.username, "Authenticated request");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
