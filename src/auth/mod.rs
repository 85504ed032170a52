use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::database::{DatabaseError, UserStore};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Malformed(&'static str),

    #[error("Username or password is incorrect")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

impl AuthError {
    pub fn malformed(message: &'static str) -> Self {
        AuthError::Malformed(message)
    }

    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials
    }
}

/// Decoded Basic credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identity attached to authenticated requests
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
}

/// Parse `Basic base64(username:password)`, splitting once on the first colon
pub fn parse_basic_header(header: Option<&str>) -> Result<Credentials, AuthError> {
    let encoded = header
        .and_then(|h| h.strip_prefix("Basic "))
        .ok_or(AuthError::malformed("Missing basic auth"))?;

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AuthError::malformed("Invalid auth encoding"))?;
    let decoded =
        String::from_utf8(decoded).map_err(|_| AuthError::malformed("Invalid auth encoding"))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(AuthError::malformed("Malformed auth"))?;

    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Admits or rejects a request based on its Authorization header
#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserStore>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn authenticate(&self, header: Option<&str>) -> Result<AuthUser, AuthError> {
        let credentials = parse_basic_header(header)?;

        if self
            .users
            .verify(&credentials.username, &credentials.password)
            .await?
        {
            Ok(AuthUser {
                username: credentials.username,
            })
        } else {
            Err(AuthError::invalid_credentials())
        }
    }
}
