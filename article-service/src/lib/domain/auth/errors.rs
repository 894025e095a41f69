use thiserror::Error;

/// Errors raised while authenticating a caller.
///
/// Variants carry the internal reason for logs. The HTTP edge never exposes
/// which one occurred.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] auth::TokenError),

    #[error("Token subject does not resolve to a user: {0}")]
    UnknownSubject(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
