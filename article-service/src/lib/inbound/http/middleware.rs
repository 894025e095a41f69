use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Extension holding the user resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware that resolves the bearer token to a user and stores it in the
/// request extensions.
///
/// Every failure produces the same 401 body; the cause is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let user = state
        .auth_service
        .resolve_current_identity(token)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            ApiError::unauthenticated().into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        tracing::warn!("Authorization header is not valid ASCII");
        ApiError::unauthenticated().into_response()
    })?;

    bearer_token(auth_str).ok_or_else(|| {
        tracing::warn!("Authorization header is not a bearer token");
        ApiError::unauthenticated().into_response()
    })
}

/// Split `<scheme> <token>`. Auth schemes are case-insensitive (RFC 7235).
fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;

    scheme
        .eq_ignore_ascii_case(BEARER_SCHEME)
        .then(|| token.trim_start())
}
