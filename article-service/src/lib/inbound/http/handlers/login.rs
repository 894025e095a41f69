use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::AuthError;
use crate::inbound::http::router::AppState;

/// OAuth2 password-grant style form. `username` carries the email.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

/// Token response, returned bare rather than in the usual envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// An unparseable or incomplete form is answered like wrong credentials.
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let Form(form) = form.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected login form");
        ApiError::from(AuthError::InvalidCredentials)
    })?;

    let grant = state
        .auth_service
        .login(&form.username, &form.password)
        .await?;

    Ok(Json(AccessTokenResponse {
        access_token: grant.access_token,
        token_type: grant.token_type.to_string(),
    }))
}
