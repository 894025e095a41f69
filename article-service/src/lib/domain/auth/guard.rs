use std::sync::Arc;

use auth::TokenService;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Resolves a bearer token to the user it was issued for.
pub struct AuthorizationGuard<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    token_service: Arc<TokenService>,
}

impl<UR> AuthorizationGuard<UR>
where
    UR: UserRepository,
{
    pub fn new(users: Arc<UR>, token_service: Arc<TokenService>) -> Self {
        Self {
            users,
            token_service,
        }
    }

    /// Validate the token and load the user named by its subject.
    ///
    /// The user is fetched on every call, so a deleted account stops
    /// authenticating immediately even though its token has not expired.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, tampered, expired or of the wrong type
    /// * `UnknownSubject` - Subject is not a user id or the user no longer exists
    /// * `Internal` - Store lookup failed
    pub async fn resolve_current_identity(&self, token: &str) -> Result<User, AuthError> {
        let subject = self.token_service.validate(token).inspect_err(|e| {
            tracing::warn!(error = %e, "Access token rejected");
        })?;

        let user_id = UserId::from_string(&subject).map_err(|e| {
            tracing::warn!(error = %e, "Access token subject is not a user id");
            AuthError::UnknownSubject(subject.clone())
        })?;

        self.users
            .find_by_id(&user_id)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or_else(|| {
                tracing::warn!(user_id = %user_id, "Access token subject no longer exists");
                AuthError::UnknownSubject(subject)
            })
    }
}
