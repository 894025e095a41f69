use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenService;

use super::authenticator::AccessGrant;
use super::authenticator::Authenticator;
use super::errors::AuthError;
use super::guard::AuthorizationGuard;
use super::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;

/// Concrete implementation of AuthServicePort.
///
/// Both halves share the user store and the token service.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    authenticator: Authenticator<UR>,
    guard: AuthorizationGuard<UR>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(
        users: Arc<UR>,
        password_hasher: PasswordHasher,
        token_service: Arc<TokenService>,
    ) -> Result<Self, PasswordError> {
        Ok(Self {
            authenticator: Authenticator::new(
                Arc::clone(&users),
                password_hasher,
                Arc::clone(&token_service),
            )?,
            guard: AuthorizationGuard::new(users, token_service),
        })
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, email: &str, password: &str) -> Result<AccessGrant, AuthError> {
        self.authenticator.login(email, password).await
    }

    async fn resolve_current_identity(&self, token: &str) -> Result<User, AuthError> {
        self.guard.resolve_current_identity(token).await
    }
}
