use async_trait::async_trait;

use crate::domain::auth::authenticator::AccessGrant;
use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::User;

/// Port for authentication operations used by the HTTP edge.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Exchange email and password for an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Internal` - Store lookup or token issuance failed
    async fn login(&self, email: &str, password: &str) -> Result<AccessGrant, AuthError>;

    /// Resolve a bearer token to the current user.
    ///
    /// # Errors
    /// * `InvalidToken` - Token failed validation
    /// * `UnknownSubject` - Token does not name an existing user
    /// * `Internal` - Store lookup failed
    async fn resolve_current_identity(&self, token: &str) -> Result<User, AuthError>;
}
