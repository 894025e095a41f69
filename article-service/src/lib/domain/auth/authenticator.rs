use std::sync::Arc;

use auth::PasswordError;
use auth::PasswordHasher;
use auth::TokenService;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;

pub const BEARER_TOKEN_TYPE: &str = "bearer";

// Verified against when the email is unknown, so both failure paths pay for a hash.
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-email";

/// Access token handed out by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Checks email/password credentials and issues access tokens.
pub struct Authenticator<UR>
where
    UR: UserRepository,
{
    users: Arc<UR>,
    password_hasher: PasswordHasher,
    token_service: Arc<TokenService>,
    dummy_hash: String,
}

impl<UR> Authenticator<UR>
where
    UR: UserRepository,
{
    /// # Errors
    /// * `PasswordError` - The placeholder hash could not be computed
    pub fn new(
        users: Arc<UR>,
        password_hasher: PasswordHasher,
        token_service: Arc<TokenService>,
    ) -> Result<Self, PasswordError> {
        let dummy_hash = password_hasher.hash(DUMMY_PASSWORD)?;

        Ok(Self {
            users,
            password_hasher,
            token_service,
            dummy_hash,
        })
    }

    /// Look up a user by email and verify the password against the stored hash.
    ///
    /// # Returns
    /// The matching user, or None when the email is unknown or the password
    /// does not match. The two cases are indistinguishable to the caller.
    ///
    /// # Errors
    /// * `Internal` - Store lookup or verification task failed
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let stored_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.clone(),
        };
        let matches = self.verify_password(password, stored_hash).await?;

        match user {
            Some(user) if matches => Ok(Some(user)),
            Some(user) => {
                tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
                Ok(None)
            }
            None => {
                tracing::debug!("Login attempt for unknown email");
                Ok(None)
            }
        }
    }

    async fn verify_password(&self, password: &str, stored_hash: String) -> Result<bool, AuthError> {
        let hasher = self.password_hasher.clone();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))
    }

    /// Authenticate and issue an access token whose subject is the user id.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `InvalidToken` - Token encoding failed
    /// * `Internal` - Store lookup or verification task failed
    pub async fn login(&self, email: &str, password: &str) -> Result<AccessGrant, AuthError> {
        let user = self
            .authenticate(email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let access_token = self.token_service.issue_access_token(user.id)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AccessGrant {
            access_token,
            token_type: BEARER_TOKEN_TYPE,
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::HashingCost;
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::NewUser;
    use crate::domain::user::models::PersonName;
    use crate::domain::user::models::UserId;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    const SECRET: &[u8] = b"authenticator-test-secret-0123456789";

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_cost(HashingCost {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    fn token_service() -> Arc<TokenService> {
        Arc::new(TokenService::new(SECRET, Duration::minutes(30)).unwrap())
    }

    fn stored_user(hasher: &PasswordHasher) -> User {
        User {
            id: UserId(7),
            first_name: PersonName::new("Ada".to_string()).unwrap(),
            last_name: PersonName::new("Lovelace".to_string()).unwrap(),
            email: EmailAddress::new("ada@example.com".to_string()).unwrap(),
            password_hash: hasher.hash("correct horse").unwrap(),
            is_admin: false,
        }
    }

    fn authenticator_with(repository: MockTestUserRepository) -> Authenticator<MockTestUserRepository> {
        Authenticator::new(Arc::new(repository), fast_hasher(), token_service()).unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let hasher = fast_hasher();
        let user = stored_user(&hasher);
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let authenticator = authenticator_with(repository);

        let result = authenticator
            .authenticate("ada@example.com", "correct horse")
            .await
            .unwrap();
        assert_eq!(result.map(|u| u.id), Some(UserId(7)));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let authenticator = authenticator_with(repository);

        let result = authenticator
            .authenticate("nobody@example.com", "correct horse")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_unknown_email_still_verifies_a_hash() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let authenticator = authenticator_with(repository);

        // Same algorithm and cost as real stored hashes
        assert!(authenticator.dummy_hash.starts_with("$argon2id$"));
        assert!(authenticator.dummy_hash.contains("m=8,t=1,p=1"));
        assert!(fast_hasher().verify(DUMMY_PASSWORD, &authenticator.dummy_hash));

        let result = authenticator
            .authenticate("nobody@example.com", DUMMY_PASSWORD)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let hasher = fast_hasher();
        let user = stored_user(&hasher);
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let authenticator = authenticator_with(repository);

        let result = authenticator
            .authenticate("ada@example.com", "Correct horse")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_email_is_case_sensitive() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email == "ADA@example.com")
            .times(1)
            .returning(|_| Ok(None));

        let authenticator = authenticator_with(repository);

        let result = authenticator
            .authenticate("ADA@example.com", "correct horse")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_login_issues_token_for_user_id() {
        let hasher = fast_hasher();
        let user = stored_user(&hasher);
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let authenticator = authenticator_with(repository);

        let grant = authenticator
            .login("ada@example.com", "correct horse")
            .await
            .unwrap();

        assert_eq!(grant.token_type, "bearer");
        assert_eq!(token_service().validate(&grant.access_token).unwrap(), "7");
    }

    #[tokio::test]
    async fn test_login_invalid_credentials() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let authenticator = authenticator_with(repository);

        let result = authenticator.login("nobody@example.com", "whatever").await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_authenticate_store_failure() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let authenticator = authenticator_with(repository);

        let result = authenticator.authenticate("ada@example.com", "x").await;
        assert!(matches!(result.unwrap_err(), AuthError::Internal(_)));
    }
}
