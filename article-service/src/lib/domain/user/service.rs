use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;

use crate::domain::auth::policy;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Hasher configured with the process-wide cost
    pub fn new(repository: Arc<UR>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }

    async fn find_existing(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(command.password).await?;

        let user = NewUser {
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            password_hash,
            is_admin: false,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User signed up");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.find_existing(id).await
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_user(
        &self,
        acting: &User,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        policy::can_update_user(acting, *id).enforce("update user", acting)?;

        let mut user = self.find_existing(id).await?;

        if let Some(is_admin) = command.is_admin {
            if is_admin != user.is_admin {
                policy::can_change_admin_flag(acting).enforce("change admin flag", acting)?;
                user.is_admin = is_admin;
            }
        }

        if let Some(first_name) = command.first_name {
            user.first_name = first_name;
        }

        if let Some(last_name) = command.last_name {
            user.last_name = last_name;
        }

        if let Some(email) = command.email {
            user.email = email;
        }

        if let Some(password) = command.password {
            user.password_hash = self.hash_password(password).await?;
        }

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, acting_user_id = %acting.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, acting: &User, id: &UserId) -> Result<(), UserError> {
        let target = self.find_existing(id).await?;

        policy::can_delete_user(acting, &target).enforce("delete user", acting)?;

        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, acting_user_id = %acting.id, "User deleted");

        Ok(())
    }
}
