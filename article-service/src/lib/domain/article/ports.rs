use async_trait::async_trait;

use crate::domain::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::CreateArticleCommand;
use crate::domain::article::models::NewArticle;
use crate::domain::article::models::UpdateArticleCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for article domain service operations.
#[async_trait]
pub trait ArticleServicePort: Send + Sync + 'static {
    /// Create an article owned by the acting user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_article(
        &self,
        acting: &User,
        command: CreateArticleCommand,
    ) -> Result<Article, ArticleError>;

    /// Retrieve article by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_article(&self, id: &ArticleId) -> Result<Article, ArticleError>;

    /// Retrieve all articles ordered by id.
    async fn list_articles(&self) -> Result<Vec<Article>, ArticleError>;

    /// Retrieve the articles owned by a user, ordered by id.
    async fn list_articles_by_owner(&self, owner_id: &UserId)
        -> Result<Vec<Article>, ArticleError>;

    /// Edit an article's content. The owner never changes here.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist
    /// * `NotPermitted` - Acting user may not edit the article
    /// * `DatabaseError` - Database operation failed
    async fn update_article(
        &self,
        acting: &User,
        id: &ArticleId,
        command: UpdateArticleCommand,
    ) -> Result<Article, ArticleError>;

    /// Reassign an article to another user (admin only).
    ///
    /// # Errors
    /// * `NotPermitted` - Acting user is not an admin
    /// * `NotFound` - Article does not exist
    /// * `OwnerNotFound` - New owner does not exist
    /// * `DatabaseError` - Database operation failed
    async fn transfer_article(
        &self,
        acting: &User,
        id: &ArticleId,
        new_owner_id: &UserId,
    ) -> Result<Article, ArticleError>;

    /// Delete an article owned by the acting user.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist
    /// * `NotPermitted` - Acting user does not own the article
    /// * `DatabaseError` - Database operation failed
    async fn delete_article(&self, acting: &User, id: &ArticleId) -> Result<(), ArticleError>;
}

/// Persistence operations for article aggregate.
#[async_trait]
pub trait ArticleRepository: Send + Sync + 'static {
    /// Persist a new article and return it with its assigned id.
    async fn create(&self, article: NewArticle) -> Result<Article, ArticleError>;

    /// Retrieve article by identifier (None if not found).
    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticleError>;

    /// Retrieve all articles ordered by id.
    async fn list_all(&self) -> Result<Vec<Article>, ArticleError>;

    /// Retrieve the articles owned by a user, ordered by id.
    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Article>, ArticleError>;

    /// Update an existing article.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist
    /// * `OwnerNotFound` - `owner_id` does not reference a user
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, article: Article) -> Result<Article, ArticleError>;

    /// Remove an article from storage.
    ///
    /// # Errors
    /// * `NotFound` - Article does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &ArticleId) -> Result<(), ArticleError>;
}
