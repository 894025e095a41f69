use std::sync::Arc;

use async_trait::async_trait;

use super::errors::ArticleError;
use super::models::Article;
use super::models::ArticleId;
use super::models::CreateArticleCommand;
use super::models::NewArticle;
use super::models::UpdateArticleCommand;
use super::ports::ArticleRepository;
use super::ports::ArticleServicePort;
use crate::domain::auth::policy;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Concrete implementation of ArticleServicePort.
///
/// Ownership checks fetch the article and the users involved with separate
/// lookups before any rule is evaluated.
pub struct ArticleService<AR, UR>
where
    AR: ArticleRepository,
    UR: UserRepository,
{
    article_repository: Arc<AR>,
    user_repository: Arc<UR>,
}

impl<AR, UR> ArticleService<AR, UR>
where
    AR: ArticleRepository,
    UR: UserRepository,
{
    pub fn new(article_repository: Arc<AR>, user_repository: Arc<UR>) -> Self {
        Self {
            article_repository,
            user_repository,
        }
    }

    async fn find_existing(&self, id: &ArticleId) -> Result<Article, ArticleError> {
        self.article_repository
            .find_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<AR, UR> ArticleServicePort for ArticleService<AR, UR>
where
    AR: ArticleRepository,
    UR: UserRepository,
{
    async fn create_article(
        &self,
        acting: &User,
        command: CreateArticleCommand,
    ) -> Result<Article, ArticleError> {
        let article = NewArticle {
            title: command.title,
            description: command.description,
            source_url: command.source_url,
            owner_id: acting.id,
        };

        let created = self.article_repository.create(article).await?;
        tracing::info!(article_id = %created.id, owner_id = %created.owner_id, "Article created");

        Ok(created)
    }

    async fn get_article(&self, id: &ArticleId) -> Result<Article, ArticleError> {
        self.find_existing(id).await
    }

    async fn list_articles(&self) -> Result<Vec<Article>, ArticleError> {
        self.article_repository.list_all().await
    }

    async fn list_articles_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Vec<Article>, ArticleError> {
        self.article_repository.find_by_owner(owner_id).await
    }

    async fn update_article(
        &self,
        acting: &User,
        id: &ArticleId,
        command: UpdateArticleCommand,
    ) -> Result<Article, ArticleError> {
        let mut article = self.find_existing(id).await?;

        policy::can_update_article(acting, &article).enforce("update article", acting)?;

        if let Some(title) = command.title {
            article.title = title;
        }

        if let Some(description) = command.description {
            article.description = description;
        }

        if let Some(source_url) = command.source_url {
            article.source_url = source_url;
        }

        let updated = self.article_repository.update(article).await?;
        tracing::info!(article_id = %updated.id, acting_user_id = %acting.id, "Article updated");

        Ok(updated)
    }

    async fn transfer_article(
        &self,
        acting: &User,
        id: &ArticleId,
        new_owner_id: &UserId,
    ) -> Result<Article, ArticleError> {
        policy::can_transfer_article(acting).enforce("transfer article", acting)?;

        let mut article = self.find_existing(id).await?;

        let new_owner = self
            .user_repository
            .find_by_id(new_owner_id)
            .await
            .map_err(|e| ArticleError::DatabaseError(e.to_string()))?
            .ok_or(ArticleError::OwnerNotFound(new_owner_id.to_string()))?;

        let previous_owner_id = article.owner_id;
        article.owner_id = new_owner.id;

        let transferred = self.article_repository.update(article).await?;
        tracing::info!(
            article_id = %transferred.id,
            previous_owner_id = %previous_owner_id,
            owner_id = %transferred.owner_id,
            acting_user_id = %acting.id,
            "Article ownership transferred"
        );

        Ok(transferred)
    }

    async fn delete_article(&self, acting: &User, id: &ArticleId) -> Result<(), ArticleError> {
        let article = self.find_existing(id).await?;

        policy::can_delete_article(acting, &article).enforce("delete article", acting)?;

        self.article_repository.delete(id).await?;
        tracing::info!(article_id = %id, acting_user_id = %acting.id, "Article deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;

    use super::*;
    use crate::domain::article::models::Description;
    use crate::domain::article::models::SourceUrl;
    use crate::domain::article::models::Title;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::NewUser;
    use crate::domain::user::models::PersonName;

    mock! {
        pub TestArticleRepository {}

        #[async_trait]
        impl ArticleRepository for TestArticleRepository {
            async fn create(&self, article: NewArticle) -> Result<Article, ArticleError>;
            async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticleError>;
            async fn list_all(&self) -> Result<Vec<Article>, ArticleError>;
            async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Article>, ArticleError>;
            async fn update(&self, article: Article) -> Result<Article, ArticleError>;
            async fn delete(&self, id: &ArticleId) -> Result<(), ArticleError>;
        }
    }

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

    fn user(id: i64, is_admin: bool) -> User {
        User {
            id: UserId(id),
            first_name: PersonName::new("Test".to_string()).unwrap(),
            last_name: PersonName::new("User".to_string()).unwrap(),
            email: EmailAddress::new(format!("user{}@example.com", id)).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            is_admin,
        }
    }

    fn article_owned_by(owner: i64) -> Article {
        Article {
            id: ArticleId(10),
            title: Title::new("Original title".to_string()).unwrap(),
            description: Description::new("Original description".to_string()).unwrap(),
            source_url: SourceUrl::new("https://example.com/original".to_string()).unwrap(),
            owner_id: UserId(owner),
        }
    }

    #[tokio::test]
    async fn test_create_article_owned_by_acting_user() {
        let mut articles = MockTestArticleRepository::new();
        let users = MockTestUserRepository::new();

        articles
            .expect_create()
            .withf(|article| article.owner_id == UserId(1))
            .times(1)
            .returning(|article| {
                Ok(Article {
                    id: ArticleId(10),
                    title: article.title,
                    description: article.description,
                    source_url: article.source_url,
                    owner_id: article.owner_id,
                })
            });

        let service = ArticleService::new(Arc::new(articles), Arc::new(users));

        let command = CreateArticleCommand {
            title: Title::new("Rust".to_string()).unwrap(),
            description: Description::new("Ownership explained".to_string()).unwrap(),
            source_url: SourceUrl::new("https://example.com/rust".to_string()).unwrap(),
        };

        let article = service
            .create_article(&user(1, false), command)
            .await
            .unwrap();
        assert_eq!(article.owner_id, UserId(1));
    }

    #[tokio::test]
    async fn test_get_article_not_found() {
        let mut articles = MockTestArticleRepository::new();

        articles
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = ArticleService::new(Arc::new(articles), Arc::new(MockTestUserRepository::new()));

        let result = service.get_article(&ArticleId(404)).await;
        assert!(matches!(result.unwrap_err(), ArticleError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_article_keeps_owner() {
        let mut articles = MockTestArticleRepository::new();

        articles
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(article_owned_by(1))));
        articles
            .expect_update()
            .withf(|article| {
                article.owner_id == UserId(1) && article.title.as_str() == "Edited title"
            })
            .times(1)
            .returning(|article| Ok(article));

        let service = ArticleService::new(Arc::new(articles), Arc::new(MockTestUserRepository::new()));

        let command = UpdateArticleCommand {
            title: Some(Title::new("Edited title".to_string()).unwrap()),
            ..Default::default()
        };

        let updated = service
            .update_article(&user(2, false), &ArticleId(10), command)
            .await
            .unwrap();

        assert_eq!(updated.owner_id, UserId(1));
        assert_eq!(updated.description.as_str(), "Original description");
    }

    #[tokio::test]
    async fn test_delete_article_by_non_owner_denied() {
        let mut articles = MockTestArticleRepository::new();

        articles
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(article_owned_by(1))));
        articles.expect_delete().times(0);

        let service = ArticleService::new(Arc::new(articles), Arc::new(MockTestUserRepository::new()));

        let result = service.delete_article(&user(2, false), &ArticleId(10)).await;
        assert!(matches!(result.unwrap_err(), ArticleError::NotPermitted(_)));
    }

    #[tokio::test]
    async fn test_delete_article_by_admin_non_owner_denied() {
        let mut articles = MockTestArticleRepository::new();

        articles
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(article_owned_by(1))));
        articles.expect_delete().times(0);

        let service = ArticleService::new(Arc::new(articles), Arc::new(MockTestUserRepository::new()));

        let result = service.delete_article(&user(3, true), &ArticleId(10)).await;
        assert!(matches!(result.unwrap_err(), ArticleError::NotPermitted(_)));
    }

    #[tokio::test]
    async fn test_delete_article_by_owner() {
        let mut articles = MockTestArticleRepository::new();

        articles
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(article_owned_by(1))));
        articles
            .expect_delete()
            .withf(|id| *id == ArticleId(10))
            .times(1)
            .returning(|_| Ok(()));

        let service = ArticleService::new(Arc::new(articles), Arc::new(MockTestUserRepository::new()));

        let result = service.delete_article(&user(1, false), &ArticleId(10)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_transfer_article_by_admin() {
        let mut articles = MockTestArticleRepository::new();
        let mut users = MockTestUserRepository::new();

        articles
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(article_owned_by(1))));
        users
            .expect_find_by_id()
            .withf(|id| *id == UserId(2))
            .times(1)
            .returning(|_| Ok(Some(user(2, false))));
        articles
            .expect_update()
            .withf(|article| article.owner_id == UserId(2))
            .times(1)
            .returning(|article| Ok(article));

        let service = ArticleService::new(Arc::new(articles), Arc::new(users));

        let transferred = service
            .transfer_article(&user(3, true), &ArticleId(10), &UserId(2))
            .await
            .unwrap();
        assert_eq!(transferred.owner_id, UserId(2));
    }

    #[tokio::test]
    async fn test_transfer_article_by_owner_denied() {
        let mut articles = MockTestArticleRepository::new();

        articles.expect_find_by_id().times(0);
        articles.expect_update().times(0);

        let service = ArticleService::new(Arc::new(articles), Arc::new(MockTestUserRepository::new()));

        let result = service
            .transfer_article(&user(1, false), &ArticleId(10), &UserId(2))
            .await;
        assert!(matches!(result.unwrap_err(), ArticleError::NotPermitted(_)));
    }

    #[tokio::test]
    async fn test_transfer_article_to_unknown_user() {
        let mut articles = MockTestArticleRepository::new();
        let mut users = MockTestUserRepository::new();

        articles
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(article_owned_by(1))));
        users.expect_find_by_id().times(1).returning(|_| Ok(None));
        articles.expect_update().times(0);

        let service = ArticleService::new(Arc::new(articles), Arc::new(users));

        let result = service
            .transfer_article(&user(3, true), &ArticleId(10), &UserId(99))
            .await;
        assert!(matches!(result.unwrap_err(), ArticleError::OwnerNotFound(_)));
    }
}
