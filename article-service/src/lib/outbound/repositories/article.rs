use async_trait::async_trait;
use sqlx::PgPool;

use crate::article::errors::ArticleError;
use crate::domain::article::models::Article;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::Description;
use crate::domain::article::models::NewArticle;
use crate::domain::article::models::SourceUrl;
use crate::domain::article::models::Title;
use crate::domain::article::ports::ArticleRepository;
use crate::domain::user::models::UserId;

#[derive(Debug, sqlx::FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    description: String,
    source_url: String,
    owner_id: i64,
}

impl TryFrom<ArticleRow> for Article {
    type Error = ArticleError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article {
            id: ArticleId(row.id),
            title: Title::new(row.title)?,
            description: Description::new(row.description)?,
            source_url: SourceUrl::new(row.source_url)?,
            owner_id: UserId(row.owner_id),
        })
    }
}

fn map_write_error(e: sqlx::Error, owner_id: UserId) -> ArticleError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return ArticleError::OwnerNotFound(owner_id.to_string());
        }
    }
    ArticleError::DatabaseError(e.to_string())
}

pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn create(&self, article: NewArticle) -> Result<Article, ArticleError> {
        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            INSERT INTO articles (title, description, source_url, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, source_url, owner_id
            "#,
        )
        .bind(article.title.as_str())
        .bind(article.description.as_str())
        .bind(article.source_url.as_str())
        .bind(article.owner_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, article.owner_id))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, ArticleError> {
        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT id, title, description, source_url, owner_id
            FROM articles
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        row.map(Article::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Article>, ArticleError> {
        let rows = sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT id, title, description, source_url, owner_id
            FROM articles
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Article::try_from).collect()
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Article>, ArticleError> {
        let rows = sqlx::query_as::<_, ArticleRow>(
            r#"
            SELECT id, title, description, source_url, owner_id
            FROM articles
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Article::try_from).collect()
    }

    async fn update(&self, article: Article) -> Result<Article, ArticleError> {
        let row = sqlx::query_as::<_, ArticleRow>(
            r#"
            UPDATE articles
            SET title = $2, description = $3, source_url = $4, owner_id = $5
            WHERE id = $1
            RETURNING id, title, description, source_url, owner_id
            "#,
        )
        .bind(article.id.0)
        .bind(article.title.as_str())
        .bind(article.description.as_str())
        .bind(article.source_url.as_str())
        .bind(article.owner_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, article.owner_id))?
        .ok_or_else(|| ArticleError::NotFound(article.id.to_string()))?;

        row.try_into()
    }

    async fn delete(&self, id: &ArticleId) -> Result<(), ArticleError> {
        let result = sqlx::query(
            r#"
            DELETE FROM articles
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ArticleError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ArticleError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
