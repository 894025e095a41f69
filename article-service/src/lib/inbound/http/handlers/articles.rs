use serde::Serialize;

use crate::domain::article::models::Article;

pub mod create_article;
pub mod delete_article;
pub mod get_article;
pub mod list_articles;
pub mod transfer_article;
pub mod update_article;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleResponseData {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub source_url: String,
    pub owner_id: i64,
}

impl From<&Article> for ArticleResponseData {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id.0,
            title: article.title.as_str().to_string(),
            description: article.description.as_str().to_string(),
            source_url: article.source_url.as_str().to_string(),
            owner_id: article.owner_id.0,
        }
    }
}
