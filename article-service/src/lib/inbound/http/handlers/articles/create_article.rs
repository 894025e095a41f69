use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ArticleResponseData;
use crate::article::errors::ArticleError;
use crate::domain::article::models::CreateArticleCommand;
use crate::domain::article::models::Description;
use crate::domain::article::models::SourceUrl;
use crate::domain::article::models::Title;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for creating an article (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateArticleRequest {
    title: String,
    description: String,
    source_url: String,
}

impl CreateArticleRequest {
    fn try_into_command(self) -> Result<CreateArticleCommand, ArticleError> {
        Ok(CreateArticleCommand {
            title: Title::new(self.title)?,
            description: Description::new(self.description)?,
            source_url: SourceUrl::new(self.source_url)?,
        })
    }
}

pub async fn create_article(
    State(state): State<AppState>,
    Extension(CurrentUser(acting)): Extension<CurrentUser>,
    Json(body): Json<CreateArticleRequest>,
) -> Result<ApiSuccess<ArticleResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .article_service
        .create_article(&acting, command)
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::CREATED, article.into()))
}
