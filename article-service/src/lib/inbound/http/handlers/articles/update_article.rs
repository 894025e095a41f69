use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ArticleResponseData;
use crate::article::errors::ArticleError;
use crate::domain::article::models::ArticleId;
use crate::domain::article::models::Description;
use crate::domain::article::models::SourceUrl;
use crate::domain::article::models::Title;
use crate::domain::article::models::UpdateArticleCommand;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// HTTP request body for editing an article (raw JSON).
///
/// Unknown fields such as `owner_id` are ignored; ownership moves only
/// through the transfer endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub source_url: Option<String>,
}

impl UpdateArticleRequest {
    fn try_into_command(self) -> Result<UpdateArticleCommand, ArticleError> {
        Ok(UpdateArticleCommand {
            title: self.title.map(Title::new).transpose()?,
            description: self.description.map(Description::new).transpose()?,
            source_url: self.source_url.map(SourceUrl::new).transpose()?,
        })
    }
}

pub async fn update_article(
    State(state): State<AppState>,
    Extension(CurrentUser(acting)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateArticleRequest>,
) -> Result<ApiSuccess<ArticleResponseData>, ApiError> {
    let article_id = ArticleId::from_string(&id).map_err(ArticleError::from)?;
    let command = req.try_into_command()?;

    state
        .article_service
        .update_article(&acting, &article_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::ACCEPTED, article.into()))
}
