use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ArticleResponseData;
use crate::article::errors::ArticleError;
use crate::domain::article::models::ArticleId;
use crate::domain::article::ports::ArticleServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct TransferArticleRequest {
    pub owner_id: i64,
}

pub async fn transfer_article(
    State(state): State<AppState>,
    Extension(CurrentUser(acting)): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<TransferArticleRequest>,
) -> Result<ApiSuccess<ArticleResponseData>, ApiError> {
    let article_id = ArticleId::from_string(&id).map_err(ArticleError::from)?;

    state
        .article_service
        .transfer_article(&acting, &article_id, &UserId(req.owner_id))
        .await
        .map_err(ApiError::from)
        .map(|ref article| ApiSuccess::new(StatusCode::ACCEPTED, article.into()))
}
