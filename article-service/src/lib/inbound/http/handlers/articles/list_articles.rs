use axum::extract::State;
use axum::http::StatusCode;

use super::ArticleResponseData;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_articles(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ArticleResponseData>>, ApiError> {
    state
        .article_service
        .list_articles()
        .await
        .map_err(ApiError::from)
        .map(|articles| {
            ApiSuccess::new(
                StatusCode::OK,
                articles.iter().map(ArticleResponseData::from).collect(),
            )
        })
}
