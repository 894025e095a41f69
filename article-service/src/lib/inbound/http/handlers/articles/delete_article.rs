use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::article::errors::ArticleError;
use crate::domain::article::models::ArticleId;
use crate::domain::article::ports::ArticleServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn delete_article(
    State(state): State<AppState>,
    Extension(CurrentUser(acting)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let article_id = ArticleId::from_string(&id).map_err(ArticleError::from)?;

    state
        .article_service
        .delete_article(&acting, &article_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
