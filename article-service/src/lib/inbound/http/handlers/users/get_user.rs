use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::UserWithArticlesResponseData;
use crate::domain::article::ports::ArticleServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Fetch a user, then their articles with a second lookup.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserWithArticlesResponseData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    let user = state.user_service.get_user(&user_id).await?;
    let articles = state
        .article_service
        .list_articles_by_owner(&user.id)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UserWithArticlesResponseData::new(&user, &articles),
    ))
}
