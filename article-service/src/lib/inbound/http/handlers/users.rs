use serde::Serialize;

use super::articles::ArticleResponseData;
use crate::domain::article::models::Article;
use crate::domain::user::models::User;

pub mod create_user;
pub mod delete_user;
pub mod get_current_user;
pub mod get_user;
pub mod list_users;
pub mod update_user;

/// Public view of a user. The password hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponseData {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&User> for UserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            is_admin: user.is_admin,
        }
    }
}

/// User view including the articles they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserWithArticlesResponseData {
    #[serde(flatten)]
    pub user: UserResponseData,
    pub articles: Vec<ArticleResponseData>,
}

impl UserWithArticlesResponseData {
    pub fn new(user: &User, articles: &[Article]) -> Self {
        Self {
            user: user.into(),
            articles: articles.iter().map(ArticleResponseData::from).collect(),
        }
    }
}
