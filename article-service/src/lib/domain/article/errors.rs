use thiserror::Error;

use crate::domain::auth::NotPermitted;

/// Error for ArticleId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArticleIdError {
    #[error("Invalid article id: {0}")]
    InvalidFormat(String),
}

/// Error for title and description validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArticleTextError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} too long: maximum {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Error for SourceUrl validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceUrlError {
    #[error("Invalid source URL: {0}")]
    InvalidFormat(String),

    #[error("Unsupported source URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Source URL too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all article-related operations
#[derive(Debug, Clone, Error)]
pub enum ArticleError {
    #[error("Invalid article ID: {0}")]
    InvalidArticleId(#[from] ArticleIdError),

    #[error("Invalid article: {0}")]
    InvalidText(#[from] ArticleTextError),

    #[error("Invalid article: {0}")]
    InvalidSourceUrl(#[from] SourceUrlError),

    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("User not found: {0}")]
    OwnerNotFound(String),

    #[error(transparent)]
    NotPermitted(#[from] NotPermitted),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
