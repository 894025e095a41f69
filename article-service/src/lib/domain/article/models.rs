use std::fmt;

use url::Url;

use crate::domain::article::errors::ArticleIdError;
use crate::domain::article::errors::ArticleTextError;
use crate::domain::article::errors::SourceUrlError;
use crate::domain::user::models::UserId;

/// Article aggregate entity.
///
/// Every article belongs to exactly one user, its owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: ArticleId,
    pub title: Title,
    pub description: Description,
    pub source_url: SourceUrl,
    pub owner_id: UserId,
}

/// Article unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleId(pub i64);

impl ArticleId {
    /// Parse an article ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid integer
    pub fn from_string(s: &str) -> Result<Self, ArticleIdError> {
        s.parse::<i64>()
            .map(ArticleId)
            .map_err(|e| ArticleIdError::InvalidFormat(format!("{:?}: {}", s, e)))
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

const MAX_TEXT_LENGTH: usize = 256;

fn validated_text(field: &'static str, text: String) -> Result<String, ArticleTextError> {
    let text = text.trim().to_string();
    let length = text.chars().count();

    if length == 0 {
        Err(ArticleTextError::Empty { field })
    } else if length > MAX_TEXT_LENGTH {
        Err(ArticleTextError::TooLong {
            field,
            max: MAX_TEXT_LENGTH,
            actual: length,
        })
    } else {
        Ok(text)
    }
}

/// Article title (1-256 characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    pub fn new(title: String) -> Result<Self, ArticleTextError> {
        validated_text("Title", title).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Article description (1-256 characters).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    pub fn new(description: String) -> Result<Self, ArticleTextError> {
        validated_text("Description", description).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Absolute http(s) URL the article was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrl(String);

impl SourceUrl {
    const MAX_LENGTH: usize = 256;

    /// Create a validated source URL.
    ///
    /// The stored form is the normalized serialization of the parsed URL.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not an absolute URL
    /// * `UnsupportedScheme` - Scheme other than http or https
    /// * `TooLong` - Normalized URL longer than 256 characters
    pub fn new(url: String) -> Result<Self, SourceUrlError> {
        let parsed =
            Url::parse(url.trim()).map_err(|e| SourceUrlError::InvalidFormat(e.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SourceUrlError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        let normalized = parsed.to_string();
        let length = normalized.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(SourceUrlError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Article about to be persisted; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub title: Title,
    pub description: Description,
    pub source_url: SourceUrl,
    pub owner_id: UserId,
}

/// Command to create an article. The owner is always the acting user.
#[derive(Debug)]
pub struct CreateArticleCommand {
    pub title: Title,
    pub description: Description,
    pub source_url: SourceUrl,
}

/// Command to edit an article's content.
///
/// Ownership is deliberately absent: it changes only through a transfer.
#[derive(Debug, Default)]
pub struct UpdateArticleCommand {
    pub title: Option<Title>,
    pub description: Option<Description>,
    pub source_url: Option<SourceUrl>,
}
