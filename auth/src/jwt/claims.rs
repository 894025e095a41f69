use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Discriminator carried in the `type` claim of every access token.
pub const ACCESS_TOKEN_TYPE: &str = "access_token";

/// Claims encoded in an access token.
///
/// Serializes to exactly `{type, exp, iat, sub}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Token kind; tokens missing the claim deserialize with an empty type
    #[serde(rename = "type", default)]
    pub token_type: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Subject (user identifier)
    pub sub: String,
}

impl AccessClaims {
    /// Create access token claims for a subject.
    ///
    /// # Arguments
    /// * `subject` - Identifier of the authenticated user
    /// * `issued_at` - Issuance instant
    /// * `lifetime` - Time until the token expires (may be negative)
    ///
    /// # Returns
    /// Claims with type, sub, iat and exp set
    ///
    /// # Errors
    /// * `LifetimeOutOfRange` - Expiry falls outside the representable range
    pub fn new(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, TokenError> {
        let expiration = issued_at
            .checked_add_signed(lifetime)
            .ok_or_else(|| TokenError::LifetimeOutOfRange(lifetime.to_string()))?;

        Ok(Self {
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            exp: expiration.timestamp(),
            iat: issued_at.timestamp(),
            sub: subject.to_string(),
        })
    }

    /// Replace the token type.
    pub fn with_token_type(mut self, token_type: impl ToString) -> Self {
        self.token_type = token_type.to_string();
        self
    }

    /// Check whether the `type` claim marks an access token.
    pub fn is_access_token(&self) -> bool {
        self.token_type == ACCESS_TOKEN_TYPE
    }
}
