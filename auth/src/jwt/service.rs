use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AccessClaims;
use super::errors::TokenError;

/// Issues and validates signed, time-limited access tokens.
///
/// Tokens are compact JWS strings signed with HS256. They are stateless:
/// nothing is stored server-side, so a token stays valid until its `exp`.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_lifetime: Duration,
}

impl TokenService {
    /// Minimum accepted length of the signing secret.
    pub const MIN_SECRET_LENGTH: usize = 32;

    /// Create a token service with a signing secret.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `default_lifetime` - Lifetime applied by `issue_access_token`
    ///
    /// # Errors
    /// * `SecretTooShort` - Secret is shorter than 32 bytes
    /// * `LifetimeOutOfRange` - Default lifetime cannot produce a valid expiry
    pub fn new(secret: &[u8], default_lifetime: Duration) -> Result<Self, TokenError> {
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(TokenError::SecretTooShort {
                min: Self::MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }
        if Utc::now().checked_add_signed(default_lifetime).is_none() {
            return Err(TokenError::LifetimeOutOfRange(default_lifetime.to_string()));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            default_lifetime,
        })
    }

    /// Issue an access token for a subject.
    ///
    /// # Arguments
    /// * `subject` - Identifier of the authenticated user
    /// * `lifetime` - Time until the token expires
    ///
    /// # Returns
    /// Signed token string
    ///
    /// # Errors
    /// * `LifetimeOutOfRange` - Expiry overflows the timestamp range
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: impl ToString, lifetime: Duration) -> Result<String, TokenError> {
        let claims = AccessClaims::new(subject, Utc::now(), lifetime)?;
        self.sign(&claims)
    }

    /// Issue an access token with the configured default lifetime.
    pub fn issue_access_token(&self, subject: impl ToString) -> Result<String, TokenError> {
        self.issue(subject, self.default_lifetime)
    }

    /// Sign arbitrary access claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn sign(&self, claims: &AccessClaims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and return its subject.
    ///
    /// Checks run in order: signature, expiry (no leeway), token type.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    ///
    /// # Returns
    /// The `sub` claim
    ///
    /// # Errors
    /// * `Malformed` - Not a decodable token
    /// * `InvalidSignature` - Signature or algorithm mismatch
    /// * `Expired` - `exp` is in the past
    /// * `WrongTokenType` - `type` claim is not `access_token`
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Malformed("empty token".to_string()));
        }

        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &validation)?;
        let claims = token_data.claims;

        if !claims.is_access_token() {
            return Err(TokenError::WrongTokenType(claims.token_type));
        }

        Ok(claims.sub)
    }
}
