//! Authentication primitives
//!
//! Provides the credential and token building blocks used by the services:
//! - Password hashing (Argon2id) with a configurable work factor
//! - Access token issuance and validation (HS256 JWS)
//!
//! Neither component knows about users or storage. Services combine them
//! with their own repositories to authenticate and authorize requests.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::TokenService;
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", Duration::days(7)).unwrap();
//! let token = tokens.issue_access_token(42).unwrap();
//! assert_eq!(tokens.validate(&token).unwrap(), "42");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::AccessClaims;
pub use jwt::TokenError;
pub use jwt::TokenService;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
