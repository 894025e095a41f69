use thiserror::Error;

/// Error type for password operations.
///
/// Verification never produces an error: a malformed stored hash is reported
/// as a failed match.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid hashing cost: {0}")]
    InvalidCost(String),
}
