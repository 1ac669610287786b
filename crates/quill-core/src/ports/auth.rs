//! Authentication ports.

use uuid::Uuid;

/// Issues and verifies signed, time-limited identity tokens.
pub trait TokenService: Send + Sync {
    /// Issue a token whose subject is `user_id`.
    fn issue(&self, user_id: Uuid) -> Result<String, AuthError>;

    /// Verify signature and expiry, returning the subject user id.
    fn verify(&self, token: &str) -> Result<Uuid, AuthError>;

    /// Token lifetime, reported to clients as `expires_in`.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
