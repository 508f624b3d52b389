use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash could not be decoded or uses unsupported parameters.
    /// A wrong password is not an error; see [`super::PasswordHasher::verify`].
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
