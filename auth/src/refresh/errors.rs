use thiserror::Error;

/// Error type for refresh token generation.
#[derive(Debug, Clone, Error)]
pub enum RefreshTokenError {
    #[error("Random source failed: {0}")]
    RandomSourceFailed(String),
}
