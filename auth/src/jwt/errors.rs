use thiserror::Error;

/// Error type for access token operations.
///
/// Parsing failures all surface as `InvalidToken` so callers can't tell them
/// apart. The reason is kept for server-side logging only.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is invalid: {0}")]
    InvalidToken(InvalidTokenReason),
}

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTokenReason {
    #[error("token is expired")]
    Expired,

    #[error("signature does not match")]
    BadSignature,

    #[error("unexpected issuer")]
    BadIssuer,

    #[error("subject is not a user identifier: {0}")]
    BadSubject(String),

    #[error("malformed token: {0}")]
    Malformed(String),
}

impl From<InvalidTokenReason> for JwtError {
    fn from(reason: InvalidTokenReason) -> Self {
        JwtError::InvalidToken(reason)
    }
}
