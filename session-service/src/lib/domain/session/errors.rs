use auth::AuthenticationError;
use auth::CredentialError;
use auth::JwtError;
use auth::PasswordError;
use auth::RefreshTokenError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Failure reported by a persistence collaborator.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Stored record is corrupt: {0}")]
    CorruptRecord(String),
}

/// Top-level error for session operations.
///
/// Every lower-level failure is classified into one of three outcomes.
/// `Unauthenticated` never says why; `Internal` carries a cause for the
/// server log that must not reach the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<EmailError> for SessionError {
    fn from(err: EmailError) -> Self {
        SessionError::InvalidInput(err.to_string())
    }
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Session store call failed");
        SessionError::Internal(err.to_string())
    }
}

impl From<CredentialError> for SessionError {
    fn from(err: CredentialError) -> Self {
        tracing::debug!(error = %err, "Rejected request credentials");
        SessionError::Unauthenticated
    }
}

impl From<PasswordError> for SessionError {
    fn from(err: PasswordError) -> Self {
        tracing::error!(error = %err, "Password hashing failed");
        SessionError::Internal(err.to_string())
    }
}

impl From<RefreshTokenError> for SessionError {
    fn from(err: RefreshTokenError) -> Self {
        tracing::error!(error = %err, "Refresh token generation failed");
        SessionError::Internal(err.to_string())
    }
}

impl From<JwtError> for SessionError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::InvalidToken(reason) => {
                tracing::debug!(reason = %reason, "Rejected access token");
                SessionError::Unauthenticated
            }
            JwtError::SigningFailed(cause) => {
                tracing::error!(error = %cause, "Access token signing failed");
                SessionError::Internal(cause)
            }
        }
    }
}

impl From<AuthenticationError> for SessionError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => {
                tracing::debug!("Password did not match stored hash");
                SessionError::Unauthenticated
            }
            // A corrupt stored hash still answers as a failed login so the
            // response can't be used to probe which emails exist.
            AuthenticationError::PasswordError(e) => {
                tracing::error!(error = %e, "Stored password hash could not be verified");
                SessionError::Unauthenticated
            }
            AuthenticationError::JwtError(e) => e.into(),
        }
    }
}
