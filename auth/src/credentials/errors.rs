use thiserror::Error;

/// Error type for credential extraction from request headers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("Authorization header not found")]
    MissingHeader,

    #[error("Authorization header is not valid text")]
    InvalidHeaderValue,

    #[error("Authorization header does not use the {0} scheme")]
    MissingScheme(&'static str),

    #[error("Authorization header carries no credential")]
    EmptyCredential,
}
