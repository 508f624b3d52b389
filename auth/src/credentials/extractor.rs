use http::header::AUTHORIZATION;
use http::HeaderMap;

use super::errors::CredentialError;

/// Scheme token for access and refresh tokens.
pub const BEARER_SCHEME: &str = "Bearer";

/// Scheme token for the service API key.
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme match is case-sensitive and no space is required after it;
/// whitespace around the token is trimmed.
///
/// # Errors
/// * `MissingHeader` - No Authorization header
/// * `InvalidHeaderValue` - Header value is not visible ASCII
/// * `MissingScheme` - Value does not start with `Bearer`
/// * `EmptyCredential` - Nothing follows the scheme
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, CredentialError> {
    extract_scheme(headers, BEARER_SCHEME)
}

/// Extract the key from an `Authorization: ApiKey <key>` header.
///
/// Same rules as [`extract_bearer`], with the `ApiKey` scheme.
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, CredentialError> {
    extract_scheme(headers, API_KEY_SCHEME)
}

fn extract_scheme<'a>(
    headers: &'a HeaderMap,
    scheme: &'static str,
) -> Result<&'a str, CredentialError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(CredentialError::MissingHeader)?
        .to_str()
        .map_err(|_| CredentialError::InvalidHeaderValue)?;

    let credential = value
        .strip_prefix(scheme)
        .ok_or(CredentialError::MissingScheme(scheme))?
        .trim();

    if credential.is_empty() {
        return Err(CredentialError::EmptyCredential);
    }

    Ok(credential)
}
