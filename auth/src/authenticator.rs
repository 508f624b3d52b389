use chrono::Duration;
use uuid::Uuid;

use crate::jwt::AccessTokenCodec;
use crate::jwt::JwtError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::refresh::RefreshTokenError;
use crate::refresh::RefreshTokenGenerator;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the hasher, the access token codec and the refresh token generator
/// so services only carry one value built from the signing secret.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    access_tokens: AccessTokenCodec,
    refresh_tokens: RefreshTokenGenerator,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for access token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            access_tokens: AccessTokenCodec::new(jwt_secret),
            refresh_tokens: RefreshTokenGenerator::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Subject of the issued token
    /// * `ttl` - Lifetime of the issued token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: Uuid,
        ttl: Duration,
    ) -> Result<String, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.access_tokens.issue(user_id, ttl)?)
    }

    /// Issue an access token without password verification.
    ///
    /// Used by the refresh flow, where the refresh token already proved
    /// who the caller is.
    pub fn issue_access_token(&self, user_id: Uuid, ttl: Duration) -> Result<String, JwtError> {
        self.access_tokens.issue(user_id, ttl)
    }

    /// Validate an access token and return its subject.
    pub fn validate_access_token(&self, token: &str) -> Result<Uuid, JwtError> {
        self.access_tokens.parse(token)
    }

    /// Generate a new opaque refresh token.
    pub fn generate_refresh_token(&self) -> Result<String, RefreshTokenError> {
        self.refresh_tokens.generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_success() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let user_id = Uuid::new_v4();
        let token = authenticator
            .authenticate(password, &hash, user_id, Duration::hours(1))
            .expect("Authentication failed");

        assert!(!token.is_empty());

        let subject = authenticator
            .validate_access_token(&token)
            .expect("Token validation failed");
        assert_eq!(subject, user_id);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result =
            authenticator.authenticate("wrong_password", &hash, Uuid::new_v4(), Duration::hours(1));
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_hash() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        let result =
            authenticator.authenticate("password", "not-a-hash", Uuid::new_v4(), Duration::hours(1));
        assert!(matches!(result, Err(AuthenticationError::PasswordError(_))));
    }

    #[test]
    fn test_issue_and_validate_access_token() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");
        let user_id = Uuid::new_v4();

        let token = authenticator
            .issue_access_token(user_id, Duration::minutes(5))
            .expect("Failed to issue token");

        assert_eq!(authenticator.validate_access_token(&token).unwrap(), user_id);
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");

        let result = authenticator.validate_access_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_refresh_token() {
        let authenticator = Authenticator::new(b"test_secret_key_at_least_32_bytes!");
        let token = authenticator.generate_refresh_token().unwrap();
        assert_eq!(token.len(), 64);
    }
}
