use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::session::errors::SessionError;
use crate::session::errors::StoreError;
use crate::session::models::EmailAddress;
use crate::session::models::LoginCommand;
use crate::session::models::NewRefreshToken;
use crate::session::models::RefreshTokenRecord;
use crate::session::models::RefreshedSession;
use crate::session::models::Session;
use crate::session::models::UserId;
use crate::session::models::UserRecord;

/// Port for session operations called by request handlers.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify an email and password and open a session.
    ///
    /// # Returns
    /// Access token, refresh token and the user's public profile
    ///
    /// # Errors
    /// * `Unauthenticated` - Unknown email or wrong password
    /// * `Internal` - Token issuance or persistence failed
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Exchange a refresh token for a new access token.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token unknown, revoked or expired
    /// * `Internal` - Token issuance or persistence failed
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedSession, SessionError>;

    /// Revoke a refresh token.
    ///
    /// Unknown and already revoked tokens succeed as well.
    ///
    /// # Errors
    /// * `Internal` - The store could not be updated
    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError>;

    /// Validate an access token and return the user it belongs to.
    ///
    /// # Errors
    /// * `Unauthenticated` - Token is invalid or expired
    fn authenticate(&self, access_token: &str) -> Result<UserId, SessionError>;

    /// Check a service API key against the configured one.
    ///
    /// # Errors
    /// * `Unauthenticated` - Key does not match
    fn authorize_api_key(&self, api_key: &str) -> Result<(), SessionError>;

    /// Hash a password for the user directory to store.
    ///
    /// # Errors
    /// * `Internal` - Hashing failed
    fn hash_password(&self, password: &str) -> Result<String, SessionError>;
}

/// Read access to user records, owned by another part of the system.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Retrieve a user by email address.
    ///
    /// # Returns
    /// Optional user record (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<UserRecord>, StoreError>;
}

/// Persistence operations for refresh token state.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + 'static {
    /// Persist a newly issued refresh token.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, token: NewRefreshToken) -> Result<(), StoreError>;

    /// Retrieve refresh token state.
    ///
    /// # Returns
    /// Optional record (None if the token was never issued or has been purged)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find(&self, token: &str) -> Result<Option<RefreshTokenRecord>, StoreError>;

    /// Mark a refresh token revoked.
    ///
    /// Must succeed for unknown or already revoked tokens without changing them.
    /// The check and the update are a single atomic step.
    ///
    /// # Returns
    /// `true` only if this call moved the token from active to revoked
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<bool, StoreError>;
}
