use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::session::errors::SessionError;
use crate::session::models::LoginCommand;
use crate::session::models::NewRefreshToken;
use crate::session::models::RefreshPolicy;
use crate::session::models::RefreshedSession;
use crate::session::models::Session;
use crate::session::models::SessionSettings;
use crate::session::models::UserId;
use crate::session::models::UserProfile;
use crate::session::ports::RefreshTokenStore;
use crate::session::ports::SessionServicePort;
use crate::session::ports::UserDirectory;

/// Domain service implementation for session operations.
///
/// Holds no mutable state of its own. All refresh token state lives in the
/// injected store, so one instance can be shared across every request.
pub struct SessionService<UD, RS>
where
    UD: UserDirectory,
    RS: RefreshTokenStore,
{
    users: Arc<UD>,
    refresh_tokens: Arc<RS>,
    authenticator: Authenticator,
    settings: SessionSettings,
}

impl<UD, RS> SessionService<UD, RS>
where
    UD: UserDirectory,
    RS: RefreshTokenStore,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User lookup implementation
    /// * `refresh_tokens` - Refresh token persistence implementation
    /// * `settings` - Signing secret, token lifetimes, refresh policy and API key
    pub fn new(users: Arc<UD>, refresh_tokens: Arc<RS>, settings: SessionSettings) -> Self {
        Self {
            users,
            refresh_tokens,
            authenticator: Authenticator::new(settings.jwt_secret.as_bytes()),
            settings,
        }
    }

    async fn issue_refresh_token(&self, user_id: UserId) -> Result<String, SessionError> {
        let token = self.authenticator.generate_refresh_token()?;
        let expires_at = Utc::now()
            .checked_add_signed(self.settings.refresh_token_ttl)
            .ok_or_else(|| SessionError::Internal("Refresh token expiry overflows".to_string()))?;

        self.refresh_tokens
            .insert(NewRefreshToken {
                token: token.clone(),
                user_id,
                expires_at,
            })
            .await?;

        Ok(token)
    }
}

#[async_trait]
impl<UD, RS> SessionServicePort for SessionService<UD, RS>
where
    UD: UserDirectory,
    RS: RefreshTokenStore,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let user = match self.users.find_by_email(&command.email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login for unknown email");
                return Err(SessionError::Unauthenticated);
            }
        };

        let access_token = self
            .authenticator
            .authenticate(
                &command.password,
                &user.password_hash,
                user.id.0,
                self.settings.access_token_ttl,
            )?;

        let refresh_token = self.issue_refresh_token(user.id).await?;

        tracing::info!(user_id = %user.id, "Session opened");

        Ok(Session {
            user: UserProfile::from(&user),
            access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedSession, SessionError> {
        let record = self
            .refresh_tokens
            .find(refresh_token)
            .await?
            .ok_or(SessionError::Unauthenticated)?;

        if !record.is_usable(Utc::now()) {
            tracing::debug!(
                user_id = %record.user_id,
                revoked = record.revoked_at.is_some(),
                "Refresh with unusable token"
            );
            return Err(SessionError::Unauthenticated);
        }

        let access_token = self
            .authenticator
            .issue_access_token(record.user_id.0, self.settings.access_token_ttl)?;

        let refresh_token = match self.settings.refresh_policy {
            RefreshPolicy::Reuse => None,
            RefreshPolicy::Rotate => {
                // Only the caller that revokes the presented token gets a successor.
                let revoked = self
                    .refresh_tokens
                    .revoke(&record.token, Utc::now())
                    .await?;
                if !revoked {
                    tracing::warn!(
                        user_id = %record.user_id,
                        "Refresh token already consumed by a concurrent rotation"
                    );
                    return Err(SessionError::Unauthenticated);
                }
                Some(self.issue_refresh_token(record.user_id).await?)
            }
        };

        Ok(RefreshedSession {
            access_token,
            refresh_token,
        })
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError> {
        let revoked = self
            .refresh_tokens
            .revoke(refresh_token, Utc::now())
            .await?;
        tracing::debug!(revoked, "Refresh token revocation requested");
        Ok(())
    }

    fn authenticate(&self, access_token: &str) -> Result<UserId, SessionError> {
        let user_id = self.authenticator.validate_access_token(access_token)?;
        Ok(UserId(user_id))
    }

    fn authorize_api_key(&self, api_key: &str) -> Result<(), SessionError> {
        if api_key == self.settings.api_key {
            Ok(())
        } else {
            tracing::warn!("Rejected service API key");
            Err(SessionError::Unauthenticated)
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, SessionError> {
        Ok(self.authenticator.hash_password(password)?)
    }
}
