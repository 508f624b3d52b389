//! Credential and session-token primitives
//!
//! Provides the building blocks a service needs to authenticate its users:
//! - Password hashing (Argon2id)
//! - Access tokens (HS256 JWTs with issuer, subject, issued-at, expiry)
//! - Opaque refresh tokens (32 random bytes, hex encoded)
//! - Credential extraction from `Authorization` headers
//! - Authentication coordination
//!
//! Nothing here touches storage. Refresh token state lives with whoever
//! persists it; this crate only mints the strings.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::AccessTokenCodec;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let codec = AccessTokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = codec.issue(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(codec.parse(&token).unwrap(), user_id);
//! ```
//!
//! ## Credential Extraction
//! ```
//! use auth::extract_bearer;
//! use http::header::AUTHORIZATION;
//! use http::HeaderMap;
//! use http::HeaderValue;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
//! assert_eq!(extract_bearer(&headers).unwrap(), "abc123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let user_id = Uuid::new_v4();
//! let access_token = auth
//!     .authenticate("password123", &hash, user_id, Duration::hours(1))
//!     .unwrap();
//! let refresh_token = auth.generate_refresh_token().unwrap();
//! assert_eq!(refresh_token.len(), 64);
//!
//! // Validate token
//! assert_eq!(auth.validate_access_token(&access_token).unwrap(), user_id);
//! ```

pub mod authenticator;
pub mod credentials;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use credentials::extract_api_key;
pub use credentials::extract_bearer;
pub use credentials::CredentialError;
pub use jwt::AccessTokenCodec;
pub use jwt::Claims;
pub use jwt::InvalidTokenReason;
pub use jwt::JwtError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::RefreshTokenError;
pub use refresh::RefreshTokenGenerator;
