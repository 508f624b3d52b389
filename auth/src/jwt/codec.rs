use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::claims::ISSUER;
use super::errors::InvalidTokenReason;
use super::errors::JwtError;

/// Default lifetime of an access token, in seconds.
pub const DEFAULT_ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 60;

/// Issues and parses access tokens.
///
/// Tokens are HS256-signed JWTs carrying [`Claims`]. The signing secret is
/// fixed when the codec is built and never changes afterwards.
pub struct AccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AccessTokenCodec {
    /// Create a new codec with a signing secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration at startup, never from code
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a signed access token for a user.
    ///
    /// # Arguments
    /// * `user_id` - Subject of the token
    /// * `ttl` - Time until the token expires, measured from now
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<String, JwtError> {
        let claims = Claims::for_user(user_id, Utc::now(), ttl);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Verify a token and return the user it was issued for.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, wrong issuer, expired, or a subject
    ///   that is not a user identifier
    pub fn parse(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims = self.decode(token)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(InvalidTokenReason::Expired.into());
        }

        claims
            .user_id()
            .map_err(|e| InvalidTokenReason::BadSubject(e.to_string()).into())
    }

    fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => InvalidTokenReason::Expired,
                    ErrorKind::InvalidSignature => InvalidTokenReason::BadSignature,
                    ErrorKind::InvalidIssuer => InvalidTokenReason::BadIssuer,
                    _ => InvalidTokenReason::Malformed(e.to_string()),
                };
                JwtError::InvalidToken(reason)
            })
    }
}
