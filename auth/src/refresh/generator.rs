use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::RefreshTokenError;

/// Number of random bytes in a refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Produces opaque refresh tokens.
///
/// A token is nothing but OS randomness, hex encoded. It carries no claims,
/// so expiry and revocation always have to be checked against the store.
pub struct RefreshTokenGenerator;

impl RefreshTokenGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate a new refresh token.
    ///
    /// # Returns
    /// 64-character lowercase hex string
    ///
    /// # Errors
    /// * `RandomSourceFailed` - The OS random source could not be read
    pub fn generate(&self) -> Result<String, RefreshTokenError> {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];

        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| RefreshTokenError::RandomSourceFailed(e.to_string()))?;

        Ok(hex::encode(bytes))
    }
}

impl Default for RefreshTokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}
