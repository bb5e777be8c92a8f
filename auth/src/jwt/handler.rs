use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler: issues and verifies bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256). Verification is stateless; nothing
/// is stored per token, so tokens cannot be revoked before `exp`.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Issue a token for a subject, expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `subject` - Identity identifier
    /// * `email` - Identity email
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Signed token together with the claims it carries
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: impl ToString,
        email: impl Into<String>,
        ttl: Duration,
    ) -> Result<(String, Claims), JwtError> {
        let claims = Claims::for_subject(subject, email, ttl);
        let token = self.encode(&claims)?;
        Ok((token, claims))
    }

    /// Decode and validate a token against the current time.
    ///
    /// # Errors
    /// * `TokenExpired` - Current time is at or past `exp`
    /// * `InvalidToken` - Signature is invalid, or token/payload is malformed
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode_at(token, Utc::now().timestamp())
    }

    /// Decode and validate a token against an explicit Unix timestamp.
    pub fn decode_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below so that `exp` itself is already expired
        // and no leeway applies.
        validation.validate_exp = false;
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

        if token_data.claims.is_expired(now) {
            return Err(JwtError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}
