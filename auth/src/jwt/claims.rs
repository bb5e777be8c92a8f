use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Bearer token payload.
///
/// Binds a token to one identity (`sub` + `email`) for a fixed window
/// `[iat, exp)`. Timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Email the identity registered with
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject, valid from now for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Unique identity identifier
    /// * `email` - Identity email
    /// * `ttl` - Time until the token expires
    ///
    /// # Returns
    /// Claims with sub, email, iat and exp set
    pub fn for_subject(subject: impl ToString, email: impl Into<String>, ttl: Duration) -> Self {
        Self::issued_at(subject, email, Utc::now(), ttl)
    }

    /// Create claims with an explicit issue instant.
    ///
    /// An expiry past the representable range is clamped to the latest
    /// representable instant.
    pub fn issued_at(
        subject: impl ToString,
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let expiration = issued_at
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            sub: subject.to_string(),
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if token is expired.
    ///
    /// A token stops being valid at the `exp` second itself.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
