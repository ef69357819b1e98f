//! Authenticated session entity
//!
//! A [`Session`] holds the bearer credential used for every device API call,
//! together with the refresh token that can mint its successor. Sessions are
//! created whole by the identity exchange and replaced whole on refresh;
//! nothing outside the session manager ever observes a half-built one.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Access and refresh credentials with expiry metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token attached to every authorized API request
    pub access_token: String,

    /// Refresh token consumed by the next identity exchange
    pub refresh_token: String,

    /// Absolute expiration timestamp (UTC)
    /// Calculated from the backend's `expires_in` at creation time
    pub expires_at: DateTime<Utc>,

    /// Role reported by the device API at sign-in (e.g. "EMEA")
    pub role: String,
}

impl Session {
    /// Create a new `Session` with the expiry computed from a lifetime in
    /// seconds.
    #[must_use]
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        role: String,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: Utc::now() + Duration::seconds(expires_in),
            role,
        }
    }

    /// Check whether the session can still authorize requests.
    ///
    /// A session is valid while its access token is non-empty and its expiry
    /// lies strictly in the future. An expired or token-less session must go
    /// back through the refresh sequence before use.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty() && self.expires_at > Utc::now()
    }

    /// Get seconds until expiry (negative once expired).
    #[must_use]
    pub fn seconds_until_expiry(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_with_future_expiry_is_valid() {
        let session =
            Session::new("access".to_string(), "refresh".to_string(), 3600, "EMEA".to_string());

        assert!(session.is_valid());
        let secs = session.seconds_until_expiry();
        assert!(secs > 3590 && secs <= 3600);
    }

    #[test]
    fn expired_session_is_invalid() {
        let session =
            Session::new("access".to_string(), "refresh".to_string(), -1, "EMEA".to_string());

        assert!(!session.is_valid());
        assert!(session.seconds_until_expiry() < 0);
    }

    #[test]
    fn empty_access_token_is_invalid_even_before_expiry() {
        let session = Session::new(String::new(), "refresh".to_string(), 3600, String::new());

        assert!(!session.is_valid());
    }
}
