//! Session manager with the identity-exchange state machine
//!
//! Owns the one [`Session`] the daemon runs on. States:
//!
//! - **Unauthenticated**: nothing held yet. `authenticate()` requires
//!   credentials and performs password verification first.
//! - **Pending**: only a refresh token held; the refresh sequence turns it
//!   into a full session.
//! - **Active**: a full session. `authenticate()` is a no-op while it stays
//!   valid.
//!
//! The refresh sequence (secure-token → mini-token → sign-in) commits a
//! wholly new session only after every step succeeds; a failure at any step
//! leaves the previous state untouched so the caller can retry cleanly.

use sockwatch_domain::{Credentials, Result, Session, SockwatchError};
use tracing::{debug, info};

use super::identity::IdentityClient;

#[derive(Debug, Clone)]
enum SessionState {
    Unauthenticated,
    Pending { refresh_token: String },
    Active(Session),
}

/// Owner of the session lifecycle
pub struct SessionManager {
    identity: IdentityClient,
    credentials: Option<Credentials>,
    state: SessionState,
}

impl SessionManager {
    /// Create a manager with no session yet.
    pub fn new(identity: IdentityClient, credentials: Option<Credentials>) -> Self {
        Self { identity, credentials, state: SessionState::Unauthenticated }
    }

    /// Create a manager resuming from a known session.
    pub fn with_session(identity: IdentityClient, session: Session) -> Self {
        Self { identity, credentials: None, state: SessionState::Active(session) }
    }

    /// Whether a full session is currently held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    /// The current session, when one is active.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Active(session) => Some(session),
            _ => None,
        }
    }

    /// Bearer token for the request layer.
    ///
    /// # Errors
    /// Returns `Auth` when no active session is held; callers are expected
    /// to run [`Self::authenticate`] first.
    pub fn access_token(&self) -> Result<&str> {
        match &self.state {
            SessionState::Active(session) => Ok(session.access_token.as_str()),
            _ => Err(SockwatchError::Auth("no active session".to_string())),
        }
    }

    /// Ensure an active, unexpired session exists.
    ///
    /// A no-op while the held session's access token is non-empty and its
    /// expiry is strictly in the future. Fails fast, without any network
    /// call, when neither credentials nor a session are available.
    pub async fn authenticate(&mut self) -> Result<()> {
        if let SessionState::Active(session) = &self.state {
            if session.is_valid() {
                return Ok(());
            }
            debug!("held session expired or incomplete; running refresh sequence");
        }

        if matches!(self.state, SessionState::Unauthenticated) {
            let credentials = self.credentials.as_ref().ok_or_else(|| {
                SockwatchError::Config("email/password not supplied".to_string())
            })?;

            let refresh_token = self.identity.verify_password(credentials).await?;
            self.state = SessionState::Pending { refresh_token };
        }

        self.run_refresh().await
    }

    /// Forced refresh, for a request rejected with 401 despite a
    /// seemingly valid session.
    ///
    /// Falls back to the full authentication path when nothing is held yet.
    pub async fn refresh(&mut self) -> Result<()> {
        if matches!(self.state, SessionState::Unauthenticated) {
            return self.authenticate().await;
        }
        self.run_refresh().await
    }

    /// The three-step refresh sequence. Only a full pass mutates state.
    async fn run_refresh(&mut self) -> Result<()> {
        let refresh_token = match &self.state {
            SessionState::Pending { refresh_token } => refresh_token.clone(),
            SessionState::Active(session) => session.refresh_token.clone(),
            SessionState::Unauthenticated => {
                return Err(SockwatchError::Auth("no refresh token available".to_string()))
            }
        };
        if refresh_token.is_empty() {
            return Err(SockwatchError::Auth("refresh token is empty".to_string()));
        }

        info!("refreshing session tokens");
        let refreshed = self.identity.exchange_refresh_token(&refresh_token).await?;
        let mini_token = self.identity.fetch_mini_token(&refreshed.id_token).await?;
        let sign_in = self.identity.token_sign_in(&mini_token).await?;

        // The sign-in step yields access token, expiry and role; the refresh
        // token that survives is the secure-token step's, which is the one
        // the next refresh consumes.
        let session = Session::new(
            sign_in.access_token,
            refreshed.refresh_token,
            sign_in.expires_in,
            sign_in.role,
        );
        info!(role = %session.role, expires_in = sign_in.expires_in, "session established");
        self.state = SessionState::Active(session);
        Ok(())
    }
}
