//! Identity exchange wire calls
//!
//! The four HTTP calls that turn account credentials into a device API
//! session:
//!
//! 1. password verification → identity refresh token
//! 2. secure-token exchange → fresh refresh token + short-lived id token
//! 3. mini-token fetch → provider-specific intermediate credential
//! 4. token sign-in → device API access token, expiry and role
//!
//! Each call either yields its typed response or a typed error; no state is
//! kept here. The [`super::manager::SessionManager`] sequences the calls.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use sockwatch_domain::{Credentials, Result, SockwatchError};
use tracing::debug;

use super::endpoints::{IdentityEndpoints, PROVIDER};
use crate::errors::InfraError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Tokens produced by the secure-token exchange
#[derive(Debug, Deserialize)]
pub struct RefreshedTokens {
    pub refresh_token: String,
    pub id_token: String,
}

/// Final response of the token sign-in step
#[derive(Debug, Deserialize)]
pub struct SignIn {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Deserialize)]
struct VerifyPassword {
    #[serde(rename = "refreshToken")]
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct MiniToken {
    mini_token: String,
}

/// HTTP client for the identity backend
pub struct IdentityClient {
    http: Client,
    endpoints: IdentityEndpoints,
}

impl IdentityClient {
    /// Create a client for the given endpoint set.
    ///
    /// # Errors
    /// Returns `Internal` if the underlying HTTP client cannot be built.
    pub fn new(endpoints: IdentityEndpoints) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build().map_err(|err| {
            SockwatchError::Internal(format!("failed to build identity HTTP client: {err}"))
        })?;

        Ok(Self { http, endpoints })
    }

    /// Verify account credentials, yielding the identity refresh token.
    pub async fn verify_password(&self, credentials: &Credentials) -> Result<String> {
        debug!(email = %credentials.email, "verifying password against identity backend");

        let body = json!({
            "email": credentials.email,
            "password": credentials.password,
            "returnSecureToken": true,
        });

        let response = self
            .send(self.platform_request(self.http.post(self.endpoints.verify_password_url())).json(&body))
            .await?;
        Self::ensure_success("password verification", response.status())?;

        let verified: VerifyPassword = Self::decode("password verification", response).await?;
        Ok(verified.refresh_token)
    }

    /// Exchange a refresh token for a fresh refresh token and an id token.
    pub async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<RefreshedTokens> {
        debug!("exchanging refresh token at secure-token endpoint");

        let body = json!({
            "grantType": "refresh_token",
            "refreshToken": refresh_token,
        });

        let response = self
            .send(self.platform_request(self.http.post(self.endpoints.secure_token_url())).json(&body))
            .await?;
        Self::ensure_success("secure-token exchange", response.status())?;

        Self::decode("secure-token exchange", response).await
    }

    /// Trade an id token for the provider-specific mini token.
    ///
    /// The SSO endpoint expects the raw id token as the Authorization value,
    /// without a scheme prefix.
    pub async fn fetch_mini_token(&self, id_token: &str) -> Result<String> {
        debug!("fetching mini token");

        let response = self
            .send(
                self.http
                    .get(self.endpoints.mini_token_url())
                    .header(reqwest::header::ACCEPT, "application/json")
                    .header(reqwest::header::AUTHORIZATION, id_token),
            )
            .await?;
        Self::ensure_success("mini-token fetch", response.status())?;

        let mini: MiniToken = Self::decode("mini-token fetch", response).await?;
        Ok(mini.mini_token)
    }

    /// Exchange the mini token plus app credentials for a device API session.
    pub async fn token_sign_in(&self, mini_token: &str) -> Result<SignIn> {
        debug!("signing in to device API");

        let body = json!({
            "app_id": self.endpoints.app_id,
            "app_secret": self.endpoints.app_secret,
            "provider": PROVIDER,
            "token": mini_token,
        });

        let response = self
            .send(
                self.http
                    .post(self.endpoints.token_sign_in_url())
                    .header(reqwest::header::ACCEPT, "application/json")
                    .json(&body),
            )
            .await?;
        Self::ensure_success("token sign-in", response.status())?;

        // Keep the raw body around: a malformed sign-in response is the one
        // decode failure worth reading verbatim in the logs.
        let raw = response.text().await.map_err(|err| {
            let infra: InfraError = err.into();
            SockwatchError::from(infra)
        })?;
        serde_json::from_str(&raw).map_err(|err| {
            SockwatchError::Decode(format!("token sign-in response was not valid ({err}): {raw}"))
        })
    }

    fn platform_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(reqwest::header::ACCEPT, "application/json")
            .header("X-Android-Package", &self.endpoints.android_package)
            .header("X-Android-Cert", &self.endpoints.android_cert)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|err| {
            let infra: InfraError = err.into();
            infra.into()
        })
    }

    fn ensure_success(step: &str, status: StatusCode) -> Result<()> {
        if status.is_success() {
            Ok(())
        } else {
            Err(SockwatchError::Auth(format!("{step} failed with status {}", status.as_u16())))
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(step: &str, response: Response) -> Result<T> {
        response.json::<T>().await.map_err(|err| {
            SockwatchError::Decode(format!("{step} returned an undecodable body: {err}"))
        })
    }
}
