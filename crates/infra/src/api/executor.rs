//! Authorized request execution
//!
//! One authorized HTTP request against one of the two fixed API subdomains.
//! Contract per call:
//!
//! - make sure a session exists (no-op when the held one is valid)
//! - attach the bearer credential and JSON headers, execute
//! - on 401, refresh the session exactly once and retry exactly once
//! - any other non-2xx status, and any decode failure, is terminal here;
//!   retries above this layer belong to the poll loop

use std::time::Duration;

use reqwest::{header, Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sockwatch_domain::{Result, SockwatchError};
use tracing::debug;

use crate::auth::SessionManager;
use crate::errors::InfraError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const DEVICE_BASE: &str = "https://user-field-eu-1a2039d9.aylanetworks.com";
const TELEMETRY_BASE: &str = "https://ads-field-eu-1a2039d9.aylanetworks.com";

/// The two fixed, pre-addressed API subdomains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiHost {
    /// General device-management subdomain (user-field)
    Device,
    /// Telemetry subdomain carrying device and property endpoints (ads-field)
    Telemetry,
}

/// Base URLs for the device API
#[derive(Debug, Clone)]
pub struct ApiEndpoints {
    pub device_base: String,
    pub telemetry_base: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            device_base: DEVICE_BASE.to_string(),
            telemetry_base: TELEMETRY_BASE.to_string(),
        }
    }
}

impl ApiEndpoints {
    /// Point both subdomains at one host (mock servers in tests).
    #[must_use]
    pub fn with_base(base: &str) -> Self {
        Self { device_base: base.to_string(), telemetry_base: base.to_string() }
    }

    fn url(&self, host: ApiHost, path: &str) -> String {
        let base = match host {
            ApiHost::Device => &self.device_base,
            ApiHost::Telemetry => &self.telemetry_base,
        };
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Executes authorized requests on behalf of the telemetry client
pub struct RequestExecutor {
    http: Client,
    endpoints: ApiEndpoints,
    session: SessionManager,
}

impl RequestExecutor {
    /// Create an executor over a session manager.
    ///
    /// # Errors
    /// Returns `Internal` if the underlying HTTP client cannot be built.
    pub fn new(endpoints: ApiEndpoints, session: SessionManager) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        headers
            .insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|err| {
                SockwatchError::Internal(format!("failed to build API HTTP client: {err}"))
            })?;

        Ok(Self { http, endpoints, session })
    }

    /// Execute an authorized GET and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(&mut self, host: ApiHost, path: &str) -> Result<T> {
        self.execute(Method::GET, host, path, None).await
    }

    /// Execute an authorized POST with a JSON body and decode the response.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &mut self,
        host: ApiHost,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body).map_err(|err| {
            SockwatchError::Internal(format!("failed to serialize request body: {err}"))
        })?;
        self.execute(Method::POST, host, path, Some(body)).await
    }

    async fn execute<T: DeserializeOwned>(
        &mut self,
        method: Method,
        host: ApiHost,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        self.session.authenticate().await?;

        let url = self.endpoints.url(host, path);
        debug!(%method, %url, "dispatching API request");

        let mut response = self.dispatch(&method, &url, body.as_ref()).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!(%url, "request rejected with 401; refreshing session and retrying once");
            self.session.refresh().await?;
            response = self.dispatch(&method, &url, body.as_ref()).await?;
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SockwatchError::Api { status: status.as_u16(), body });
        }

        response.json::<T>().await.map_err(|err| {
            SockwatchError::Decode(format!("{url} returned an undecodable body: {err}"))
        })
    }

    async fn dispatch(
        &self,
        method: &Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response> {
        let token = self.session.access_token()?;
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(header::AUTHORIZATION, format!("auth_token {token}"));
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|err| {
            let infra: InfraError = err.into();
            infra.into()
        })
    }
}
