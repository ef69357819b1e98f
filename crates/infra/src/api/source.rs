//! Poll-loop source adapter for one device
//!
//! Bridges [`TelemetryClient`] to the core `VitalsSource` port, pinned to
//! the device selected at startup. The fetch mode mirrors the two deployed
//! variants: reading the single vitals property directly, or pulling the
//! whole property set and picking the vitals entry out of it. In both modes
//! a missing vitals channel surfaces as `NotFound`, which the poll loop
//! retries exactly like a transport failure.

use async_trait::async_trait;
use sockwatch_core::VitalsSource;
use sockwatch_domain::constants::REAL_TIME_VITALS;
use sockwatch_domain::{FetchMode, RealTimeVitals, Result, SockwatchError};

use super::client::TelemetryClient;

/// `VitalsSource` implementation for one DSN
pub struct DeviceVitalsSource {
    client: TelemetryClient,
    dsn: String,
    mode: FetchMode,
}

impl DeviceVitalsSource {
    /// Pin a client to one device.
    pub fn new(client: TelemetryClient, dsn: impl Into<String>, mode: FetchMode) -> Self {
        Self { client, dsn: dsn.into(), mode }
    }
}

#[async_trait]
impl VitalsSource for DeviceVitalsSource {
    async fn latest_vitals(&mut self) -> Result<RealTimeVitals> {
        match self.mode {
            FetchMode::VitalsProperty => self.client.real_time_vitals(&self.dsn).await,
            FetchMode::PropertySet => {
                let properties = self.client.properties(&self.dsn).await?;
                let property = properties.get(REAL_TIME_VITALS).ok_or_else(|| {
                    SockwatchError::NotFound(format!(
                        "device {} reported no {REAL_TIME_VITALS} property",
                        self.dsn
                    ))
                })?;
                RealTimeVitals::from_property(property)
            }
        }
    }

    async fn mark_active(&mut self) -> Result<()> {
        self.client.mark_app_active(&self.dsn).await
    }
}

#[cfg(test)]
mod tests {
    use sockwatch_domain::Session;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::executor::{ApiEndpoints, RequestExecutor};
    use crate::auth::{IdentityClient, IdentityEndpoints, SessionManager};

    fn source(server: &MockServer, mode: FetchMode) -> DeviceVitalsSource {
        let identity = IdentityClient::new(IdentityEndpoints::with_base(&server.uri())).unwrap();
        let session =
            Session::new("A0".to_string(), "R1".to_string(), 3600, "EMEA".to_string());
        let manager = SessionManager::with_session(identity, session);
        let executor =
            RequestExecutor::new(ApiEndpoints::with_base(&server.uri()), manager).unwrap();
        DeviceVitalsSource::new(TelemetryClient::new(executor), "AC000W000000001", mode)
    }

    #[tokio::test]
    async fn property_set_mode_picks_the_vitals_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/apiv1/dsns/AC000W000000001/properties.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"property": {"name": "BATT_LEVEL", "value": "57"}},
                {"property": {"name": "REAL_TIME_VITALS", "value": "{\"hr\":125,\"ox\":98}"}}
            ])))
            .mount(&server)
            .await;

        let vitals = source(&server, FetchMode::PropertySet).latest_vitals().await.unwrap();
        assert_eq!(vitals.heart_rate, 125);
        assert_eq!(vitals.oxygen_saturation, 98);
    }

    #[tokio::test]
    async fn property_set_mode_treats_missing_vitals_as_retryable_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/apiv1/dsns/AC000W000000001/properties.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"property": {"name": "BATT_LEVEL", "value": "57"}}
            ])))
            .mount(&server)
            .await;

        let err = source(&server, FetchMode::PropertySet).latest_vitals().await.unwrap_err();
        assert!(matches!(err, SockwatchError::NotFound(_)));
    }

    #[tokio::test]
    async fn direct_mode_fetches_the_single_property() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/apiv1/dsns/AC000W000000001/properties/REAL_TIME_VITALS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "property": {"name": "REAL_TIME_VITALS", "value": "{\"hr\":118}"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let vitals = source(&server, FetchMode::VitalsProperty).latest_vitals().await.unwrap();
        assert_eq!(vitals.heart_rate, 118);
    }
}
