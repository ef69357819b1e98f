//! Telemetry client: domain operations on the device API
//!
//! Thin, typed layer over [`RequestExecutor`]. All operations are single
//! in-flight calls; retries live in the poll loop, reauthentication in the
//! executor.

use std::collections::HashMap;

use sockwatch_domain::constants::{APP_ACTIVE, APP_ACTIVE_VALUE, REAL_TIME_VITALS};
use sockwatch_domain::{
    Datapoint, DatapointEnvelope, Device, DeviceEnvelope, Property, PropertyEnvelope,
    RealTimeVitals, Result, SockwatchError,
};
use tracing::debug;

use super::executor::{ApiHost, RequestExecutor};

/// Domain operations for one account's devices
pub struct TelemetryClient {
    executor: RequestExecutor,
}

impl TelemetryClient {
    /// Create a client over an executor.
    pub fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// List the account's registered devices.
    pub async fn devices(&mut self) -> Result<Vec<Device>> {
        let envelopes: Vec<DeviceEnvelope> =
            self.executor.get(ApiHost::Telemetry, "apiv1/devices.json").await?;
        Ok(envelopes.into_iter().map(|envelope| envelope.device).collect())
    }

    /// Deterministically pick the first registered device.
    ///
    /// # Errors
    /// Returns `NotFound` when the account has no devices; the daemon treats
    /// that as fatal at startup.
    pub async fn first_device(&mut self) -> Result<Device> {
        let mut devices = self.devices().await?;
        if devices.is_empty() {
            return Err(SockwatchError::NotFound(
                "account has no registered devices".to_string(),
            ));
        }
        let device = devices.remove(0);
        debug!(dsn = %device.dsn, model = %device.model, "selected first device");
        Ok(device)
    }

    /// Fetch the full property set for a device, keyed by property name.
    ///
    /// Keys are unique; if the API repeats a name the last entry wins.
    pub async fn properties(&mut self, dsn: &str) -> Result<HashMap<String, Property>> {
        let envelopes: Vec<PropertyEnvelope> = self
            .executor
            .get(ApiHost::Telemetry, &format!("apiv1/dsns/{dsn}/properties.json"))
            .await?;

        let mut properties = HashMap::new();
        for envelope in envelopes {
            if let Some(property) = envelope.property {
                properties.insert(property.name.clone(), property);
            }
        }
        Ok(properties)
    }

    /// Fetch a single named property.
    ///
    /// # Errors
    /// Returns `NotFound` when the device does not expose the channel.
    pub async fn property(&mut self, dsn: &str, name: &str) -> Result<Property> {
        let envelope: PropertyEnvelope = self
            .executor
            .get(ApiHost::Telemetry, &format!("apiv1/dsns/{dsn}/properties/{name}"))
            .await?;

        envelope.property.ok_or_else(|| {
            SockwatchError::NotFound(format!("device {dsn} has no property {name}"))
        })
    }

    /// Fetch and decode the latest real-time vitals record.
    pub async fn real_time_vitals(&mut self, dsn: &str) -> Result<RealTimeVitals> {
        let property = self.property(dsn, REAL_TIME_VITALS).await?;
        RealTimeVitals::from_property(&property)
    }

    /// Post the "app is watching" heartbeat datapoint.
    pub async fn mark_app_active(&mut self, dsn: &str) -> Result<()> {
        let request = DatapointEnvelope {
            datapoint: Datapoint { value: APP_ACTIVE_VALUE, ..Default::default() },
        };

        let _echo: DatapointEnvelope = self
            .executor
            .post(
                ApiHost::Telemetry,
                &format!("apiv1/dsns/{dsn}/properties/{APP_ACTIVE}/datapoints.json"),
                &request,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sockwatch_domain::{PropertyValue, Session};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::executor::ApiEndpoints;
    use crate::auth::{IdentityClient, IdentityEndpoints, SessionManager};

    fn client(server: &MockServer) -> TelemetryClient {
        let identity = IdentityClient::new(IdentityEndpoints::with_base(&server.uri())).unwrap();
        let session =
            Session::new("A0".to_string(), "R1".to_string(), 3600, "EMEA".to_string());
        let manager = SessionManager::with_session(identity, session);
        let executor =
            RequestExecutor::new(ApiEndpoints::with_base(&server.uri()), manager).unwrap();
        TelemetryClient::new(executor)
    }

    fn device_list() -> serde_json::Value {
        serde_json::json!([
            {"device": {"dsn": "AC000W000000001", "model": "SS3", "connection_status": "Online"}},
            {"device": {"dsn": "AC000W000000002", "model": "SS3"}}
        ])
    }

    #[tokio::test]
    async fn devices_unwraps_every_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/apiv1/devices.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(device_list()))
            .mount(&server)
            .await;

        let devices = client(&server).devices().await.unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].dsn, "AC000W000000001");
        assert_eq!(devices[1].dsn, "AC000W000000002");
    }

    #[tokio::test]
    async fn first_device_selection_is_deterministic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/apiv1/devices.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(device_list()))
            .mount(&server)
            .await;

        let device = client(&server).first_device().await.unwrap();
        assert_eq!(device.dsn, "AC000W000000001");
    }

    #[tokio::test]
    async fn empty_device_list_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/apiv1/devices.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let err = client(&server).first_device().await.unwrap_err();
        assert!(matches!(err, SockwatchError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_property_names_keep_the_last_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/apiv1/dsns/AC000W000000001/properties.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"property": {"name": "BATT_LEVEL", "value": "41"}},
                {"property": {"name": "HEART_RATE", "value": "120"}},
                {"property": {"name": "BATT_LEVEL", "value": "57"}}
            ])))
            .mount(&server)
            .await;

        let properties = client(&server).properties("AC000W000000001").await.unwrap();

        assert_eq!(properties.len(), 2);
        assert_eq!(
            properties["BATT_LEVEL"].value,
            PropertyValue::Text("57".to_string())
        );
    }

    #[tokio::test]
    async fn vitals_decode_from_the_named_property() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/apiv1/dsns/AC000W000000001/properties/REAL_TIME_VITALS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "property": {
                    "name": "REAL_TIME_VITALS",
                    "base_type": "string",
                    "value": "{\"ox\":99,\"hr\":131,\"chg\":0}",
                    "data_updated_at": "null"
                }
            })))
            .mount(&server)
            .await;

        let vitals = client(&server).real_time_vitals("AC000W000000001").await.unwrap();
        assert_eq!(vitals.oxygen_saturation, 99);
        assert_eq!(vitals.heart_rate, 131);
    }

    #[tokio::test]
    async fn absent_vitals_property_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/apiv1/dsns/AC000W000000001/properties/REAL_TIME_VITALS"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "property": null })),
            )
            .mount(&server)
            .await;

        let err = client(&server).real_time_vitals("AC000W000000001").await.unwrap_err();
        assert!(matches!(err, SockwatchError::NotFound(_)));
    }

    #[tokio::test]
    async fn heartbeat_posts_a_value_one_datapoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/apiv1/dsns/AC000W000000001/properties/APP_ACTIVE/datapoints.json"))
            .and(body_json(serde_json::json!({"datapoint": {"value": 1}})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "datapoint": {"value": 1, "updated_at": "2024-03-01T10:15:30Z"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).mark_app_active("AC000W000000001").await.unwrap();
    }
}
