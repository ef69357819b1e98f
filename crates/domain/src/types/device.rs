//! Device snapshot
//!
//! One physical monitor as reported by the device-management API. Fetched
//! once at startup and treated as immutable afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered device, addressed everywhere else by its DSN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Device serial number; addresses all property endpoints
    pub dsn: String,

    #[serde(default)]
    pub product_name: String,

    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub connection_status: String,

    #[serde(default)]
    pub device_type: String,

    /// Firmware version string
    #[serde(default)]
    pub sw_version: String,

    #[serde(default)]
    pub mac: String,

    /// Last time the device connected to the cloud, when reported
    #[serde(default)]
    pub connected_at: Option<DateTime<Utc>>,
}

/// Wire wrapper: the device list endpoint returns `[{"device": {...}}, ...]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceEnvelope {
    pub device: Device,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_device_envelope() {
        let raw = r#"{
            "device": {
                "dsn": "AC000W000000001",
                "product_name": "Smart Sock",
                "model": "SS3",
                "connection_status": "Online",
                "device_type": "Wifi Node",
                "sw_version": "8.0.12",
                "mac": "deadbeef0001",
                "connected_at": "2024-03-01T10:15:00Z"
            }
        }"#;

        let envelope: DeviceEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.device.dsn, "AC000W000000001");
        assert_eq!(envelope.device.model, "SS3");
        assert!(envelope.device.connected_at.is_some());
    }

    #[test]
    fn tolerates_sparse_device_payload() {
        let raw = r#"{"device": {"dsn": "AC000W000000002"}}"#;

        let envelope: DeviceEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.device.dsn, "AC000W000000002");
        assert!(envelope.device.connected_at.is_none());
        assert!(envelope.device.product_name.is_empty());
    }
}
