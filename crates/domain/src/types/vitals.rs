//! Real-time vitals record
//!
//! The aggregate sensor reading carried inside the `REAL_TIME_VITALS`
//! property. The device serializes it as JSON with short field tags and
//! omits tags it has no reading for, so every numeric field defaults to
//! zero.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SockwatchError};
use crate::types::property::Property;

/// One decoded sensor reading from the sock and its base station.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealTimeVitals {
    /// Oxygen saturation, percent
    #[serde(rename = "ox")]
    pub oxygen_saturation: i64,

    /// Heart rate, beats per minute
    #[serde(rename = "hr")]
    pub heart_rate: i64,

    /// Sock battery charge, percent
    #[serde(rename = "bat")]
    pub battery_percentage: i64,

    /// Minutes of sock battery remaining
    #[serde(rename = "btt")]
    pub battery_minutes: i64,

    /// Signal strength between sock and base station
    #[serde(rename = "rsi")]
    pub signal_strength: i64,

    /// Ten-reading oxygen saturation average
    #[serde(rename = "oxta")]
    pub oxygen_ten_av: i64,

    /// Whether the sock is connected
    #[serde(rename = "sc")]
    pub sock_connection: i64,

    /// Sleep state bucket
    #[serde(rename = "ss")]
    pub sleep_state: i64,

    /// Skin temperature, degrees Celsius
    #[serde(rename = "st")]
    pub skin_temperature: i64,

    /// Movement intensity
    #[serde(rename = "mv")]
    pub movement: i64,

    /// Whether alerts are paused
    #[serde(rename = "aps")]
    pub alert_paused_status: i64,

    /// Whether the sock is charging
    #[serde(rename = "chg")]
    pub charging: i64,

    /// Bitmask of currently raised alerts
    #[serde(rename = "alrt")]
    pub alerts_mask: i64,

    /// Firmware update status
    #[serde(rename = "ota")]
    pub update_status: i64,

    /// Sensor reading flags
    #[serde(rename = "srf")]
    pub reading_flags: i64,

    /// Sock brick status
    #[serde(rename = "sb")]
    pub brick_status: i64,

    /// Movement bucket
    #[serde(rename = "mvb")]
    pub movement_bucket: i64,

    /// Wellness alert indicator
    #[serde(rename = "onm")]
    pub wellness_alert: i64,

    /// Monitoring session start, UNIX seconds
    #[serde(rename = "mst")]
    pub monitoring_start_time: i64,

    /// Base station battery status
    #[serde(rename = "bsb")]
    pub base_battery_status: i64,

    /// Whether the base station is on
    #[serde(rename = "bso")]
    pub base_station_on: i64,

    /// Hardware revision string
    #[serde(rename = "hw")]
    pub hardware_version: String,
}

impl RealTimeVitals {
    /// Decode the vitals record out of a property's value payload.
    ///
    /// # Errors
    /// Returns `NotFound` when the property carries no payload and `Decode`
    /// when the payload is not a vitals JSON document.
    pub fn from_property(property: &Property) -> Result<Self> {
        if property.value.is_empty() {
            return Err(SockwatchError::NotFound(format!(
                "property {} has no value payload",
                property.name
            )));
        }

        let payload = property.value.payload();
        serde_json::from_str(&payload).map_err(|err| {
            SockwatchError::Decode(format!(
                "invalid vitals payload in property {}: {err}",
                property.name
            ))
        })
    }
}
