//! Telemetry property snapshots
//!
//! One [`Property`] is a single named telemetry or control channel on a
//! device. The API is loose about two fields and both get explicit codecs
//! here:
//!
//! - `value` arrives as a JSON string, a raw JSON structure, or null,
//!   depending on the channel. [`PropertyValue`] keeps the distinction as a
//!   tagged variant and exposes a uniform textual payload for downstream
//!   re-decoding.
//! - `data_updated_at` is sometimes the literal string `"null"` instead of a
//!   timestamp; that decodes to absent rather than an error.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The polymorphic value of one telemetry channel.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PropertyValue {
    /// JSON null: the channel has no reading yet
    #[default]
    Empty,
    /// A plain JSON string
    Text(String),
    /// Any other JSON shape (object, array, number, bool), kept as parsed JSON
    Structured(serde_json::Value),
}

impl PropertyValue {
    /// Classify a raw JSON value by its shape.
    #[must_use]
    pub fn decode(raw: serde_json::Value) -> Self {
        match raw {
            serde_json::Value::Null => Self::Empty,
            serde_json::Value::String(text) => Self::Text(text),
            other => Self::Structured(other),
        }
    }

    /// Uniform textual payload for downstream handling.
    ///
    /// Null decodes to an empty payload, strings pass through unchanged, and
    /// structured values yield their serialized JSON form.
    #[must_use]
    pub fn payload(&self) -> Cow<'_, str> {
        match self {
            Self::Empty => Cow::Borrowed(""),
            Self::Text(text) => Cow::Borrowed(text.as_str()),
            // Serializing an in-memory Value cannot fail.
            Self::Structured(value) => Cow::Owned(value.to_string()),
        }
    }

    /// True when the channel carried no reading.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty) || matches!(self, Self::Text(text) if text.is_empty())
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::decode(raw))
    }
}

impl Serialize for PropertyValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Empty => serializer.serialize_unit(),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Structured(value) => value.serialize(serializer),
        }
    }
}

/// Codec for timestamp fields that may carry the literal string `"null"`.
pub mod flex_timestamp {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(instant) => serializer.serialize_str(&instant.to_rfc3339()),
            None => serializer.serialize_unit(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(text) if text == "null" => Ok(None),
            Some(text) => text
                .parse::<DateTime<Utc>>()
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// One named telemetry channel as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    /// Numeric property key assigned by the backend
    #[serde(default)]
    pub key: i64,

    #[serde(default)]
    pub base_type: String,

    pub name: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub value: PropertyValue,

    /// Last update instant; absent when the backend reports `"null"`
    #[serde(rename = "data_updated_at", default, with = "flex_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Wire wrapper: property endpoints return `{"property": {...}}` entries,
/// with null standing in for a channel the device does not expose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyEnvelope {
    pub property: Option<Property>,
}

/// One value written to (or echoed back from) a property.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Datapoint {
    pub value: i64,

    #[serde(default, skip_serializing_if = "std::collections::HashMap::is_empty")]
    pub metadata: std::collections::HashMap<String, PropertyValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Wire wrapper for datapoint writes: `{"datapoint": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatapointEnvelope {
    pub datapoint: Datapoint,
}
