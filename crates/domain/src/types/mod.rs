//! Domain data types
//!
//! Wire snapshots returned by the device-management API, the session entity,
//! and runtime configuration.

pub mod config;
pub mod device;
pub mod property;
pub mod session;
pub mod vitals;

pub use config::{Config, Credentials, FetchMode, MetricsConfig, PollSettings};
pub use device::{Device, DeviceEnvelope};
pub use property::{Datapoint, DatapointEnvelope, Property, PropertyEnvelope, PropertyValue};
pub use session::Session;
pub use vitals::RealTimeVitals;
