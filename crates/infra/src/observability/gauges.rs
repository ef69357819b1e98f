//! Vitals gauges
//!
//! The fixed gauge set republished from each vitals sample. Gauges are
//! registered against a recorder the caller constructs and owns, so tests
//! (and any future second instance) get their own registry instead of
//! fighting over process-global state.

use metrics::{describe_gauge, gauge, Gauge};
use metrics_exporter_prometheus::PrometheusRecorder;
use sockwatch_core::VitalsSink;
use sockwatch_domain::RealTimeVitals;

/// One gauge per telemetry channel
pub struct VitalsGauges {
    oxygen_saturation: Gauge,
    heart_rate: Gauge,
    battery_percentage: Gauge,
    battery_minutes: Gauge,
    signal_strength: Gauge,
    oxygen_ten_av: Gauge,
    sock_connection: Gauge,
    sleep_state: Gauge,
    skin_temperature: Gauge,
    movement: Gauge,
    alert_paused_status: Gauge,
    charging: Gauge,
    movement_bucket: Gauge,
    wellness_alert: Gauge,
    monitoring_start_time: Gauge,
    base_battery_status: Gauge,
    base_station_on: Gauge,
}

impl VitalsGauges {
    /// Register every gauge on the given recorder.
    #[must_use]
    pub fn new(recorder: &PrometheusRecorder) -> Self {
        metrics::with_local_recorder(recorder, || {
            describe_gauge!("oxygen_saturation_percent", "Current reading oxygen saturation.");
            describe_gauge!("heart_rate_bpm", "Current reading heart rate.");
            describe_gauge!("battery_percent", "Sock battery percentage.");
            describe_gauge!("battery_minutes", "Minutes until sock battery runs out.");
            describe_gauge!("signal_strength_rssi", "Strength of signal from sock.");
            describe_gauge!("oxygen_10_av_percent", "Ten-reading oxygen saturation average.");
            describe_gauge!("sock_connected_bool", "If sock is connected.");
            describe_gauge!("sleep_state", "Current sleep state.");
            describe_gauge!("skin_temperature_celsius", "Current skin temperature.");
            describe_gauge!("movement_intensity", "Intensity of movement/wiggling.");
            describe_gauge!("alert_paused_status", "If alert is paused.");
            describe_gauge!("charging", "If sock is charging.");
            describe_gauge!("movement_bucket", "Movement bucket.");
            describe_gauge!("wellness_alert", "Wellness alert.");
            describe_gauge!(
                "monitoring_start_time_unix_seconds",
                "Monitoring start time in UNIX seconds."
            );
            describe_gauge!("base_battery_status", "Status of base battery.");
            describe_gauge!("base_station_on_bool", "If base station is on.");

            Self {
                oxygen_saturation: gauge!("oxygen_saturation_percent"),
                heart_rate: gauge!("heart_rate_bpm"),
                battery_percentage: gauge!("battery_percent"),
                battery_minutes: gauge!("battery_minutes"),
                signal_strength: gauge!("signal_strength_rssi"),
                oxygen_ten_av: gauge!("oxygen_10_av_percent"),
                sock_connection: gauge!("sock_connected_bool"),
                sleep_state: gauge!("sleep_state"),
                skin_temperature: gauge!("skin_temperature_celsius"),
                movement: gauge!("movement_intensity"),
                alert_paused_status: gauge!("alert_paused_status"),
                charging: gauge!("charging"),
                movement_bucket: gauge!("movement_bucket"),
                wellness_alert: gauge!("wellness_alert"),
                monitoring_start_time: gauge!("monitoring_start_time_unix_seconds"),
                base_battery_status: gauge!("base_battery_status"),
                base_station_on: gauge!("base_station_on_bool"),
            }
        })
    }
}

impl VitalsSink for VitalsGauges {
    fn record(&self, vitals: &RealTimeVitals) {
        self.oxygen_saturation.set(vitals.oxygen_saturation as f64);
        self.heart_rate.set(vitals.heart_rate as f64);
        self.battery_percentage.set(vitals.battery_percentage as f64);
        self.battery_minutes.set(vitals.battery_minutes as f64);
        self.signal_strength.set(vitals.signal_strength as f64);
        self.oxygen_ten_av.set(vitals.oxygen_ten_av as f64);
        self.sock_connection.set(vitals.sock_connection as f64);
        self.sleep_state.set(vitals.sleep_state as f64);
        self.skin_temperature.set(vitals.skin_temperature as f64);
        self.movement.set(vitals.movement as f64);
        self.alert_paused_status.set(vitals.alert_paused_status as f64);
        self.charging.set(vitals.charging as f64);
        self.movement_bucket.set(vitals.movement_bucket as f64);
        self.wellness_alert.set(vitals.wellness_alert as f64);
        self.monitoring_start_time.set(vitals.monitoring_start_time as f64);
        self.base_battery_status.set(vitals.base_battery_status as f64);
        self.base_station_on.set(vitals.base_station_on as f64);
    }
}
