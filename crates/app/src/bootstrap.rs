//! Application wiring
//!
//! Builds the metrics registry and its server task, authenticates, selects
//! the device to watch, and hands control to the poll loop. Any failure
//! before the loop starts is fatal and ends the process without entering
//! the loop.

use std::net::SocketAddr;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use sockwatch_core::PollLoop;
use sockwatch_domain::Config;
use sockwatch_infra::api::{ApiEndpoints, DeviceVitalsSource, RequestExecutor, TelemetryClient};
use sockwatch_infra::auth::{IdentityClient, IdentityEndpoints, SessionManager};
use sockwatch_infra::observability::{self, VitalsGauges};
use tracing::{error, info};

/// Run the daemon to completion.
///
/// Returns only when the capped-retry variant exhausts its attempts; the
/// always-retry variant polls until the process is terminated externally.
pub async fn run(config: Config) -> anyhow::Result<()> {
    // Explicitly owned registry: gauges and the scrape handle share it, no
    // process-global recorder is installed.
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    let gauges = VitalsGauges::new(&recorder);

    let addr: SocketAddr = config
        .metrics
        .bind_addr
        .parse()
        .with_context(|| format!("invalid metrics bind address {}", config.metrics.bind_addr))?;
    let _server_task = tokio::spawn(async move {
        if let Err(err) = observability::serve(addr, handle).await {
            error!(error = %err, "probe and scrape server stopped");
        }
    });

    let identity = IdentityClient::new(IdentityEndpoints::default())?;
    let session = SessionManager::new(identity, Some(config.credentials.clone()));
    let executor = RequestExecutor::new(ApiEndpoints::default(), session)?;
    let mut client = TelemetryClient::new(executor);

    let device = client.first_device().await.context("failed to select a device")?;
    info!(
        dsn = %device.dsn,
        model = %device.model,
        connection_status = %device.connection_status,
        "watching device"
    );

    let source = DeviceVitalsSource::new(client, device.dsn, config.poll.fetch_mode);
    let poll = PollLoop::new(source, gauges, config.poll);

    info!("entering poll loop");
    poll.run().await.context("poll loop exhausted its retry budget")?;
    Ok(())
}
