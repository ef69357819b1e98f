//! Probe and scrape HTTP surface
//!
//! Minimal server living on its own task, fully independent of the poll
//! loop: liveness and startup probes that always answer 200, plus the
//! Prometheus scrape endpoint rendering the shared handle. The handle is
//! the only state; reads never block the gauge writers.

use std::net::SocketAddr;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use sockwatch_domain::{Result, SockwatchError};
use tracing::info;

use crate::errors::InfraError;

/// Build the probe/scrape router around a Prometheus handle.
#[must_use]
pub fn router(handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/healthz", get(probe))
        .route("/startupz", get(probe))
        .route("/metrics", get(render_metrics))
        .with_state(handle)
}

/// Serve the router on the given address until the process ends.
///
/// # Errors
/// Returns `Internal` if the listener cannot bind or the server dies.
pub async fn serve(addr: SocketAddr, handle: PrometheusHandle) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|err| {
        let infra: InfraError = err.into();
        SockwatchError::from(infra)
    })?;
    info!(%addr, "probe and scrape server listening");

    axum::serve(listener, router(handle)).await.map_err(|err| {
        let infra: InfraError = err.into();
        SockwatchError::from(infra)
    })
}

async fn probe() -> StatusCode {
    StatusCode::OK
}

async fn render_metrics(State(handle): State<PrometheusHandle>) -> String {
    handle.render()
}
