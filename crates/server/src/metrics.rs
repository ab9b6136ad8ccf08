//! Prometheus metrics
//!
//! - `tagasuri_requests_total{outcome}`: grammar-check requests by outcome
//! - `tagasuri_rejections_total{kind}`: early rejections by kind
//! - `tagasuri_llm_latency_seconds`: time spent waiting on the grammar model
//! - `tagasuri_errors_total{kind}`: failed requests by error kind

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use tagasuri_core::RejectionKind;

use crate::state::AppState;

/// Install the global Prometheus recorder
///
/// Returns `None` when a recorder is already installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    }
}

pub fn record_request(outcome: &'static str) {
    metrics::counter!("tagasuri_requests_total", "outcome" => outcome).increment(1);
}

pub fn record_rejection(kind: RejectionKind) {
    metrics::counter!("tagasuri_rejections_total", "kind" => kind.as_str()).increment(1);
}

pub fn record_llm_latency(elapsed: Duration) {
    metrics::histogram!("tagasuri_llm_latency_seconds").record(elapsed.as_secs_f64());
}

pub fn record_error(kind: &'static str) {
    metrics::counter!("tagasuri_errors_total", "kind" => kind).increment(1);
}

/// GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics disabled".to_string()),
    }
}
