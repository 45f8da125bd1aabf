//! Prometheus counters for classification traffic

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

pub const PREDICTIONS_TOTAL: &str = "emotion_predictions_total";
pub const VALIDATION_ERRORS_TOTAL: &str = "emotion_validation_errors_total";

/// Where a classification request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSource {
    Single,
    Csv,
    Pdf,
    Alert,
    Api,
}

impl PredictionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionSource::Single => "single",
            PredictionSource::Csv => "csv",
            PredictionSource::Pdf => "pdf",
            PredictionSource::Alert => "alert",
            PredictionSource::Api => "api",
        }
    }
}

/// Install the global recorder and return the handle used by `/metrics`
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        PREDICTIONS_TOTAL,
        "Total number of stored predictions by label and source"
    );
    metrics::describe_counter!(
        VALIDATION_ERRORS_TOTAL,
        "Total number of rejected form submissions and uploads"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}

/// Handle backed by a recorder that is not installed globally
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

pub fn record_prediction(label: &str, source: PredictionSource) {
    metrics::counter!(
        PREDICTIONS_TOTAL,
        "label" => label.to_string(),
        "source" => source.as_str()
    )
    .increment(1);
}

pub fn record_validation_error(page: &'static str) {
    metrics::counter!(VALIDATION_ERRORS_TOTAL, "page" => page).increment(1);
}
