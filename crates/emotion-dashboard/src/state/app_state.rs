use crate::config::DashboardConfig;
use crate::notifier::{AlertNotifier, AlertReceipt};
use crate::server::templates::Templates;
use crate::telemetry::{record_prediction, PredictionSource};
use emotion_classifiers::{ClassificationResult, Classifier};
use emotion_core::{Error, LabeledText, PredictionRecord, Result};
use emotion_documents::report;
use emotion_store::{LabelCount, PredictionStore};
use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// A stored single-text classification
#[derive(Debug, Clone)]
pub struct RecordedPrediction {
    pub id: i64,
    pub result: ClassificationResult,
}

/// Shared application state
#[derive(Clone)]
pub struct DashboardState {
    /// Dashboard configuration
    pub config: Arc<DashboardConfig>,

    /// Classifier loaded once at startup, read-only afterwards
    pub classifier: Arc<dyn Classifier>,

    /// Prediction log
    pub store: Arc<PredictionStore>,

    /// Alert notifier (simulated)
    pub notifier: Arc<dyn AlertNotifier>,

    /// Page templates
    pub templates: Arc<Templates>,

    /// Rows of the most recent CSV or PDF batch, source of `/report`
    pub last_batch: Arc<RwLock<Vec<LabeledText>>>,

    /// Prometheus render handle
    pub metrics: PrometheusHandle,
}

impl DashboardState {
    pub fn new(
        config: DashboardConfig,
        classifier: Arc<dyn Classifier>,
        store: PredictionStore,
        notifier: Arc<dyn AlertNotifier>,
        metrics: PrometheusHandle,
    ) -> Result<Self> {
        Ok(Self {
            config: Arc::new(config),
            classifier,
            store: Arc::new(store),
            notifier,
            templates: Arc::new(Templates::new()?),
            last_batch: Arc::new(RwLock::new(Vec::new())),
            metrics,
        })
    }

    /// Classify one text and append the outcome to the store
    pub async fn classify_and_record(
        &self,
        text: &str,
        source: PredictionSource,
    ) -> Result<RecordedPrediction> {
        let result = self.classifier.classify(text).await?;

        let store = Arc::clone(&self.store);
        let (owned_text, label) = (text.to_string(), result.label.clone());
        let id = run_blocking(move || store.append(&owned_text, &label)).await?;

        record_prediction(&result.label, source);
        debug!(id, label = %result.label, source = source.as_str(), "Prediction recorded");
        Ok(RecordedPrediction { id, result })
    }

    /// Classify every text, store each outcome, and remember the batch for
    /// report export
    pub async fn classify_batch(
        &self,
        texts: Vec<String>,
        source: PredictionSource,
    ) -> Result<Vec<LabeledText>> {
        let mut rows = Vec::with_capacity(texts.len());
        for text in texts {
            let result = self.classifier.classify(&text).await?;
            rows.push(LabeledText::new(text, result.label));
        }

        let store = Arc::clone(&self.store);
        let to_store = rows.clone();
        run_blocking(move || {
            for row in &to_store {
                store.append(&row.text, &row.label)?;
            }
            Ok(())
        })
        .await?;

        for row in &rows {
            record_prediction(&row.label, source);
        }
        debug!(rows = rows.len(), source = source.as_str(), "Batch recorded");

        *self.last_batch.write() = rows.clone();
        Ok(rows)
    }

    /// Classify, raise a simulated alert, then store the prediction
    pub async fn alert(&self, address: &str, text: &str) -> Result<AlertReceipt> {
        let result = self.classifier.classify(text).await?;
        let receipt = self.notifier.notify(address, text, &result.label).await?;

        let store = Arc::clone(&self.store);
        let (owned_text, label) = (text.to_string(), result.label.clone());
        run_blocking(move || store.append(&owned_text, &label)).await?;

        record_prediction(&result.label, PredictionSource::Alert);
        Ok(receipt)
    }

    pub fn last_batch(&self) -> Vec<LabeledText> {
        self.last_batch.read().clone()
    }

    pub async fn recent(&self, limit: usize) -> Result<Vec<PredictionRecord>> {
        let store = Arc::clone(&self.store);
        run_blocking(move || store.recent(limit)).await
    }

    pub async fn label_counts(&self) -> Result<Vec<LabelCount>> {
        let store = Arc::clone(&self.store);
        run_blocking(move || store.label_counts()).await
    }

    /// Write the last batch to the configured report file and return its bytes
    pub async fn export_report(&self) -> Result<Vec<u8>> {
        let rows = self.last_batch();
        let path: PathBuf = self.config.report_path.clone();
        run_blocking(move || {
            let path = report::export(&rows, &path)?;
            Ok(std::fs::read(path)?)
        })
        .await
    }
}

/// Run store or file work on the blocking pool
pub async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::internal(format!("blocking task failed: {e}")))?
}
