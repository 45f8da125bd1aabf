//! Shared fixtures for dashboard tests
//!
//! Configurable mock implementations of the Classifier and AlertNotifier
//! traits, a temp-dir backed state builder, and request helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use emotion_classifiers::{training, ClassificationResult, Classifier, EmotionClassifier};
use emotion_core::{Error, Result};
use emotion_dashboard::telemetry::detached_handle;
use emotion_dashboard::{AlertNotifier, AlertReceipt, DashboardConfig, DashboardState};
use emotion_store::PredictionStore;
use http_body_util::BodyExt;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "emotion-test-boundary";

/// A classifier that always returns the same label
pub struct MockClassifier {
    label: String,
    labels: Vec<String>,
    call_count: AtomicU32,
}

impl MockClassifier {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            labels: vec![label.to_string()],
            call_count: AtomicU32::new(0),
        }
    }

    /// Get the number of times classify was called
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, _text: &str) -> Result<ClassificationResult> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(ClassificationResult::new(self.label.clone(), 1.0))
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// A classifier that always fails
pub struct FailingClassifier;

#[async_trait]
impl Classifier for FailingClassifier {
    async fn classify(&self, _text: &str) -> Result<ClassificationResult> {
        Err(Error::classifier("simulated classifier failure"))
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn labels(&self) -> &[String] {
        &[]
    }
}

/// A notifier that remembers every alert it was asked to send
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl AlertNotifier for RecordingNotifier {
    async fn notify(&self, address: &str, text: &str, label: &str) -> Result<AlertReceipt> {
        self.sent
            .lock()
            .push((address.to_string(), text.to_string(), label.to_string()));
        Ok(AlertReceipt {
            address: address.to_string(),
            label: label.to_string(),
            message: format!("Simulating alert to {address}..."),
            delivered: false,
        })
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Classifier fitted on the reference sentences
pub fn reference_classifier() -> Arc<EmotionClassifier> {
    let artifacts = training::fit(&training::reference_dataset()).unwrap();
    Arc::new(EmotionClassifier::new(artifacts))
}

pub struct TestApp {
    pub dir: TempDir,
    pub state: DashboardState,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        let dir = TempDir::new().unwrap();
        let config = DashboardConfig {
            database_path: dir.path().join("emotion_app_data.db"),
            report_path: dir.path().join("emotion_results.pdf"),
            models_dir: dir.path().join("models"),
            ..Default::default()
        };
        let store = PredictionStore::open(&config.database_path).unwrap();
        let notifier = Arc::new(RecordingNotifier::default());

        let state = DashboardState::new(
            config,
            classifier,
            store,
            notifier.clone(),
            detached_handle(),
        )
        .unwrap();

        Self { dir, state, notifier }
    }

    pub fn router(&self) -> Router {
        emotion_dashboard::build_app(self.state.clone())
    }

    pub fn stored(&self) -> u64 {
        self.state.store.count().unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body.to_vec())
    }

    pub async fn send_text(&self, request: Request<Body>) -> (StatusCode, String) {
        let (status, _, body) = self.send(request).await;
        (status, String::from_utf8(body).unwrap())
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn upload(uri: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Single-page PDF whose text layer holds `text`
pub fn make_pdf(text: &str) -> Vec<u8> {
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.4");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let content = format!("BT /F1 12 Tf 72 700 Td ({text}) Tj ET");
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        },
    });

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    });

    if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
        dict.set("Parent", pages_id);
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
