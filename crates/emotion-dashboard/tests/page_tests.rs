//! Page flow tests: validation, classification, batches, alerts, reports

mod common;

use axum::http::{header, StatusCode};
use common::*;
use std::sync::Arc;

#[tokio::test]
async fn test_every_page_renders_with_navigation() {
    let app = TestApp::new(reference_classifier());

    for uri in ["/", "/classify", "/csv", "/pdf", "/recent", "/alert", "/credits"] {
        let (status, body) = app.send_text(get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body.contains("Navigation"), "{uri}");
    }
}

#[tokio::test]
async fn test_single_text_end_to_end() {
    let app = TestApp::new(reference_classifier());

    let (status, body) = app
        .send_text(form("/classify", "text=I+am+very+happy+today%21"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Predicted Emotion: joy"));

    assert_eq!(app.stored(), 1);
    let record = &app.state.store.recent(1).unwrap()[0];
    assert_eq!(record.input_text, "I am very happy today!");
    assert_eq!(record.predicted_emotion, "joy");
}

#[tokio::test]
async fn test_single_text_empty_warns() {
    let mock = Arc::new(MockClassifier::new("joy"));
    let app = TestApp::new(mock.clone());

    let (status, body) = app.send_text(form("/classify", "text=")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Please enter some text."));
    assert!(body.contains("message warning"));
    assert_eq!(mock.call_count(), 0);
    assert_eq!(app.stored(), 0);
}

#[tokio::test]
async fn test_single_text_whitespace_is_classified() {
    let mock = Arc::new(MockClassifier::new("joy"));
    let app = TestApp::new(mock.clone());

    let (status, _) = app.send_text(form("/classify", "text=+++")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mock.call_count(), 1);
    assert_eq!(app.stored(), 1);
}

#[tokio::test]
async fn test_csv_batch_classifies_each_row() {
    let app = TestApp::new(Arc::new(MockClassifier::new("sadness")));

    let csv = b"id,text\n1,This is so sad.\n2,\n3,That was really disappointing.\n";
    let (status, body) = app
        .send_text(upload("/csv", "batch.csv", "text/csv", csv))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("This is so sad."));
    assert!(body.contains("That was really disappointing."));
    assert!(body.contains("Export as PDF"));

    assert_eq!(app.stored(), 2);
    assert_eq!(app.state.last_batch().len(), 2);
}

#[tokio::test]
async fn test_csv_without_text_column_is_rejected() {
    let mock = Arc::new(MockClassifier::new("joy"));
    let app = TestApp::new(mock.clone());

    let csv = b"message\nhello\n";
    let (status, body) = app
        .send_text(upload("/csv", "batch.csv", "text/csv", csv))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("CSV must have a"));
    assert!(body.contains("message error"));

    assert_eq!(mock.call_count(), 0);
    assert_eq!(app.stored(), 0);
    assert!(app.state.last_batch().is_empty());
}

#[tokio::test]
async fn test_upload_without_file_warns() {
    let app = TestApp::new(reference_classifier());

    let (status, body) = app
        .send_text(upload("/csv", "empty.csv", "text/csv", b""))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Please choose a file to upload."));
    assert_eq!(app.stored(), 0);
}

#[tokio::test]
async fn test_pdf_batch_classifies_lines() {
    let app = TestApp::new(reference_classifier());

    let pdf = make_pdf("I love this new phone!");
    let (status, body) = app
        .send_text(upload("/pdf", "upload.pdf", "application/pdf", &pdf))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("I love this new phone!"));

    assert_eq!(app.stored(), 1);
    let batch = app.state.last_batch();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].label, "joy");
}

#[tokio::test]
async fn test_unreadable_pdf_is_rejected() {
    let mock = Arc::new(MockClassifier::new("joy"));
    let app = TestApp::new(mock.clone());

    let (status, _) = app
        .send_text(upload("/pdf", "broken.pdf", "application/pdf", b"not a pdf"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(mock.call_count(), 0);
    assert_eq!(app.stored(), 0);
}

#[tokio::test]
async fn test_report_downloads_last_batch() {
    let app = TestApp::new(Arc::new(MockClassifier::new("joy")));

    let csv = b"text\nfirst\nsecond\n";
    app.send_text(upload("/csv", "batch.csv", "text/csv", csv))
        .await;

    let (status, headers, body) = app.send(get("/report")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"emotion_results.pdf\""
    );
    assert!(body.starts_with(b"%PDF"));

    let on_disk = std::fs::read(&app.state.config.report_path).unwrap();
    assert_eq!(on_disk, body);
}

#[tokio::test]
async fn test_report_without_batch_is_still_a_pdf() {
    let app = TestApp::new(reference_classifier());

    let (status, _, body) = app.send(get("/report")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_alert_requires_both_fields() {
    let mock = Arc::new(MockClassifier::new("anger"));
    let app = TestApp::new(mock.clone());

    for body in ["email=&text=hello", "email=ops%40example.com&text=", "text=hello"] {
        let (status, page) = app.send_text(form("/alert", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(page.contains("Please fill all fields."));
    }

    assert_eq!(mock.call_count(), 0);
    assert!(app.notifier.sent.lock().is_empty());
    assert_eq!(app.stored(), 0);
}

#[tokio::test]
async fn test_alert_notifies_and_stores() {
    let app = TestApp::new(reference_classifier());

    let (status, page) = app
        .send_text(form(
            "/alert",
            "email=ops%40example.com&text=I+hate+waiting+in+traffic.",
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Simulating alert to ops@example.com"));

    let sent = app.notifier.sent.lock().clone();
    assert_eq!(
        sent,
        vec![(
            "ops@example.com".to_string(),
            "I hate waiting in traffic.".to_string(),
            "anger".to_string()
        )]
    );
    assert_eq!(app.stored(), 1);
}

#[tokio::test]
async fn test_recent_page_lists_rows_and_distribution() {
    let app = TestApp::new(reference_classifier());

    app.send_text(form("/classify", "text=This+is+so+sad.")).await;
    app.send_text(form("/classify", "text=What+a+surprise%21")).await;

    let (status, body) = app.send_text(get("/recent")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("This is so sad."));
    assert!(body.contains("What a surprise!"));
    assert!(body.contains("Emotion Label Distribution"));
    assert!(body.contains("sadness"));
    assert!(body.contains("surprise"));
}
