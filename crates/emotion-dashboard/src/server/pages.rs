//! HTML page handlers
//!
//! Every form page has a GET handler that renders the empty form and a POST
//! handler that validates, classifies, stores, and re-renders the page with a
//! banner. Rejected input never reaches the classifier or the store.

use crate::error::AppError;
use crate::server::templates::Flash;
use crate::state::{run_blocking, DashboardState};
use crate::telemetry::{record_validation_error, PredictionSource};
use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use emotion_core::LabeledText;
use emotion_documents::{parse_csv, parse_pdf};
use minijinja::context;
use serde::Deserialize;
use std::io::Cursor;
use tracing::{info, warn};

const EMPTY_TEXT: &str = "Please enter some text.";
const EMPTY_ALERT: &str = "Please fill all fields.";
const NO_FILE: &str = "Please choose a file to upload.";

/// Multipart field carrying the uploaded file
const FILE_FIELD: &str = "file";

// ============================================================================
// Static pages
// ============================================================================

pub async fn home(State(state): State<DashboardState>) -> Result<Html<String>, AppError> {
    Ok(state.templates.render("home.html", context! { active => "home" })?)
}

pub async fn credits(State(state): State<DashboardState>) -> Result<Html<String>, AppError> {
    Ok(state
        .templates
        .render("credits.html", context! { active => "credits" })?)
}

// ============================================================================
// Single text
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ClassifyForm {
    #[serde(default)]
    pub text: String,
}

pub async fn classify_form(State(state): State<DashboardState>) -> Result<Html<String>, AppError> {
    Ok(state
        .templates
        .render("classify.html", context! { active => "classify" })?)
}

pub async fn classify_submit(
    State(state): State<DashboardState>,
    Form(form): Form<ClassifyForm>,
) -> Result<Response, AppError> {
    // Whitespace-only text is classified; only the empty string is rejected
    if form.text.is_empty() {
        record_validation_error("classify");
        let page = state.templates.render(
            "classify.html",
            context! { active => "classify", message => Flash::warning(EMPTY_TEXT) },
        )?;
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    }

    let recorded = state
        .classify_and_record(&form.text, PredictionSource::Single)
        .await?;
    let label = recorded.result.label;

    let page = state.templates.render(
        "classify.html",
        context! {
            active => "classify",
            text => form.text,
            label => &label,
            message => Flash::success(format!("Predicted Emotion: {label}")),
        },
    )?;
    Ok(page.into_response())
}

// ============================================================================
// Batch uploads
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum BatchKind {
    Csv,
    Pdf,
}

impl BatchKind {
    fn page(&self) -> &'static str {
        match self {
            BatchKind::Csv => "csv",
            BatchKind::Pdf => "pdf",
        }
    }

    fn source(&self) -> PredictionSource {
        match self {
            BatchKind::Csv => PredictionSource::Csv,
            BatchKind::Pdf => PredictionSource::Pdf,
        }
    }

    fn render(
        &self,
        state: &DashboardState,
        rows: &[LabeledText],
        message: Option<Flash>,
    ) -> Result<Html<String>, AppError> {
        let (heading, prompt, accept) = match self {
            BatchKind::Csv => ("Upload a CSV file", "Choose a CSV file", ".csv"),
            BatchKind::Pdf => ("Upload a PDF file", "Choose a PDF", ".pdf"),
        };

        Ok(state.templates.render(
            "batch.html",
            context! {
                active => self.page(),
                action => format!("/{}", self.page()),
                heading,
                prompt,
                accept,
                rows,
                message,
            },
        )?)
    }

    fn parse(&self, bytes: Vec<u8>) -> emotion_core::Result<Vec<String>> {
        match self {
            BatchKind::Csv => parse_csv(Cursor::new(bytes)),
            BatchKind::Pdf => parse_pdf(&bytes),
        }
    }
}

pub async fn csv_form(State(state): State<DashboardState>) -> Result<Html<String>, AppError> {
    BatchKind::Csv.render(&state, &[], None)
}

pub async fn csv_upload(
    State(state): State<DashboardState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    batch_upload(state, multipart, BatchKind::Csv).await
}

pub async fn pdf_form(State(state): State<DashboardState>) -> Result<Html<String>, AppError> {
    BatchKind::Pdf.render(&state, &[], None)
}

pub async fn pdf_upload(
    State(state): State<DashboardState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    batch_upload(state, multipart, BatchKind::Pdf).await
}

async fn batch_upload(
    state: DashboardState,
    multipart: Multipart,
    kind: BatchKind,
) -> Result<Response, AppError> {
    let Some(bytes) = read_upload(multipart).await? else {
        record_validation_error(kind.page());
        let page = kind.render(&state, &[], Some(Flash::warning(NO_FILE)))?;
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    };

    let texts = match run_blocking(move || kind.parse(bytes)).await {
        Ok(texts) => texts,
        Err(e) if e.is_user_facing() => {
            warn!(page = kind.page(), error = %e, "Rejected upload");
            record_validation_error(kind.page());
            let page = kind.render(&state, &[], Some(Flash::error(e.to_string())))?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let rows = state.classify_batch(texts, kind.source()).await?;
    info!(page = kind.page(), rows = rows.len(), "Batch classified");

    Ok(kind.render(&state, &rows, None)?.into_response())
}

async fn read_upload(mut multipart: Multipart) -> Result<Option<Vec<u8>>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?
    {
        if field.name() == Some(FILE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidRequest(e.to_string()))?;
            if bytes.is_empty() {
                return Ok(None);
            }
            return Ok(Some(bytes.to_vec()));
        }
    }
    Ok(None)
}

// ============================================================================
// Recent results
// ============================================================================

pub async fn recent(State(state): State<DashboardState>) -> Result<Html<String>, AppError> {
    let records = state.recent(state.config.recent_limit).await?;
    let counts = state.label_counts().await?;

    Ok(state.templates.render(
        "recent.html",
        context! { active => "recent", records, counts },
    )?)
}

// ============================================================================
// Alert simulation
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AlertForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub text: String,
}

pub async fn alert_form(State(state): State<DashboardState>) -> Result<Html<String>, AppError> {
    Ok(state
        .templates
        .render("alert.html", context! { active => "alert" })?)
}

pub async fn alert_submit(
    State(state): State<DashboardState>,
    Form(form): Form<AlertForm>,
) -> Result<Response, AppError> {
    if form.email.is_empty() || form.text.is_empty() {
        record_validation_error("alert");
        let page = state.templates.render(
            "alert.html",
            context! {
                active => "alert",
                email => form.email,
                text => form.text,
                message => Flash::warning(EMPTY_ALERT),
            },
        )?;
        return Ok((StatusCode::BAD_REQUEST, page).into_response());
    }

    let receipt = state.alert(&form.email, &form.text).await?;

    let page = state.templates.render(
        "alert.html",
        context! { active => "alert", message => Flash::info(receipt.message) },
    )?;
    Ok(page.into_response())
}

// ============================================================================
// Report download
// ============================================================================

pub async fn download_report(State(state): State<DashboardState>) -> Result<Response, AppError> {
    let bytes = state.export_report().await?;

    let file_name = state
        .config
        .report_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(emotion_documents::DEFAULT_REPORT_FILE)
        .to_string();

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
