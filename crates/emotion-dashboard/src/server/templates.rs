//! Server-rendered pages

use axum::response::Html;
use emotion_core::{Error, Result};
use minijinja::{Environment, Value};
use serde::Serialize;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("home.html", include_str!("../../templates/home.html")),
    ("classify.html", include_str!("../../templates/classify.html")),
    ("batch.html", include_str!("../../templates/batch.html")),
    ("recent.html", include_str!("../../templates/recent.html")),
    ("alert.html", include_str!("../../templates/alert.html")),
    ("credits.html", include_str!("../../templates/credits.html")),
];

/// Banner shown above a page's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub kind: &'static str,
    pub text: String,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: "success", text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: "info", text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { kind: "warning", text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: "error", text: text.into() }
    }
}

/// Compiled page templates
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| Error::internal(format!("invalid template {name}: {e}")))?;
        }
        Ok(Self { env })
    }

    pub fn render(&self, name: &str, ctx: Value) -> Result<Html<String>> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| Error::internal(format!("unknown template {name}: {e}")))?;
        let html = template
            .render(ctx)
            .map_err(|e| Error::internal(format!("failed to render {name}: {e}")))?;
        Ok(Html(html))
    }
}
