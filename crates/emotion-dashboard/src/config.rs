//! Dashboard configuration

use crate::cli::Cli;
use emotion_documents::DEFAULT_REPORT_FILE;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Listen address
    #[serde(default = "default_address")]
    pub address: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding `vectorizer.json` and `emotion_classifier.json`
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// SQLite prediction database
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Fixed output file for PDF reports
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    /// Rows shown on the recent results page
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Maximum accepted request body, in bytes
    #[serde(default = "default_upload_limit")]
    pub upload_limit_bytes: usize,
}

impl DashboardConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(address) = &cli.address {
            config.address = address.clone();
        }
        if let Some(port) = cli.port {
            config.port = port;
        }
        if let Some(models) = &cli.models {
            config.models_dir = models.clone();
        }
        if let Some(database) = &cli.database {
            config.database_path = database.clone();
        }
        if let Some(report) = &cli.report {
            config.report_path = report.clone();
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.address, self.port).parse()?)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            models_dir: default_models_dir(),
            database_path: default_database_path(),
            report_path: default_report_path(),
            recent_limit: default_recent_limit(),
            upload_limit_bytes: default_upload_limit(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_database_path() -> PathBuf {
    PathBuf::from("emotion_app_data.db")
}

fn default_report_path() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_FILE)
}

fn default_recent_limit() -> usize {
    100
}

fn default_upload_limit() -> usize {
    10 * 1024 * 1024
}
