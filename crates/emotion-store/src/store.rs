//! Prediction store persistence layer
//!
//! Every operation opens its own connection and closes it when done. There is
//! no pooling and no writer coordination beyond SQLite's own locking, which is
//! enough for a single serving process.

use chrono::{Local, NaiveDateTime};
use emotion_core::{format_timestamp, parse_timestamp, Error, PredictionRecord, Result};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the prediction table
pub const TABLE_NAME: &str = "emotion_predictions";

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS emotion_predictions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        input_text TEXT,
        predicted_emotion TEXT,
        timestamp TEXT
    );
"#;

/// Number of stored predictions carrying a label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

/// File-backed prediction store
#[derive(Debug, Clone)]
pub struct PredictionStore {
    path: PathBuf,
}

impl PredictionStore {
    /// Open the store at `path`, creating the file and table if absent.
    ///
    /// The path must name a file: an in-memory database would be discarded
    /// after every operation.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = Self { path };
        let conn = store.connect()?;
        conn.execute_batch(SCHEMA).map_err(storage_error)?;

        info!("Prediction store ready at {:?}", store.path);
        Ok(store)
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one classification event stamped with the current local time.
    ///
    /// Returns the identity of the new row.
    pub fn append(&self, text: &str, label: &str) -> Result<i64> {
        self.append_at(text, label, Local::now().naive_local())
    }

    /// Record one classification event with an explicit timestamp
    pub fn append_at(&self, text: &str, label: &str, timestamp: NaiveDateTime) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO emotion_predictions (input_text, predicted_emotion, timestamp) \
             VALUES (?1, ?2, ?3)",
            params![text, label, format_timestamp(&timestamp)],
        )
        .map_err(storage_error)?;

        let id = conn.last_insert_rowid();
        debug!(id, label, "Stored prediction");
        Ok(id)
    }

    /// Up to `limit` records, newest first by identity
    pub fn recent(&self, limit: usize) -> Result<Vec<PredictionRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, input_text, predicted_emotion, timestamp \
                 FROM emotion_predictions ORDER BY id DESC LIMIT ?1",
            )
            .map_err(storage_error)?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![limit], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, Option<String>>(3)?,
                ))
            })
            .map_err(storage_error)?;

        let mut records = Vec::new();
        for row in rows {
            let (id, input_text, predicted_emotion, timestamp) = row.map_err(storage_error)?;
            let raw = timestamp.unwrap_or_default();
            let timestamp = parse_timestamp(&raw).ok_or_else(|| {
                Error::storage(format!("row {id} has malformed timestamp '{raw}'"))
            })?;

            records.push(PredictionRecord {
                id,
                input_text: input_text.unwrap_or_default(),
                predicted_emotion: predicted_emotion.unwrap_or_default(),
                timestamp,
            });
        }

        Ok(records)
    }

    /// Count of records per label, most frequent first
    pub fn label_counts(&self) -> Result<Vec<LabelCount>> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare(
                "SELECT COALESCE(predicted_emotion, ''), COUNT(*) AS n \
                 FROM emotion_predictions \
                 GROUP BY predicted_emotion \
                 ORDER BY n DESC, predicted_emotion ASC",
            )
            .map_err(storage_error)?;

        let counts = stmt
            .query_map([], |row| {
                Ok(LabelCount {
                    label: row.get(0)?,
                    count: row.get::<_, i64>(1)?.max(0) as u64,
                })
            })
            .map_err(storage_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage_error)?;

        Ok(counts)
    }

    /// Total number of stored records
    pub fn count(&self) -> Result<u64> {
        let conn = self.connect()?;
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM emotion_predictions", [], |row| {
                row.get(0)
            })
            .map_err(storage_error)?;
        Ok(n.max(0) as u64)
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path).map_err(|e| {
            Error::storage(format!("failed to open {}: {}", self.path.display(), e))
        })
    }
}

fn storage_error(e: rusqlite::Error) -> Error {
    Error::storage(e.to_string())
}
