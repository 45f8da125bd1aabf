//! Emotion Store
//!
//! Append-only log of classification events backed by a single local SQLite
//! table.
//!
//! Provides:
//! - Idempotent schema creation on startup
//! - One record per classification call, never updated or deduplicated
//! - Newest-first reads and per-label counts for the dashboard

pub mod store;

pub use store::{LabelCount, PredictionStore, TABLE_NAME};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::store::{LabelCount, PredictionStore};
}
