//! Emotion Core
//!
//! Core types and utilities shared across the emotion classifier crates.
//!
//! This crate provides:
//! - The error type and result alias used by every component
//! - The persisted prediction record and the transient labeled text row
//! - Timestamp formatting for the prediction table

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    format_timestamp, parse_timestamp, LabeledText, PredictionRecord, TIMESTAMP_FORMAT,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{LabeledText, PredictionRecord};
}
