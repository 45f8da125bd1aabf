//! Emotion Documents
//!
//! Adapters between uploaded files and classifiable text, plus the printable
//! report of classification results.
//!
//! - [`tabular`]: CSV files with a mandatory `text` column
//! - [`paged`]: PDF files with an extractable text layer
//! - [`report`]: fixed-font paginated PDF of `N. text -> label` lines

pub mod paged;
pub mod report;
pub mod tabular;

pub use paged::{parse_pdf, split_lines};
pub use report::{render as render_report, DEFAULT_REPORT_FILE, REPORT_TITLE};
pub use tabular::{parse_csv, MISSING_TEXT_COLUMN, TEXT_COLUMN};
