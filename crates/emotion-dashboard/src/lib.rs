//! Emotion Dashboard
//!
//! Page-routed web front end for the emotion classifier: single text entry,
//! CSV and PDF batches, recent results, simulated alerts, and PDF report
//! export, plus a small JSON API and Prometheus metrics.

pub mod cli;
pub mod config;
pub mod error;
pub mod notifier;
pub mod server;
pub mod state;
pub mod telemetry;

pub use cli::Cli;
pub use config::DashboardConfig;
pub use error::AppError;
pub use notifier::{AlertNotifier, AlertReceipt, SimulatedNotifier};
pub use server::{build_app, run_server};
pub use state::DashboardState;
