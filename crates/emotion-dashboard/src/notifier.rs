//! Alert notifier
//!
//! The dashboard only simulates alerts. [`SimulatedNotifier`] performs no
//! network transmission: it logs the alert and hands back the confirmation
//! text shown to the operator. A real transport would be another
//! [`AlertNotifier`] implementation.

use async_trait::async_trait;
use emotion_core::Result;
use serde::Serialize;
use tracing::info;

/// Outcome of an alert request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertReceipt {
    /// Recipient address as entered
    pub address: String,

    /// Label the alert was raised for
    pub label: String,

    /// Confirmation shown to the operator
    pub message: String,

    /// Whether anything actually left the process
    pub delivered: bool,
}

/// Sends an alert about one classified text
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    async fn notify(&self, address: &str, text: &str, label: &str) -> Result<AlertReceipt>;

    fn name(&self) -> &str;
}

/// No-op notifier that only reports what it would have sent
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedNotifier;

#[async_trait]
impl AlertNotifier for SimulatedNotifier {
    async fn notify(&self, address: &str, text: &str, label: &str) -> Result<AlertReceipt> {
        info!(address, label, "Simulated alert");

        Ok(AlertReceipt {
            address: address.to_string(),
            label: label.to_string(),
            message: format!(
                "Simulating alert to {address}...\nText: {text}\nPredicted Emotion: {label}"
            ),
            delivered: false,
        })
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_notifier_never_delivers() {
        let receipt = SimulatedNotifier
            .notify("ops@example.com", "I hate waiting in traffic.", "anger")
            .await
            .unwrap();

        assert!(!receipt.delivered);
        assert_eq!(receipt.address, "ops@example.com");
        assert_eq!(receipt.label, "anger");
        assert_eq!(
            receipt.message,
            "Simulating alert to ops@example.com...\nText: I hate waiting in traffic.\nPredicted Emotion: anger"
        );
    }
}
