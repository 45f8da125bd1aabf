//! Error types for the emotion classifier

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for classification, storage and document operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Classifier execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Artifact pair load/save errors
    #[error("model error: {0}")]
    Model(String),

    /// Prediction store errors
    #[error("storage error: {0}")]
    Storage(String),

    /// Uploaded document could not be read
    #[error("document error: {0}")]
    Document(String),

    /// Input rejected before any work was done
    #[error("{0}")]
    Validation(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new model error
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// Create a new storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new document error
    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error should be shown to the operator as a message
    /// instead of failing the request.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Document(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_unprefixed() {
        let err = Error::validation("CSV must have a 'text' column.");
        assert_eq!(err.to_string(), "CSV must have a 'text' column.");
        assert!(err.is_user_facing());
    }

    #[test]
    fn storage_errors_are_not_user_facing() {
        assert!(!Error::storage("disk full").is_user_facing());
        assert!(Error::document("not a pdf").is_user_facing());
    }
}
