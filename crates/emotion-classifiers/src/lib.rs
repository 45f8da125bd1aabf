//! Emotion Classifiers
//!
//! A small bag-of-words emotion classifier: a TF-IDF vectorizer feeding a
//! multinomial Naive Bayes model. The two fitted halves form an artifact pair
//! that is trained offline (`emotion-train`) and loaded once by the serving
//! process.

pub mod artifacts;
pub mod classifier;
pub mod emotion;
pub mod naive_bayes;
pub mod tfidf;
pub mod training;

pub use artifacts::{ArtifactPair, CLASSIFIER_FILE, VECTORIZER_FILE};
pub use classifier::{ClassificationMetadata, ClassificationResult, Classifier};
pub use emotion::EmotionClassifier;
pub use naive_bayes::MultinomialNb;
pub use tfidf::TfidfVectorizer;
pub use training::TrainingSample;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::artifacts::ArtifactPair;
    pub use crate::classifier::{ClassificationResult, Classifier};
    pub use crate::emotion::EmotionClassifier;
}
