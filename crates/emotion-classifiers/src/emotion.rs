//! Emotion classifier backed by a fitted artifact pair

use crate::artifacts::ArtifactPair;
use crate::classifier::{ClassificationMetadata, ClassificationResult, Classifier};
use emotion_core::{Error, Result};
use std::path::Path;
use std::time::Instant;

const MODEL_NAME: &str = "tfidf-multinomial-nb";

/// Immutable emotion classifier.
///
/// Built once at startup and shared by reference; it never refits or reloads.
pub struct EmotionClassifier {
    name: String,
    artifacts: ArtifactPair,
}

impl EmotionClassifier {
    pub fn new(artifacts: ArtifactPair) -> Self {
        Self::with_name("emotion", artifacts)
    }

    pub fn with_name(name: impl Into<String>, artifacts: ArtifactPair) -> Self {
        Self {
            name: name.into(),
            artifacts,
        }
    }

    /// Load the artifact pair from `dir`
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(ArtifactPair::load(dir)?))
    }

    /// Synchronous prediction of a single label
    pub fn predict(&self, text: &str) -> Result<String> {
        let features = self.artifacts.vectorizer.transform(text);
        self.artifacts
            .model
            .predict(&features)
            .map(str::to_string)
    }

    pub fn artifacts(&self) -> &ArtifactPair {
        &self.artifacts
    }
}

#[async_trait::async_trait]
impl Classifier for EmotionClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let start = Instant::now();

        let features = self.artifacts.vectorizer.transform(text);
        let label = self.artifacts.model.predict(&features)?.to_string();
        let proba = self.artifacts.model.predict_proba(&features)?;

        let score = proba
            .iter()
            .find(|(class, _)| *class == label)
            .map(|(_, p)| *p as f32)
            .ok_or_else(|| Error::classifier(format!("no posterior for label '{label}'")))?;

        Ok(ClassificationResult {
            label,
            score,
            metadata: ClassificationMetadata {
                model: Some(MODEL_NAME.to_string()),
                all_scores: Some(
                    proba
                        .into_iter()
                        .map(|(class, p)| (class, p as f32))
                        .collect(),
                ),
            },
            latency_us: start.elapsed().as_micros() as u64,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn labels(&self) -> &[String] {
        self.artifacts.model.classes()
    }
}
