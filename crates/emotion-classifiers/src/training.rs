//! Offline training of the artifact pair

use crate::artifacts::ArtifactPair;
use crate::naive_bayes::MultinomialNb;
use crate::tfidf::TfidfVectorizer;
use emotion_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A labeled training sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub text: String,
    pub label: String,
}

impl TrainingSample {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// The ten hardcoded sentences the reference model is trained on
pub fn reference_dataset() -> Vec<TrainingSample> {
    [
        ("I am very happy today!", "joy"),
        ("This is so sad and depressing.", "sadness"),
        ("I love this new phone!", "joy"),
        ("I hate getting up early.", "anger"),
        ("What a surprise!", "surprise"),
        ("I'm afraid of failing.", "fear"),
        ("This makes me so angry!", "anger"),
        ("Feeling grateful and blessed.", "joy"),
        ("That was really disappointing.", "sadness"),
        ("Wow, I can't believe it!", "surprise"),
    ]
    .into_iter()
    .map(|(text, label)| TrainingSample::new(text, label))
    .collect()
}

/// Load a training set from a CSV file with `text` and `label` columns
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<TrainingSample>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Error::config(format!("failed to open {}: {}", path.display(), e)))?;

    let samples = reader
        .deserialize::<TrainingSample>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::validation(format!("invalid dataset {}: {}", path.display(), e)))?;

    if samples.is_empty() {
        return Err(Error::validation(format!(
            "dataset {} has no rows",
            path.display()
        )));
    }

    Ok(samples)
}

/// Fit the vectorizer and the classifier over the samples
pub fn fit(samples: &[TrainingSample]) -> Result<ArtifactPair> {
    let texts: Vec<&str> = samples.iter().map(|s| s.text.as_str()).collect();
    let labels: Vec<String> = samples.iter().map(|s| s.label.clone()).collect();

    let vectorizer = TfidfVectorizer::fit(&texts)?;
    let features: Vec<Vec<f64>> = texts.iter().map(|t| vectorizer.transform(t)).collect();
    let model = MultinomialNb::fit(&features, &labels)?;

    info!(
        samples = samples.len(),
        features = vectorizer.vocabulary_size(),
        classes = model.classes().len(),
        "Trained emotion classifier"
    );

    ArtifactPair::new(vectorizer, model)
}
