//! Artifact pair persistence
//!
//! The fitted vectorizer and classifier are saved side by side as two JSON
//! documents. The serving path loads them once at startup.

use crate::naive_bayes::MultinomialNb;
use crate::tfidf::TfidfVectorizer;
use emotion_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the serialized vectorizer
pub const VECTORIZER_FILE: &str = "vectorizer.json";

/// File name of the serialized classifier
pub const CLASSIFIER_FILE: &str = "emotion_classifier.json";

/// Fitted vectorizer plus fitted classifier
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPair {
    pub vectorizer: TfidfVectorizer,
    pub model: MultinomialNb,
}

impl ArtifactPair {
    pub fn new(vectorizer: TfidfVectorizer, model: MultinomialNb) -> Result<Self> {
        if vectorizer.vocabulary_size() != model.n_features() {
            return Err(Error::model(format!(
                "vectorizer has {} features but classifier expects {}",
                vectorizer.vocabulary_size(),
                model.n_features()
            )));
        }
        Ok(Self { vectorizer, model })
    }

    /// Paths of the two artifact files inside `dir`
    pub fn paths(dir: impl AsRef<Path>) -> (PathBuf, PathBuf) {
        let dir = dir.as_ref();
        (dir.join(VECTORIZER_FILE), dir.join(CLASSIFIER_FILE))
    }

    /// Whether both artifact files exist in `dir`
    pub fn exists(dir: impl AsRef<Path>) -> bool {
        let (vectorizer, classifier) = Self::paths(dir);
        vectorizer.is_file() && classifier.is_file()
    }

    /// Load the pair from `dir`
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let (vectorizer_path, classifier_path) = Self::paths(&dir);

        let vectorizer: TfidfVectorizer = read_json(&vectorizer_path)?;
        let model: MultinomialNb = read_json(&classifier_path)?;

        info!(
            dir = %dir.as_ref().display(),
            features = vectorizer.vocabulary_size(),
            classes = model.classes().len(),
            "Loaded artifact pair"
        );

        Self::new(vectorizer, model)
    }

    /// Save the pair into `dir`, creating it if needed
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<(PathBuf, PathBuf)> {
        std::fs::create_dir_all(dir.as_ref())?;
        let (vectorizer_path, classifier_path) = Self::paths(&dir);

        write_json(&vectorizer_path, &self.vectorizer)?;
        write_json(&classifier_path, &self.model)?;

        Ok((vectorizer_path, classifier_path))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .map_err(|e| Error::model(format!("failed to open {}: {}", path.display(), e)))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::model(format!("failed to parse {}: {}", path.display(), e)))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| Error::model(format!("failed to create {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
