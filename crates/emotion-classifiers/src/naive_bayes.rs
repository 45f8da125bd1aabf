//! Multinomial Naive Bayes over weighted term vectors

use emotion_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default additive (Laplace) smoothing
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Fitted multinomial Naive Bayes classifier.
///
/// Classes are stored in sorted order; when two classes tie, the first one in
/// that order wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    alpha: f64,
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    /// `[class][feature]` smoothed log-probabilities
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fit with the default smoothing
    pub fn fit(features: &[Vec<f64>], labels: &[String]) -> Result<Self> {
        Self::fit_with_alpha(features, labels, DEFAULT_ALPHA)
    }

    /// Fit on feature rows and their labels
    pub fn fit_with_alpha(features: &[Vec<f64>], labels: &[String], alpha: f64) -> Result<Self> {
        if features.is_empty() {
            return Err(Error::classifier("cannot fit classifier without samples"));
        }
        if features.len() != labels.len() {
            return Err(Error::classifier(format!(
                "got {} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }
        if alpha <= 0.0 {
            return Err(Error::classifier("smoothing alpha must be positive"));
        }

        let n_features = features[0].len();
        if features.iter().any(|row| row.len() != n_features) {
            return Err(Error::classifier("feature rows have inconsistent widths"));
        }

        let classes: Vec<String> = labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut class_count = vec![0.0f64; classes.len()];
        let mut feature_count = vec![vec![0.0f64; n_features]; classes.len()];

        for (row, label) in features.iter().zip(labels) {
            // classes is sorted and built from labels, so the search always hits
            let c = classes.binary_search(label).unwrap_or_default();
            class_count[c] += 1.0;
            for (acc, value) in feature_count[c].iter_mut().zip(row) {
                *acc += value;
            }
        }

        let total = features.len() as f64;
        let class_log_prior = class_count.iter().map(|n| (n / total).ln()).collect();

        let feature_log_prob = feature_count
            .iter()
            .map(|counts| {
                let smoothed: Vec<f64> = counts.iter().map(|c| c + alpha).collect();
                let denominator = smoothed.iter().sum::<f64>().ln();
                smoothed.iter().map(|c| c.ln() - denominator).collect()
            })
            .collect();

        Ok(Self {
            alpha,
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Known classes, sorted
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of features the model was fitted on
    pub fn n_features(&self) -> usize {
        self.feature_log_prob.first().map(Vec::len).unwrap_or(0)
    }

    /// Unnormalised log posterior for each class
    pub fn joint_log_likelihood(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.n_features() {
            return Err(Error::classifier(format!(
                "expected {} features, got {}",
                self.n_features(),
                features.len()
            )));
        }

        Ok(self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_probs)| {
                prior
                    + features
                        .iter()
                        .zip(log_probs)
                        .map(|(x, lp)| x * lp)
                        .sum::<f64>()
            })
            .collect())
    }

    /// Most likely class
    pub fn predict(&self, features: &[f64]) -> Result<&str> {
        let jll = self.joint_log_likelihood(features)?;
        Ok(&self.classes[argmax(&jll)])
    }

    /// Posterior distribution over classes, in class order
    pub fn predict_proba(&self, features: &[f64]) -> Result<Vec<(String, f64)>> {
        let jll = self.joint_log_likelihood(features)?;
        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let log_norm = max + jll.iter().map(|v| (v - max).exp()).sum::<f64>().ln();

        Ok(self
            .classes
            .iter()
            .zip(jll)
            .map(|(class, v)| (class.clone(), (v - log_norm).exp()))
            .collect())
    }
}

/// Index of the first maximum
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (idx, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = idx;
        }
    }
    best
}
