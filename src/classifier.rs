use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::risk::round2;

pub const FEATURE_COUNT: usize = 5;

/// Label and per-class probabilities for one feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOutput {
    pub label: usize,
    pub probabilities: Vec<f64>,
}

impl ClassifierOutput {
    /// Probability of the predicted label as a percentage.
    pub fn confidence(&self) -> f64 {
        let probability = self.probabilities.get(self.label).copied().unwrap_or(0.0);
        round2(probability * 100.0)
    }
}

/// Advisory model consulted by the prediction pipeline. Its label is display
/// only and never feeds the tier.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<ClassifierOutput, ClassifierError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("failed to read model file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse model file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid model: {0}")]
    InvalidModel(String),
    #[error("model produced a non-finite probability")]
    NonFinite,
}

/// Binary logistic model over the five-feature vector. Label 1 is "Good",
/// label 0 is "At Risk".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub model_name: String,
    pub weights: Vec<f64>,
    pub bias: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    0.2
}

impl Default for LogisticClassifier {
    /// Decision boundary of the synthetic training labels:
    /// `0.25*study + 0.25*attendance + 0.30*prev + 10*motivation + 10*support > 100`.
    fn default() -> Self {
        Self {
            model_name: "synthetic-performance-v1".to_string(),
            weights: vec![0.25, 0.25, 0.30, 10.0, 10.0],
            bias: -100.0,
            scale: default_scale(),
        }
    }
}

impl LogisticClassifier {
    pub fn load_model(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ClassifierError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: LogisticClassifier = serde_json::from_str(&raw)?;
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.weights.len() != FEATURE_COUNT {
            return Err(ClassifierError::InvalidModel(format!(
                "expected {FEATURE_COUNT} weights, found {}",
                self.weights.len()
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ClassifierError::InvalidModel(
                "scale must be a positive finite number".to_string(),
            ));
        }
        if !self.bias.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(ClassifierError::InvalidModel(
                "weights and bias must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

impl Classifier for LogisticClassifier {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<ClassifierOutput, ClassifierError> {
        let margin = self
            .weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias;
        let good = 1.0 / (1.0 + (-self.scale * margin).exp());

        if !good.is_finite() {
            return Err(ClassifierError::NonFinite);
        }

        Ok(ClassifierOutput {
            label: usize::from(good > 0.5),
            probabilities: vec![1.0 - good, good],
        })
    }
}
