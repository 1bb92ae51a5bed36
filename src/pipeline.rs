use std::sync::Arc;

use chrono::Utc;
use tracing::{info, info_span, Instrument};

use crate::classifier::{Classifier, ClassifierError};
use crate::db::{PredictionStore, StoreError};
use crate::encoding::{category_warnings, feature_vector};
use crate::models::{FeatureRecord, NewPrediction, PredictionOutcome, RawPredictionInput};
use crate::recommendations::recommendation_set;
use crate::risk::{classify, composite_score};

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("field '{field}' must be numeric, got '{value}'")]
    InputFormat { field: &'static str, value: String },
    #[error("classifier failed: {0}")]
    Classifier(#[from] ClassifierError),
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, PredictionError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| PredictionError::InputFormat {
            field,
            value: raw.to_string(),
        })
}

/// Coerces raw form values into a feature record. Numbers must parse;
/// categorical labels are kept as given.
pub fn coerce(raw: &RawPredictionInput) -> Result<FeatureRecord, PredictionError> {
    Ok(FeatureRecord {
        study_hours: parse_number("study_hours", &raw.study_hours)?,
        attendance: parse_number("attendance", &raw.attendance)?,
        prev_grade: parse_number("prev_grade", &raw.prev_grade)?,
        motivation: raw.motivation.trim().into(),
        parent_support: raw.parent_support.trim().into(),
    })
}

/// Scores a request, consults the classifier and persists exactly one record.
/// Nothing is stored when any step fails.
pub struct PredictionPipeline {
    classifier: Arc<dyn Classifier>,
    store: Arc<dyn PredictionStore>,
}

impl PredictionPipeline {
    pub fn new(classifier: Arc<dyn Classifier>, store: Arc<dyn PredictionStore>) -> Self {
        Self { classifier, store }
    }

    pub async fn predict(
        &self,
        raw: &RawPredictionInput,
    ) -> Result<PredictionOutcome, PredictionError> {
        let span = info_span!("predict", model = self.classifier.name());
        self.run(raw).instrument(span).await
    }

    async fn run(&self, raw: &RawPredictionInput) -> Result<PredictionOutcome, PredictionError> {
        let features = coerce(raw)?;
        let warnings = category_warnings(&features);

        let model_output = self.classifier.predict(&feature_vector(&features))?;

        let score = composite_score(&features);
        let tier = classify(score);
        let recommendations = recommendation_set(tier);

        let student_name = raw
            .student_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let id = self
            .store
            .append(&NewPrediction {
                student_name,
                input: features,
                ssi_score: score,
                tier,
                recommendations: recommendations.clone(),
                prediction_time: Utc::now(),
            })
            .await?;

        let confidence = model_output.confidence();
        info!(id, score, tier = tier.label(), confidence, "prediction recorded");

        Ok(PredictionOutcome {
            id,
            composite_score: score,
            tier,
            confidence,
            predicted_label: model_output.label,
            recommendations,
            warnings,
        })
    }
}
