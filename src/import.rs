use std::path::Path;

use tracing::info;

use crate::models::RawPredictionInput;
use crate::pipeline::{PredictionError, PredictionPipeline};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {source}")]
    Row {
        row: usize,
        source: PredictionError,
    },
}

/// Runs every CSV row through the pipeline. Columns:
/// `study_hours,attendance,prev_grade,motivation,parent_support[,student_name]`.
/// Stops at the first failing row; earlier rows stay stored.
pub async fn import_csv(
    pipeline: &PredictionPipeline,
    csv_path: &Path,
) -> Result<usize, ImportError> {
    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut inserted = 0usize;

    for (index, result) in reader.deserialize::<RawPredictionInput>().enumerate() {
        let row = result?;
        pipeline
            .predict(&row)
            .await
            .map_err(|source| ImportError::Row {
                row: index + 1,
                source,
            })?;
        inserted += 1;
    }

    info!(inserted, path = %csv_path.display(), "csv import finished");
    Ok(inserted)
}

fn sample(
    name: &str,
    study_hours: &str,
    attendance: &str,
    prev_grade: &str,
    motivation: &str,
    parent_support: &str,
) -> RawPredictionInput {
    RawPredictionInput {
        study_hours: study_hours.to_string(),
        attendance: attendance.to_string(),
        prev_grade: prev_grade.to_string(),
        motivation: motivation.to_string(),
        parent_support: parent_support.to_string(),
        student_name: Some(name.to_string()),
    }
}

/// Stores a handful of realistic predictions, one per tier.
pub async fn seed(pipeline: &PredictionPipeline) -> Result<usize, PredictionError> {
    let samples = vec![
        sample("Avery Lee", "20", "90", "85", "High", "High"),
        sample("Jules Moreno", "12", "85", "78", "Medium", "High"),
        sample("Kiara Patel", "8", "80", "70", "Medium", "Low"),
        sample("Rowan Diaz", "5", "60", "50", "Low", "Low"),
    ];

    let mut inserted = 0usize;
    for raw in samples.iter() {
        pipeline.predict(raw).await?;
        inserted += 1;
    }

    Ok(inserted)
}
