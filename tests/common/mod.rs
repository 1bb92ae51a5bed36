#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;

use groupscholar_success_predictor::classifier::{
    Classifier, ClassifierError, ClassifierOutput, FEATURE_COUNT,
};
use groupscholar_success_predictor::db::{PredictionStore, SqliteStore, StoreError};
use groupscholar_success_predictor::models::{NewPrediction, PredictionRecord, RawPredictionInput};

pub async fn memory_store() -> Arc<SqliteStore> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite opens");
    let store = SqliteStore::from_pool(pool);
    store.init_db().await.expect("schema applies");
    Arc::new(store)
}

pub fn raw(
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
        student_name: None,
    }
}

/// Returns a fixed output and remembers every vector it was asked about.
pub struct StubClassifier {
    pub output: ClassifierOutput,
    pub seen: Mutex<Vec<[f64; FEATURE_COUNT]>>,
}

impl StubClassifier {
    pub fn new(label: usize, probabilities: Vec<f64>) -> Arc<Self> {
        Arc::new(Self {
            output: ClassifierOutput {
                label,
                probabilities,
            },
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl Classifier for StubClassifier {
    fn name(&self) -> &str {
        "stub"
    }

    fn predict(
        &self,
        features: &[f64; FEATURE_COUNT],
    ) -> Result<ClassifierOutput, ClassifierError> {
        self.seen.lock().expect("stub mutex poisoned").push(*features);
        Ok(self.output.clone())
    }
}

pub struct BrokenClassifier;

impl Classifier for BrokenClassifier {
    fn name(&self) -> &str {
        "broken"
    }

    fn predict(
        &self,
        _features: &[f64; FEATURE_COUNT],
    ) -> Result<ClassifierOutput, ClassifierError> {
        Err(ClassifierError::NonFinite)
    }
}

/// Store whose writes always fail.
pub struct UnavailableStore;

#[async_trait]
impl PredictionStore for UnavailableStore {
    async fn append(&self, _prediction: &NewPrediction) -> Result<i64, StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolClosed))
    }

    async fn list_all(&self) -> Result<Vec<PredictionRecord>, StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolClosed))
    }

    async fn recent(&self, _limit: usize) -> Result<Vec<PredictionRecord>, StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolClosed))
    }
}
