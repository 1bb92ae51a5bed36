use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::{debug, error, info};

use crate::models::{FeatureRecord, NewPrediction, PredictionRecord};

/// Append-only prediction history.
#[async_trait]
pub trait PredictionStore: Send + Sync {
    /// Durably stores one prediction and returns its id.
    async fn append(&self, prediction: &NewPrediction) -> Result<i64, StoreError>;
    /// Every stored prediction, oldest first.
    async fn list_all(&self) -> Result<Vec<PredictionRecord>, StoreError>;
    /// The most recent predictions, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<PredictionRecord>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("prediction store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
    #[error("failed to apply schema migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("failed to encode prediction: {0}")]
    Encode(serde_json::Error),
    #[error("stored prediction {id} is unreadable: {source}")]
    Corrupt {
        id: i64,
        source: serde_json::Error,
    },
}

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn init_db(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("prediction_history schema ready");
        Ok(())
    }
}

fn record_from_row(row: &SqliteRow) -> Result<PredictionRecord, StoreError> {
    let id: i64 = row.try_get("id")?;
    let input_data: String = row.try_get("input_data")?;
    let recommendations: String = row.try_get("recommendations")?;
    let prediction_time: DateTime<Utc> = row.try_get("prediction_time")?;

    let input: FeatureRecord = serde_json::from_str(&input_data)
        .map_err(|source| StoreError::Corrupt { id, source })?;
    let recommendations: Vec<String> = serde_json::from_str(&recommendations)
        .map_err(|source| StoreError::Corrupt { id, source })?;

    Ok(PredictionRecord {
        id,
        student_name: row.try_get("student_name")?,
        input,
        ssi_score: row.try_get("ssi_score")?,
        risk_tier: row.try_get("risk_tier")?,
        recommendations,
        prediction_time,
    })
}

#[async_trait]
impl PredictionStore for SqliteStore {
    async fn append(&self, prediction: &NewPrediction) -> Result<i64, StoreError> {
        let input_data = serde_json::to_string(&prediction.input).map_err(StoreError::Encode)?;
        let recommendations =
            serde_json::to_string(&prediction.recommendations).map_err(StoreError::Encode)?;

        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            r#"
            INSERT INTO prediction_history
            (student_name, input_data, ssi_score, risk_tier, recommendations, prediction_time)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(prediction.student_name.as_deref())
        .bind(input_data)
        .bind(prediction.ssi_score)
        .bind(prediction.tier.label())
        .bind(recommendations)
        .bind(prediction.prediction_time)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        if let Err(e) = tx.commit().await {
            error!("failed to commit prediction: {}", e);
            return Err(e.into());
        }

        debug!(id, tier = prediction.tier.label(), "prediction stored");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<PredictionRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, student_name, input_data, ssi_score, risk_tier, recommendations, prediction_time
            FROM prediction_history
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(record_from_row).collect()
    }

    async fn recent(&self, limit: usize) -> Result<Vec<PredictionRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, student_name, input_data, ssi_score, risk_tier, recommendations, prediction_time
            FROM prediction_history
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(record_from_row).collect()
    }
}
