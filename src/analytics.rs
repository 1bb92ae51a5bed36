use std::sync::Arc;

use crate::db::{PredictionStore, StoreError};
use crate::models::{AnalyticsSummary, PredictionRecord, Tier, TierCount};
use crate::risk::round2;

/// Tier distribution and mean score over `records`. All four known tiers are
/// always present; labels outside them are counted after the known ones.
pub fn summarize(records: &[PredictionRecord]) -> AnalyticsSummary {
    let mut tier_counts: Vec<TierCount> = Tier::ALL
        .iter()
        .map(|tier| TierCount {
            tier: tier.label().to_string(),
            count: 0,
        })
        .collect();

    let mut total_score = 0.0;

    for record in records {
        match tier_counts
            .iter_mut()
            .find(|entry| entry.tier == record.risk_tier)
        {
            Some(entry) => entry.count += 1,
            None => tier_counts.push(TierCount {
                tier: record.risk_tier.clone(),
                count: 1,
            }),
        }
        total_score += record.ssi_score;
    }

    let mean_composite_score = if records.is_empty() {
        0.0
    } else {
        round2(total_score / records.len() as f64)
    };

    AnalyticsSummary {
        total: records.len(),
        tier_counts,
        mean_composite_score,
    }
}

/// Recomputes the summary from the full history on every call.
pub struct Analytics {
    store: Arc<dyn PredictionStore>,
}

impl Analytics {
    pub fn new(store: Arc<dyn PredictionStore>) -> Self {
        Self { store }
    }

    pub async fn summary(&self) -> Result<AnalyticsSummary, StoreError> {
        let records = self.store.list_all().await?;
        Ok(summarize(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeatureRecord, Motivation, ParentSupport};
    use chrono::Utc;

    fn record(id: i64, tier: &str, score: f64) -> PredictionRecord {
        PredictionRecord {
            id,
            student_name: None,
            input: FeatureRecord {
                study_hours: 10.0,
                attendance: 80.0,
                prev_grade: 70.0,
                motivation: Motivation::Medium,
                parent_support: ParentSupport::High,
            },
            ssi_score: score,
            risk_tier: tier.to_string(),
            recommendations: Vec::new(),
            prediction_time: Utc::now(),
        }
    }

    #[test]
    fn empty_history_has_zero_counts_and_mean() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.mean_composite_score, 0.0);
        assert_eq!(summary.tier_counts.len(), 4);
        for tier in Tier::ALL {
            assert_eq!(summary.count(tier), 0);
        }
    }

    #[test]
    fn counts_tiers_and_averages_scores() {
        let records = vec![
            record(1, "High Success", 92.0),
            record(2, "At Risk", 38.5),
            record(3, "High Success", 88.0),
        ];
        let summary = summarize(&records);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.count(Tier::HighSuccess), 2);
        assert_eq!(summary.count(Tier::AtRisk), 1);
        assert_eq!(summary.count(Tier::Standard), 0);
        assert_eq!(summary.mean_composite_score, 72.83);
    }

    #[test]
    fn unknown_tier_labels_are_still_counted() {
        let records = vec![record(1, "Legacy", 50.0), record(2, "Standard", 60.0)];
        let summary = summarize(&records);

        assert_eq!(summary.tier_counts.len(), 5);
        assert_eq!(summary.count_for("Legacy"), 1);
        assert_eq!(summary.tier_counts[4].tier, "Legacy");
        assert_eq!(summary.mean_composite_score, 55.0);
    }

    #[test]
    fn known_tiers_keep_ladder_order() {
        let summary = summarize(&[record(1, "At Risk", 10.0)]);
        let labels: Vec<&str> = summary.tier_counts.iter().map(|e| e.tier.as_str()).collect();
        assert_eq!(
            labels,
            vec!["High Success", "Medium Success", "Standard", "At Risk"]
        );
    }
}
