use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Motivation {
    Low,
    Medium,
    High,
    Unrecognized(String),
}

impl Motivation {
    pub fn label(&self) -> &str {
        match self {
            Motivation::Low => "Low",
            Motivation::Medium => "Medium",
            Motivation::High => "High",
            Motivation::Unrecognized(value) => value,
        }
    }
}

impl From<String> for Motivation {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Low" => Motivation::Low,
            "Medium" => Motivation::Medium,
            "High" => Motivation::High,
            _ => Motivation::Unrecognized(value),
        }
    }
}

impl From<&str> for Motivation {
    fn from(value: &str) -> Self {
        Motivation::from(value.to_string())
    }
}

impl From<Motivation> for String {
    fn from(value: Motivation) -> Self {
        match value {
            Motivation::Unrecognized(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ParentSupport {
    Low,
    High,
    Unrecognized(String),
}

impl ParentSupport {
    pub fn label(&self) -> &str {
        match self {
            ParentSupport::Low => "Low",
            ParentSupport::High => "High",
            ParentSupport::Unrecognized(value) => value,
        }
    }
}

impl From<String> for ParentSupport {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Low" => ParentSupport::Low,
            "High" => ParentSupport::High,
            _ => ParentSupport::Unrecognized(value),
        }
    }
}

impl From<&str> for ParentSupport {
    fn from(value: &str) -> Self {
        ParentSupport::from(value.to_string())
    }
}

impl From<ParentSupport> for String {
    fn from(value: ParentSupport) -> Self {
        match value {
            ParentSupport::Unrecognized(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

/// Coerced inputs for one prediction. This is also the shape persisted as
/// `input_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub study_hours: f64,
    pub attendance: f64,
    pub prev_grade: f64,
    pub motivation: Motivation,
    pub parent_support: ParentSupport,
}

/// Untrusted form/CSV input before type coercion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPredictionInput {
    pub study_hours: String,
    pub attendance: String,
    pub prev_grade: String,
    pub motivation: String,
    pub parent_support: String,
    #[serde(default)]
    pub student_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "At Risk")]
    AtRisk,
    #[serde(rename = "Standard")]
    Standard,
    #[serde(rename = "Medium Success")]
    MediumSuccess,
    #[serde(rename = "High Success")]
    HighSuccess,
}

impl Tier {
    /// Ladder order, best tier first.
    pub const ALL: [Tier; 4] = [
        Tier::HighSuccess,
        Tier::MediumSuccess,
        Tier::Standard,
        Tier::AtRisk,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tier::HighSuccess => "High Success",
            Tier::MediumSuccess => "Medium Success",
            Tier::Standard => "Standard",
            Tier::AtRisk => "At Risk",
        }
    }

    pub fn from_label(label: &str) -> Option<Tier> {
        Tier::ALL.into_iter().find(|tier| tier.label() == label)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A categorical value outside its declared domain. Non-fatal: the fallback
/// weight is used instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWarning {
    pub field: &'static str,
    pub value: String,
    pub fallback: f64,
}

impl fmt::Display for CategoryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized {} '{}', using fallback {}",
            self.field, self.value, self.fallback
        )
    }
}

/// Write form of a prediction, handed to the store.
#[derive(Debug, Clone)]
pub struct NewPrediction {
    pub student_name: Option<String>,
    pub input: FeatureRecord,
    pub ssi_score: f64,
    pub tier: Tier,
    pub recommendations: Vec<String>,
    pub prediction_time: DateTime<Utc>,
}

/// A stored prediction as read back from the history table. The tier stays
/// as its stored label so rows written by other tools still aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRecord {
    pub id: i64,
    pub student_name: Option<String>,
    pub input: FeatureRecord,
    pub ssi_score: f64,
    pub risk_tier: String,
    pub recommendations: Vec<String>,
    pub prediction_time: DateTime<Utc>,
}

impl PredictionRecord {
    pub fn tier(&self) -> Option<Tier> {
        Tier::from_label(&self.risk_tier)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionOutcome {
    pub id: i64,
    pub composite_score: f64,
    pub tier: Tier,
    pub confidence: f64,
    pub predicted_label: usize,
    pub recommendations: Vec<String>,
    pub warnings: Vec<CategoryWarning>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierCount {
    pub tier: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub total: usize,
    pub tier_counts: Vec<TierCount>,
    pub mean_composite_score: f64,
}

impl AnalyticsSummary {
    pub fn count_for(&self, label: &str) -> usize {
        self.tier_counts
            .iter()
            .find(|entry| entry.tier == label)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    pub fn count(&self, tier: Tier) -> usize {
        self.count_for(tier.label())
    }
}
