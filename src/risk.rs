use crate::encoding::{motivation_level, parent_support_level};
use crate::models::{FeatureRecord, Tier};

pub const ATTENDANCE_WEIGHT: f64 = 0.25;
pub const STUDY_HOURS_WEIGHT: f64 = 0.20;
pub const PREV_GRADE_WEIGHT: f64 = 0.30;
pub const MOTIVATION_WEIGHT: f64 = 0.15;
pub const PARENT_SUPPORT_WEIGHT: f64 = 0.10;

/// Inclusive lower bounds, checked best tier first.
pub const TIER_THRESHOLDS: [(f64, Tier); 3] = [
    (85.0, Tier::HighSuccess),
    (70.0, Tier::MediumSuccess),
    (55.0, Tier::Standard),
];

/// Student Success Index. Out-of-range inputs are not clamped.
pub fn composite_score(features: &FeatureRecord) -> f64 {
    let score = features.attendance * ATTENDANCE_WEIGHT
        + features.study_hours * STUDY_HOURS_WEIGHT
        + features.prev_grade * PREV_GRADE_WEIGHT
        + motivation_level(&features.motivation) * MOTIVATION_WEIGHT * 100.0
        + parent_support_level(&features.parent_support) * PARENT_SUPPORT_WEIGHT * 100.0;

    round2(score)
}

pub fn classify(score: f64) -> Tier {
    TIER_THRESHOLDS
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|(_, tier)| *tier)
        .unwrap_or(Tier::AtRisk)
}

/// Two-decimal rounding on the exact decimal expansion, ties to even. Never
/// overflows a finite value.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}
