//! Categorical-to-numeric lookup tables shared by the composite scorer and the
//! classifier feature vector. Both paths must read these tables; a second copy
//! of the mapping anywhere else is a bug.

use tracing::warn;

use crate::models::{CategoryWarning, FeatureRecord, Motivation, ParentSupport};

/// Numeric value for any label outside its declared domain.
pub const FALLBACK_LEVEL: f64 = 0.5;

pub const MOTIVATION_LEVELS: [(&str, f64); 3] = [("Low", 0.0), ("Medium", 1.0), ("High", 2.0)];

pub const PARENT_SUPPORT_LEVELS: [(&str, f64); 2] = [("Low", 0.0), ("High", 1.0)];

fn lookup(table: &[(&str, f64)], label: &str) -> Option<f64> {
    table
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, value)| *value)
}

pub fn motivation_level(motivation: &Motivation) -> f64 {
    lookup(&MOTIVATION_LEVELS, motivation.label()).unwrap_or(FALLBACK_LEVEL)
}

pub fn parent_support_level(support: &ParentSupport) -> f64 {
    lookup(&PARENT_SUPPORT_LEVELS, support.label()).unwrap_or(FALLBACK_LEVEL)
}

/// Model input in the fixed order
/// `[study_hours, attendance, prev_grade, motivation, parent_support]`.
pub fn feature_vector(record: &FeatureRecord) -> [f64; 5] {
    [
        record.study_hours,
        record.attendance,
        record.prev_grade,
        motivation_level(&record.motivation),
        parent_support_level(&record.parent_support),
    ]
}

/// Lists every categorical field that resolved to the fallback level.
pub fn category_warnings(record: &FeatureRecord) -> Vec<CategoryWarning> {
    let mut warnings = Vec::new();

    if let Motivation::Unrecognized(value) = &record.motivation {
        warnings.push(CategoryWarning {
            field: "motivation",
            value: value.clone(),
            fallback: FALLBACK_LEVEL,
        });
    }

    if let ParentSupport::Unrecognized(value) = &record.parent_support {
        warnings.push(CategoryWarning {
            field: "parent_support",
            value: value.clone(),
            fallback: FALLBACK_LEVEL,
        });
    }

    for warning in &warnings {
        warn!(field = warning.field, value = %warning.value, "{warning}");
    }

    warnings
}
