use std::fmt::Write;

use crate::models::{AnalyticsSummary, PredictionRecord};

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

/// Markdown analytics report. `recent` is expected newest first.
pub fn build_report(summary: &AnalyticsSummary, recent: &[PredictionRecord]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Student Success Analytics");
    let _ = writeln!(
        output,
        "{} predictions recorded, mean success index {:.2}",
        summary.total, summary.mean_composite_score
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Tier Distribution");

    for entry in summary.tier_counts.iter() {
        let _ = writeln!(
            output,
            "- {}: {} ({:.1}%)",
            entry.tier,
            entry.count,
            share(entry.count, summary.total)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Predictions");

    if recent.is_empty() {
        let _ = writeln!(output, "No predictions recorded yet.");
    } else {
        for record in recent.iter() {
            let _ = writeln!(
                output,
                "- #{} {} on {}: index {:.2}, {}",
                record.id,
                record.student_name.as_deref().unwrap_or("anonymous"),
                record.prediction_time.format("%Y-%m-%d %H:%M"),
                record.ssi_score,
                record.risk_tier
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::summarize;
    use crate::models::{FeatureRecord, Motivation, ParentSupport};
    use chrono::{TimeZone, Utc};

    fn sample(id: i64, name: Option<&str>, tier: &str, score: f64) -> PredictionRecord {
        PredictionRecord {
            id,
            student_name: name.map(str::to_string),
            input: FeatureRecord {
                study_hours: 20.0,
                attendance: 90.0,
                prev_grade: 85.0,
                motivation: Motivation::High,
                parent_support: ParentSupport::High,
            },
            ssi_score: score,
            risk_tier: tier.to_string(),
            recommendations: Vec::new(),
            prediction_time: Utc
                .with_ymd_and_hms(2026, 2, 2, 9, 30, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn report_lists_distribution_and_recent() {
        let records = vec![
            sample(2, Some("Kiara Patel"), "At Risk", 38.5),
            sample(1, None, "High Success", 92.0),
        ];
        let report = build_report(&summarize(&records), &records);

        assert!(report.contains("2 predictions recorded, mean success index 65.25"));
        assert!(report.contains("- High Success: 1 (50.0%)"));
        assert!(report.contains("- Standard: 0 (0.0%)"));
        assert!(report.contains("- #2 Kiara Patel on 2026-02-02 09:30: index 38.50, At Risk"));
        assert!(report.contains("- #1 anonymous"));
    }

    #[test]
    fn empty_report_is_still_complete() {
        let report = build_report(&summarize(&[]), &[]);
        assert!(report.contains("0 predictions recorded, mean success index 0.00"));
        assert!(report.contains("- At Risk: 0 (0.0%)"));
        assert!(report.contains("No predictions recorded yet."));
    }
}
