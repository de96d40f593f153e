//! Correlates job attributes with success rate over a snapshot of job records.

use crate::events::JobStatus;
use crate::record::JobRecord;
use serde::Serialize;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub total_jobs: usize,
    pub overall_success_rate: f64,
    pub patterns: Vec<PatternStats>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternStats {
    pub pattern: &'static str,
    pub match_count: usize,
    pub success_rate: f64,
    /// Signed percentage deviation from the overall success rate, e.g. `+50%`.
    pub difference_from_average: String,
}

struct Pattern {
    name: &'static str,
    matches: fn(&JobRecord) -> bool,
}

const PATTERNS: [Pattern; 6] = [
    Pattern {
        name: "Job name length > 10",
        matches: |job| job.name.encode_utf16().count() > 10,
    },
    Pattern {
        name: "Argument count >= 2",
        matches: |job| job.args.len() >= 2,
    },
    Pattern {
        name: "Job name contains digits",
        matches: |job| job.name.chars().any(|c| c.is_ascii_digit()),
    },
    Pattern {
        name: "Job execution time > 1 second",
        matches: |job| job.duration_ms().is_some_and(|ms| ms > 1000),
    },
    Pattern {
        name: "Jobs that were retried",
        matches: |job| job.retry_count > 0,
    },
    Pattern {
        name: "Job name starts with test-",
        matches: |job| job.name.starts_with("test-"),
    },
];

pub fn analyze(jobs: &[JobRecord]) -> StatsReport {
    let total_jobs = jobs.len();
    if total_jobs == 0 {
        return StatsReport {
            total_jobs: 0,
            overall_success_rate: 0.0,
            patterns: vec![],
        };
    }

    let overall_success_rate = success_rate(jobs.iter());
    let patterns = PATTERNS
        .iter()
        .map(|pattern| {
            let matching: Vec<&JobRecord> =
                jobs.iter().filter(|job| (pattern.matches)(job)).collect();
            let match_count = matching.len();
            let success_rate = success_rate(matching.into_iter());
            let difference = if match_count == 0 || overall_success_rate == 0.0 {
                0.0
            } else {
                (success_rate - overall_success_rate) / overall_success_rate * 100.0
            };
            PatternStats {
                pattern: pattern.name,
                match_count,
                success_rate: round2(success_rate),
                difference_from_average: signed_percent(difference),
            }
        })
        .collect();

    info!(
        "Generated stats: {} jobs, {:.2} success rate",
        total_jobs, overall_success_rate
    );
    StatsReport {
        total_jobs,
        overall_success_rate: round2(overall_success_rate),
        patterns,
    }
}

fn success_rate<'a>(jobs: impl ExactSizeIterator<Item = &'a JobRecord>) -> f64 {
    let total = jobs.len();
    if total == 0 {
        return 0.0;
    }
    let completed = jobs
        .filter(|job| job.status == JobStatus::Completed)
        .count();
    completed as f64 / total as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whole percent with an explicit sign. The sign follows the unrounded value, so a
/// small negative deviation prints as `-0%`.
fn signed_percent(value: f64) -> String {
    if value >= 0.0 {
        format!("+{}%", value.round() as i64)
    } else {
        format!("-{}%", (-value).round() as i64)
    }
}
