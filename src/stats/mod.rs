//! Descriptive statistics over a run's outcome records.
mod diff;


use chrono::{DateTime, Utc};

use crate::measure::RunResult;

pub use diff::{Delta, StatsDiff, diff_paths, diff_result_with_path, diff_results};

/// Summary statistics recomputable bit-for-bit from a persisted
/// [`RunResult`]. Throughput counts completed requests only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunStats {
    pub completed: u64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub mean_ms: f64,
    pub std_dev_ms: f64,
    pub wall_clock_secs: f64,
    pub requests_per_sec: f64,
    pub bytes_per_sec: f64,
    pub total_bytes: u64,
    pub peak_connections: u64,
}

impl RunStats {
    #[must_use]
    pub fn from_result(result: &RunResult) -> Self {
        let durations_ms: Vec<f64> = result
            .records
            .iter()
            .filter_map(|record| record.duration())
            .map(|duration| duration.as_secs_f64() * 1000.0)
            .collect();

        let completed = u64::try_from(durations_ms.len()).unwrap_or(u64::MAX);
        let (min_ms, max_ms, mean_ms, std_dev_ms) = describe(&durations_ms);
        let wall_clock_secs = wall_clock_span(result);

        let (requests_per_sec, bytes_per_sec) = if wall_clock_secs > 0.0 {
            let completed_f = f64_from_u64(completed);
            let bytes_f = f64_from_u64(result.total_bytes);
            (completed_f / wall_clock_secs, bytes_f / wall_clock_secs)
        } else {
            (0.0, 0.0)
        };

        Self {
            completed,
            min_ms,
            max_ms,
            mean_ms,
            std_dev_ms,
            wall_clock_secs,
            requests_per_sec,
            bytes_per_sec,
            total_bytes: result.total_bytes,
            peak_connections: result.peak_connections,
        }
    }
}

/// Minimum, maximum, arithmetic mean and population standard deviation.
fn describe(values: &[f64]) -> (f64, f64, f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }

    let count = f64_from_u64(u64::try_from(values.len()).unwrap_or(u64::MAX));
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for value in values {
        min = min.min(*value);
        max = max.max(*value);
        sum += value;
    }
    let mean = sum / count;

    let variance = values
        .iter()
        .map(|value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
        / count;

    (min, max, mean, variance.sqrt())
}

/// Span from the earliest record open to the latest record close.
fn wall_clock_span(result: &RunResult) -> f64 {
    let first_start: Option<DateTime<Utc>> =
        result.records.iter().map(|record| record.started_at).min();
    let last_end: Option<DateTime<Utc>> = result
        .records
        .iter()
        .filter_map(|record| record.ended_at)
        .max();

    match (first_start, last_end) {
        (Some(start), Some(end)) => end
            .signed_duration_since(start)
            .to_std()
            .map(|span| span.as_secs_f64())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

// Precision loss past 2^53 is acceptable for descriptive stats.
fn f64_from_u64(value: u64) -> f64 {
    value as f64
}
