use std::path::Path;

use crate::error::AppResult;
use crate::measure::RunResult;
use crate::store;

use super::RunStats;

/// Absolute and relative change from the left run to the right run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    pub absolute: f64,
    pub relative: f64,
}

impl Delta {
    fn between(left: f64, right: f64) -> Self {
        let absolute = right - left;
        let relative = if left.abs() < f64::EPSILON {
            0.0
        } else {
            absolute / left
        };
        Self { absolute, relative }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.absolute.abs() < f64::EPSILON && self.relative.abs() < f64::EPSILON
    }
}

/// Per-statistic comparison of two runs, labelled by which side each
/// run came from. Diffing a run against itself yields all-zero deltas.
#[derive(Debug, Clone)]
pub struct StatsDiff {
    pub left_label: String,
    pub right_label: String,
    pub left: RunStats,
    pub right: RunStats,
    pub completed: Delta,
    pub min_ms: Delta,
    pub max_ms: Delta,
    pub mean_ms: Delta,
    pub std_dev_ms: Delta,
    pub requests_per_sec: Delta,
    pub bytes_per_sec: Delta,
}

impl StatsDiff {
    /// Named rows in display order: (statistic, left, right, delta).
    #[must_use]
    pub fn rows(&self) -> Vec<(&'static str, f64, f64, Delta)> {
        vec![
            (
                "Completed",
                stat_f64(self.left.completed),
                stat_f64(self.right.completed),
                self.completed,
            ),
            ("Min latency (ms)", self.left.min_ms, self.right.min_ms, self.min_ms),
            ("Max latency (ms)", self.left.max_ms, self.right.max_ms, self.max_ms),
            ("Mean latency (ms)", self.left.mean_ms, self.right.mean_ms, self.mean_ms),
            (
                "Std dev (ms)",
                self.left.std_dev_ms,
                self.right.std_dev_ms,
                self.std_dev_ms,
            ),
            (
                "Requests/sec",
                self.left.requests_per_sec,
                self.right.requests_per_sec,
                self.requests_per_sec,
            ),
            (
                "Bytes/sec",
                self.left.bytes_per_sec,
                self.right.bytes_per_sec,
                self.bytes_per_sec,
            ),
        ]
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.rows().iter().all(|(_, _, _, delta)| delta.is_zero())
    }
}

/// Diffs two in-memory results. The path-based entry points below reduce
/// to this, so equivalent underlying data always yields identical output.
#[must_use]
pub fn diff_results(
    left: &RunResult,
    right: &RunResult,
    left_label: &str,
    right_label: &str,
) -> StatsDiff {
    let left_stats = RunStats::from_result(left);
    let right_stats = RunStats::from_result(right);

    StatsDiff {
        left_label: left_label.to_owned(),
        right_label: right_label.to_owned(),
        left: left_stats,
        right: right_stats,
        completed: Delta::between(stat_f64(left_stats.completed), stat_f64(right_stats.completed)),
        min_ms: Delta::between(left_stats.min_ms, right_stats.min_ms),
        max_ms: Delta::between(left_stats.max_ms, right_stats.max_ms),
        mean_ms: Delta::between(left_stats.mean_ms, right_stats.mean_ms),
        std_dev_ms: Delta::between(left_stats.std_dev_ms, right_stats.std_dev_ms),
        requests_per_sec: Delta::between(
            left_stats.requests_per_sec,
            right_stats.requests_per_sec,
        ),
        bytes_per_sec: Delta::between(left_stats.bytes_per_sec, right_stats.bytes_per_sec),
    }
}

/// Diffs two persisted results.
///
/// # Errors
///
/// Returns an error when either path cannot be loaded or its schema
/// version does not match.
pub fn diff_paths(left: &Path, right: &Path) -> AppResult<StatsDiff> {
    let left_result = store::load(left)?;
    let right_result = store::load(right)?;
    Ok(diff_results(
        &left_result,
        &right_result,
        &path_label(left),
        &path_label(right),
    ))
}

/// Diffs an in-memory result against a persisted one.
///
/// # Errors
///
/// Returns an error when the persisted side cannot be loaded.
pub fn diff_result_with_path(left: &RunResult, right: &Path) -> AppResult<StatsDiff> {
    let right_result = store::load(right)?;
    Ok(diff_results(
        left,
        &right_result,
        "current",
        &path_label(right),
    ))
}

fn path_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map(|value| value.to_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn stat_f64(value: u64) -> f64 {
    super::f64_from_u64(value)
}
