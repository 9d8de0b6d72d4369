//! Live completed/total progress state and its stderr reporter.
mod reporter;


use std::fmt;
use std::time::Duration;

pub(crate) use reporter::setup_progress_reporter;
pub use reporter::ProgressHandle;

/// Unsigned counter widths a [`Ratio`] can carry. Totals past 32-bit
/// range must render in full, so everything funnels through `u128`.
pub trait Counter: Copy + Eq + Ord + fmt::Display {
    fn as_u128(self) -> u128;
}

impl Counter for u32 {
    fn as_u128(self) -> u128 {
        u128::from(self)
    }
}

impl Counter for u64 {
    fn as_u128(self) -> u128 {
        u128::from(self)
    }
}

/// Completed/total progress with an estimated remaining duration.
/// Recomputed on every completion; consumed only by the reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio<T: Counter> {
    pub completed: T,
    pub total: T,
    pub remaining: Duration,
}

impl<T: Counter> Ratio<T> {
    #[must_use]
    pub const fn new(completed: T, total: T, remaining: Duration) -> Self {
        Self {
            completed,
            total,
            remaining,
        }
    }

    /// Linear extrapolation of the remaining time:
    /// `elapsed * remaining_units / completed_units`, zero before the
    /// first completion.
    #[must_use]
    pub fn estimate(completed: T, total: T, elapsed: Duration) -> Self {
        let completed_units = completed.as_u128();
        let remaining_units = total.as_u128().saturating_sub(completed_units);
        let remaining = if completed_units == 0 {
            Duration::ZERO
        } else {
            let millis = elapsed
                .as_millis()
                .saturating_mul(remaining_units)
                .checked_div(completed_units)
                .unwrap_or(0);
            Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
        };
        Self::new(completed, total, remaining)
    }

    /// `completed/total` with the numerator right-aligned to the
    /// denominator's width, e.g. ` 1/12` or `110/230`.
    #[must_use]
    pub fn counter_text(&self) -> String {
        let width = decimal_width(self.total.as_u128());
        format!("{:>width$}/{}", self.completed, self.total, width = width)
    }

    /// Remaining time with one decimal second, e.g. `1.0s`.
    #[must_use]
    pub fn remaining_text(&self) -> String {
        let tenths = self.remaining.as_millis().checked_div(100).unwrap_or(0);
        let secs = tenths.checked_div(10).unwrap_or(0);
        let frac = tenths.checked_rem(10).unwrap_or(0);
        format!("{}.{}s", secs, frac)
    }
}

fn decimal_width(mut value: u128) -> usize {
    let mut width: usize = 1;
    while value >= 10 {
        value = value.checked_div(10).unwrap_or(0);
        width = width.saturating_add(1);
    }
    width
}
