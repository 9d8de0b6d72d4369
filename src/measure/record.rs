use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logical request attempt: opened when the request starts, closed
/// exactly once with an end timestamp and status, immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub target: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: Option<u16>,
}

impl OutcomeRecord {
    pub(crate) fn begin(target: &str) -> Self {
        Self {
            target: target.to_owned(),
            started_at: Utc::now(),
            ended_at: None,
            status: None,
        }
    }

    pub(crate) fn finish(&mut self, status: u16) {
        self.ended_at = Some(Utc::now());
        self.status = Some(status);
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Elapsed time between open and close, `None` while the record is
    /// still open or if the clock went backwards.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        let ended_at = self.ended_at?;
        ended_at
            .signed_duration_since(self.started_at)
            .to_std()
            .ok()
    }
}
