use serde::{Deserialize, Serialize};

use super::record::OutcomeRecord;

/// Bumped whenever the persisted layout changes shape. Loading a result
/// written under a different version is refused.
pub const SCHEMA_VERSION: u32 = 1;

/// The knobs that shaped a run. Immutable for the run's duration and
/// persisted alongside its records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPolicy {
    pub clients: u64,
    pub requests: u64,
    pub follow_redirects: bool,
    pub validate_certs: bool,
    pub verbose: bool,
}

/// The full output of one run: every measured record, the drained
/// telemetry totals, and the policy that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub schema: u32,
    pub records: Vec<OutcomeRecord>,
    pub total_bytes: u64,
    pub peak_connections: u64,
    pub policy: RunPolicy,
}

impl RunResult {
    #[must_use]
    pub fn new(
        records: Vec<OutcomeRecord>,
        total_bytes: u64,
        peak_connections: u64,
        policy: RunPolicy,
    ) -> Self {
        Self {
            schema: SCHEMA_VERSION,
            records,
            total_bytes,
            peak_connections,
            policy,
        }
    }
}
