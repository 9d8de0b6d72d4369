use thiserror::Error;

use crate::telemetry::TelemetrySource;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Telemetry tap for {source} counters is already subscribed.")]
    AlreadySubscribed { source: TelemetrySource },
    #[error("Telemetry tap was drained without an active subscription.")]
    NotSubscribed,
    #[error("Telemetry accumulator task failed: {source}")]
    AccumulatorFailed { source: tokio::task::JoinError },
}
