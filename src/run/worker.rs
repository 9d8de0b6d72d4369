use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::time::Instant;
use tracing::debug;

use crate::error::AppResult;
use crate::http::{Attempt, RequestExecutor};
use crate::measure::{MeasureSession, OutcomeRecord};
use crate::progress::{ProgressHandle, Ratio};
use crate::telemetry::TelemetrySender;

use super::counters::SharedCounters;

pub(super) struct WorkerContext {
    pub(super) executor: RequestExecutor,
    pub(super) target: String,
    pub(super) counters: Arc<SharedCounters>,
    pub(super) telemetry: TelemetrySender,
    pub(super) progress: Arc<ProgressHandle>,
    pub(super) cancelled: Arc<AtomicBool>,
    pub(super) run_start: Instant,
}

/// One concurrent client: an untimed warm-up to populate connection
/// state, then a loop claiming tickets until the counter is exhausted
/// or the run is cancelled. Cancellation never aborts a request that is
/// already in flight.
pub(super) async fn run_worker(context: WorkerContext) -> AppResult<Vec<OutcomeRecord>> {
    let warmup = context.executor.execute(&context.telemetry).await;
    debug!(?warmup, "Warm-up request finished");

    let mut session = MeasureSession::with_capacity(estimated_share(&context.counters));

    while !context.cancelled.load(Ordering::SeqCst) {
        let Some(ticket) = context.counters.tickets.claim() else {
            break;
        };

        session.open(&context.target)?;
        match context.executor.execute(&context.telemetry).await {
            Attempt::Completed { status, .. } => {
                session.close(status)?;
                let completed = context.counters.record_completion();
                context.progress.set(Ratio::estimate(
                    completed,
                    context.counters.tickets.limit(),
                    context.run_start.elapsed(),
                ));
            }
            Attempt::TimedOut => {
                debug!(ticket, "Attempt timed out; ticket is consumed");
                session.abort();
            }
            Attempt::Failed => {
                debug!(ticket, "Attempt failed; ticket is consumed");
                session.abort();
            }
        }
    }

    Ok(session.into_records())
}

/// Pre-allocation cap per worker; large runs grow past it organically.
const MAX_PREALLOCATED_RECORDS: usize = 1024;

fn estimated_share(counters: &SharedCounters) -> usize {
    usize::try_from(counters.tickets.limit())
        .unwrap_or(MAX_PREALLOCATED_RECORDS)
        .min(MAX_PREALLOCATED_RECORDS)
}
