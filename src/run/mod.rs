//! The load orchestrator: spawns workers, coordinates shared counters,
//! and assembles the final [`RunResult`].
mod counters;
mod worker;


use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use tokio::time::Instant;
use tracing::info;

use crate::error::AppResult;
use crate::http::{RequestExecutor, RequestSpec};
use crate::measure::{OutcomeRecord, RunPolicy, RunResult};
use crate::progress::{Ratio, setup_progress_reporter};
use crate::shutdown::shutdown_channel;
use crate::telemetry::{TelemetrySource, TelemetryTap};

pub use counters::{SharedCounters, TicketCounter};
use worker::{WorkerContext, run_worker};

/// Executes one full measurement run: preflight, `policy.clients`
/// parallel workers, telemetry drain, final progress update, reporter
/// stop — strictly in that order.
///
/// # Errors
///
/// Returns an error when the target is unreachable before any
/// connection is established, when run setup fails, or on a
/// measurement-contract violation inside a worker.
pub async fn execute_run(
    spec: Arc<RequestSpec>,
    policy: RunPolicy,
    cancelled: Arc<AtomicBool>,
) -> AppResult<RunResult> {
    let mut tap = TelemetryTap::new(TelemetrySource::for_version(spec.version));
    let telemetry = tap.subscribe()?;

    let preflight = RequestExecutor::new(Arc::clone(&spec), &policy)?;
    preflight.preflight().await?;
    info!(url = %spec.url, clients = policy.clients, requests = policy.requests, "Starting run");

    let (reporter_shutdown_tx, _) = shutdown_channel();
    let (progress, reporter_handle) =
        setup_progress_reporter(policy.requests, &reporter_shutdown_tx);
    let progress = Arc::new(progress);

    let counters = Arc::new(SharedCounters::new(policy.requests));
    let run_start = Instant::now();

    let mut worker_handles = Vec::with_capacity(usize::try_from(policy.clients).unwrap_or(0));
    for _ in 0..policy.clients {
        let context = WorkerContext {
            executor: RequestExecutor::new(Arc::clone(&spec), &policy)?,
            target: spec.url.clone(),
            counters: Arc::clone(&counters),
            telemetry: telemetry.clone(),
            progress: Arc::clone(&progress),
            cancelled: Arc::clone(&cancelled),
            run_start,
        };
        worker_handles.push(tokio::spawn(run_worker(context)));
    }

    let mut records: Vec<OutcomeRecord> = Vec::new();
    for handle in worker_handles {
        records.extend(handle.await??);
    }

    // No worker can still produce traffic past this point; dropping the
    // orchestrator's sender lets the accumulator observe end-of-stream.
    drop(telemetry);
    let totals = tap.drain().await?;

    progress.set(Ratio::new(policy.requests, policy.requests, Duration::ZERO));
    drop(reporter_shutdown_tx.send(()));
    reporter_handle.await?;

    info!(
        completed = records.len(),
        total_bytes = totals.total_bytes,
        peak_connections = totals.peak_connections,
        "Run finished"
    );

    Ok(RunResult::new(
        records,
        totals.total_bytes,
        totals.peak_connections,
        policy,
    ))
}
