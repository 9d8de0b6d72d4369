//! Binds CLI arguments to a run or compare plan and drives it on an
//! explicitly sized runtime.
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use reqwest::header::{HeaderName, HeaderValue};
use tracing::warn;
use url::Url;

use crate::args::{Command, CompareArgs, HarnessArgs, RunArgs};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::RequestSpec;
use crate::measure::RunPolicy;
use crate::run::execute_run;
use crate::{logger, report, stats, store};

/// Upper bound on runtime worker threads however many clients are asked
/// for.
const MAX_WORKER_THREADS: usize = 512;

pub fn run() -> AppResult<()> {
    let args = HarnessArgs::parse();
    match args.command {
        Command::Run(run_args) => run_command(run_args),
        Command::Compare(compare_args) => compare_command(&compare_args),
    }
}

fn run_command(args: RunArgs) -> AppResult<()> {
    logger::init_logging(args.verbose);

    let spec = Arc::new(build_request_spec(&args)?);
    let policy = build_run_policy(&args);
    let runtime = build_runtime(policy.clients)?;

    runtime.block_on(async move {
        let cancelled = Arc::new(AtomicBool::new(false));
        let cancel_flag = Arc::clone(&cancelled);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Cancellation requested; workers stop after their in-flight request.");
                cancel_flag.store(true, Ordering::SeqCst);
            }
        });

        let result = execute_run(spec, policy, cancelled).await?;
        report::print_run_summary(&result);

        if let Some(path) = args.output.as_deref() {
            store::save(&result, Path::new(path))?;
        }
        Ok(())
    })
}

fn compare_command(args: &CompareArgs) -> AppResult<()> {
    logger::init_logging(args.verbose);

    let mut diff = stats::diff_paths(Path::new(&args.left), Path::new(&args.right))?;
    if let Some(label) = args.left_label.as_deref() {
        diff.left_label = label.to_owned();
    }
    if let Some(label) = args.right_label.as_deref() {
        diff.right_label = label.to_owned();
    }
    report::print_diff(&diff);
    Ok(())
}

/// Raises the runtime's worker-thread floor to the client count so the
/// scheduler itself never becomes the throughput bottleneck.
fn build_runtime(clients: u64) -> AppResult<tokio::runtime::Runtime> {
    let floor = std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1);
    let workers = worker_thread_count(floor, clients);
    if usize::try_from(clients).unwrap_or(usize::MAX) > MAX_WORKER_THREADS {
        warn!(
            clients,
            cap = MAX_WORKER_THREADS,
            "Client count exceeds the worker-thread cap; workers share threads past the cap."
        );
    }

    Ok(tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()?)
}

fn worker_thread_count(floor: usize, clients: u64) -> usize {
    let requested = usize::try_from(clients)
        .unwrap_or(MAX_WORKER_THREADS)
        .min(MAX_WORKER_THREADS);
    floor.max(requested)
}

fn build_request_spec(args: &RunArgs) -> AppResult<RequestSpec> {
    let url = Url::parse(&args.url).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: args.url.clone(),
            source: err,
        })
    })?;

    for (key, value) in &args.headers {
        HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
            AppError::validation(ValidationError::InvalidHeaderName {
                header: key.clone(),
                source: err,
            })
        })?;
        HeaderValue::from_str(value).map_err(|err| {
            AppError::validation(ValidationError::InvalidHeaderValue {
                header: key.clone(),
                source: err,
            })
        })?;
    }

    Ok(RequestSpec {
        method: args.method,
        url: url.into(),
        version: args.http_version,
        headers: args.headers.clone(),
        body: args.body.clone(),
        timeout: args.timeout,
    })
}

const fn build_run_policy(args: &RunArgs) -> RunPolicy {
    RunPolicy {
        clients: args.clients,
        requests: args.requests,
        follow_redirects: args.follow_redirects,
        validate_certs: !args.insecure,
        verbose: args.verbose,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_threads_follow_the_larger_of_floor_and_clients() {
        assert_eq!(worker_thread_count(4, 1), 4);
        assert_eq!(worker_thread_count(4, 32), 32);
    }

    #[test]
    fn worker_threads_stay_at_the_cap_for_huge_client_counts() {
        assert_eq!(worker_thread_count(4, 100_000), MAX_WORKER_THREADS);
        assert_eq!(worker_thread_count(4, u64::MAX), MAX_WORKER_THREADS);
    }
}
