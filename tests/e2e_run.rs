mod support;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use loadmeter::args::{HttpMethod, HttpVersion};
use loadmeter::error::{AppError, AppResult, HttpError};
use loadmeter::http::RequestSpec;
use loadmeter::measure::RunPolicy;
use loadmeter::run::execute_run;
use loadmeter::stats::{RunStats, diff_paths, diff_result_with_path, diff_results};
use loadmeter::store;

use support::{spawn_http_server, spawn_stalling_server};

fn spec(url: &str, timeout: Duration) -> Arc<RequestSpec> {
    Arc::new(RequestSpec {
        method: HttpMethod::Get,
        url: url.to_owned(),
        version: HttpVersion::V1_1,
        headers: Vec::new(),
        body: None,
        timeout,
    })
}

fn policy(clients: u64, requests: u64) -> RunPolicy {
    RunPolicy {
        clients,
        requests,
        follow_redirects: false,
        validate_certs: true,
        verbose: false,
    }
}

fn not_cancelled() -> Arc<AtomicBool> {
    Arc::new(AtomicBool::new(false))
}

#[tokio::test(flavor = "multi_thread")]
async fn run_produces_exactly_the_requested_record_count() -> AppResult<()> {
    let (url, _server) = spawn_http_server().map_err(std::io::Error::other)?;

    let result = execute_run(
        spec(&url, Duration::from_secs(5)),
        policy(3, 10),
        not_cancelled(),
    )
    .await?;

    // Exactly M measured records, warm-ups excluded.
    assert_eq!(result.records.len(), 10);
    assert!(result.records.iter().all(|record| !record.is_open()));
    assert!(result.records.iter().all(|record| record.status == Some(200)));
    assert!(result.total_bytes > 0);
    assert!(result.peak_connections >= 1);
    assert_eq!(result.policy.clients, 3);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn more_clients_than_requests_still_yields_exactly_m_records() -> AppResult<()> {
    let (url, _server) = spawn_http_server().map_err(std::io::Error::other)?;

    let result = execute_run(
        spec(&url, Duration::from_secs(5)),
        policy(5, 2),
        not_cancelled(),
    )
    .await?;

    assert_eq!(result.records.len(), 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cancelled_run_stops_claiming_tickets_between_requests() -> AppResult<()> {
    let (url, _server) = spawn_http_server().map_err(std::io::Error::other)?;

    // Cancellation observed before the first claim: workers still finish
    // their warm-up, then take no tickets at all.
    let cancelled = Arc::new(AtomicBool::new(true));
    let result = execute_run(spec(&url, Duration::from_secs(5)), policy(2, 10), cancelled).await?;

    assert!(result.records.is_empty());
    assert!(result.records.iter().all(|record| !record.is_open()));
    assert_eq!(result.policy.requests, 10);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn all_timeouts_complete_the_run_with_zero_records() -> AppResult<()> {
    let (url, _server) = spawn_stalling_server().map_err(std::io::Error::other)?;

    let result = execute_run(
        spec(&url, Duration::from_millis(200)),
        policy(2, 4),
        not_cancelled(),
    )
    .await?;

    assert_eq!(result.records.len(), 0);
    let stats = RunStats::from_result(&result);
    assert_eq!(stats.completed, 0);
    assert!(stats.requests_per_sec.abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_target_escalates_to_a_run_level_error() -> AppResult<()> {
    // Bind then drop a listener so the port actively refuses.
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let url = format!("http://{}", listener.local_addr()?);
    drop(listener);

    let outcome = execute_run(
        spec(&url, Duration::from_secs(1)),
        policy(2, 4),
        not_cancelled(),
    )
    .await;

    assert!(matches!(
        outcome,
        Err(AppError::Http(HttpError::TargetUnreachable { .. }))
    ));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn persisted_run_diffs_identically_from_memory_and_disk() -> AppResult<()> {
    let (url, _server) = spawn_http_server().map_err(std::io::Error::other)?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("session.json");

    let result = execute_run(
        spec(&url, Duration::from_secs(5)),
        policy(2, 6),
        not_cancelled(),
    )
    .await?;
    store::save(&result, &path)?;

    let loaded = store::load(&path)?;
    assert_eq!(loaded, result);

    // All three diff entry points agree for equivalent underlying data.
    let memory_diff = diff_results(&result, &loaded, "left", "right");
    let disk_diff = diff_paths(&path, &path)?;
    let mixed_diff = diff_result_with_path(&result, &path)?;
    assert!(memory_diff.is_zero());
    assert!(disk_diff.is_zero());
    assert!(mixed_diff.is_zero());
    Ok(())
}
