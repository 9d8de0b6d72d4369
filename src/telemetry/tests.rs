use super::*;
use crate::args::HttpVersion;
use crate::error::{AppError, AppResult, TelemetryError};

#[test]
fn source_selection_follows_protocol_version() {
    assert_eq!(
        TelemetrySource::for_version(HttpVersion::V1_0),
        TelemetrySource::Connection
    );
    assert_eq!(
        TelemetrySource::for_version(HttpVersion::V1_1),
        TelemetrySource::Connection
    );
    assert_eq!(
        TelemetrySource::for_version(HttpVersion::V2),
        TelemetrySource::Stream
    );
}

#[tokio::test]
async fn drain_reports_totals_after_the_last_event() -> AppResult<()> {
    let mut tap = TelemetryTap::new(TelemetrySource::Connection);
    let sender = tap.subscribe()?;

    sender.record(TelemetryEvent::Opened);
    sender.record(TelemetryEvent::Transferred(100));
    sender.record(TelemetryEvent::Opened);
    sender.record(TelemetryEvent::Transferred(50));
    sender.record(TelemetryEvent::Closed);
    sender.record(TelemetryEvent::Closed);
    sender.record(TelemetryEvent::Transferred(25));
    drop(sender);

    let totals = tap.drain().await?;
    assert_eq!(totals.total_bytes, 175);
    assert_eq!(totals.peak_connections, 2);
    Ok(())
}

#[tokio::test]
async fn drain_sees_events_from_every_producer_clone() -> AppResult<()> {
    let mut tap = TelemetryTap::new(TelemetrySource::Stream);
    let sender = tap.subscribe()?;

    let mut producers = Vec::new();
    for _ in 0..4 {
        let producer = sender.clone();
        producers.push(tokio::spawn(async move {
            producer.record(TelemetryEvent::Opened);
            producer.record(TelemetryEvent::Transferred(10));
            producer.record(TelemetryEvent::Closed);
        }));
    }
    for producer in producers {
        producer.await?;
    }
    drop(sender);

    let totals = tap.drain().await?;
    assert_eq!(totals.total_bytes, 40);
    assert!(totals.peak_connections >= 1);
    assert!(totals.peak_connections <= 4);
    Ok(())
}

#[tokio::test]
async fn double_subscribe_is_a_contract_violation() -> AppResult<()> {
    let mut tap = TelemetryTap::new(TelemetrySource::Connection);
    let _sender = tap.subscribe()?;

    let second = tap.subscribe();
    assert!(matches!(
        second,
        Err(AppError::Telemetry(TelemetryError::AlreadySubscribed { .. }))
    ));
    Ok(())
}

#[tokio::test]
async fn drain_without_subscription_is_refused() {
    let tap = TelemetryTap::new(TelemetrySource::Connection);
    let drained = tap.drain().await;
    assert!(matches!(
        drained,
        Err(AppError::Telemetry(TelemetryError::NotSubscribed))
    ));
}

#[tokio::test]
async fn closed_without_opened_never_underflows() -> AppResult<()> {
    let mut tap = TelemetryTap::new(TelemetrySource::Connection);
    let sender = tap.subscribe()?;

    sender.record(TelemetryEvent::Closed);
    sender.record(TelemetryEvent::Opened);
    drop(sender);

    let totals = tap.drain().await?;
    assert_eq!(totals.peak_connections, 1);
    Ok(())
}
