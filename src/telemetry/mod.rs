//! Networking counter collection for the duration of a run.
//!
//! Counters arrive asynchronously relative to the work that produced them,
//! so final totals are read only after [`TelemetryTap::drain`] has observed
//! the last queued event.
#[cfg(test)]
mod tests;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::args::HttpVersion;
use crate::error::{AppError, AppResult, TelemetryError};

/// Which counter family a run observes, selected from the negotiated
/// protocol version at run start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetrySource {
    /// Connection-oriented transports (HTTP/1.x): one request per
    /// connection at a time.
    Connection,
    /// Stream-multiplexed transports (HTTP/2): many streams share one
    /// connection.
    Stream,
}

impl TelemetrySource {
    #[must_use]
    pub const fn for_version(version: HttpVersion) -> Self {
        if version.is_stream_multiplexed() {
            TelemetrySource::Stream
        } else {
            TelemetrySource::Connection
        }
    }
}

impl std::fmt::Display for TelemetrySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelemetrySource::Connection => write!(f, "connection"),
            TelemetrySource::Stream => write!(f, "stream"),
        }
    }
}

impl std::error::Error for TelemetrySource {}

#[derive(Debug, Clone, Copy)]
pub enum TelemetryEvent {
    /// A connection (or multiplexed stream) went in flight.
    Opened,
    /// An in-flight connection or stream finished.
    Closed,
    /// Bytes observed on the wire.
    Transferred(u64),
}

/// Final counter totals, valid only after a drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetryTotals {
    pub total_bytes: u64,
    pub peak_connections: u64,
}

/// Handle used by producers to report counter events. Dropping every
/// sender lets the accumulator deliver its final totals.
#[derive(Debug, Clone)]
pub struct TelemetrySender {
    tx: mpsc::UnboundedSender<TelemetryEvent>,
}

impl TelemetrySender {
    pub fn record(&self, event: TelemetryEvent) {
        // Send only fails when the tap is already gone; late events from a
        // cancelled run are safe to drop.
        drop(self.tx.send(event));
    }
}

/// Accumulates counter events for one run. One subscription per source;
/// subscribing twice is a contract violation.
#[derive(Debug)]
pub struct TelemetryTap {
    source: TelemetrySource,
    subscription: Option<JoinHandle<TelemetryTotals>>,
}

impl TelemetryTap {
    #[must_use]
    pub const fn new(source: TelemetrySource) -> Self {
        Self {
            source,
            subscription: None,
        }
    }

    #[must_use]
    pub const fn source(&self) -> TelemetrySource {
        self.source
    }

    /// Opens the single subscription and returns the producer handle.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::AlreadySubscribed`] on a second call.
    pub fn subscribe(&mut self) -> AppResult<TelemetrySender> {
        if self.subscription.is_some() {
            return Err(AppError::telemetry(TelemetryError::AlreadySubscribed {
                source: self.source,
            }));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        self.subscription = Some(tokio::spawn(accumulate(rx)));
        Ok(TelemetrySender { tx })
    }

    /// Blocks until the last queued counter event has been applied, then
    /// returns the final totals. Every [`TelemetrySender`] clone must be
    /// dropped first or the drain never completes.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::NotSubscribed`] when no subscription was
    /// opened, or [`TelemetryError::AccumulatorFailed`] if the
    /// accumulator task was cancelled.
    pub async fn drain(mut self) -> AppResult<TelemetryTotals> {
        let subscription = self
            .subscription
            .take()
            .ok_or_else(|| AppError::telemetry(TelemetryError::NotSubscribed))?;
        subscription
            .await
            .map_err(|err| AppError::telemetry(TelemetryError::AccumulatorFailed { source: err }))
    }
}

async fn accumulate(mut rx: mpsc::UnboundedReceiver<TelemetryEvent>) -> TelemetryTotals {
    let mut in_flight: u64 = 0;
    let mut peak: u64 = 0;
    let mut total_bytes: u64 = 0;

    while let Some(event) = rx.recv().await {
        match event {
            TelemetryEvent::Opened => {
                in_flight = in_flight.saturating_add(1);
                peak = peak.max(in_flight);
            }
            TelemetryEvent::Closed => {
                in_flight = in_flight.saturating_sub(1);
            }
            TelemetryEvent::Transferred(bytes) => {
                total_bytes = total_bytes.saturating_add(bytes);
            }
        }
    }

    TelemetryTotals {
        total_bytes,
        peak_connections: peak,
    }
}
