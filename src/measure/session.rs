use tracing::debug;

use crate::error::{AppError, AppResult, MeasureError};

use super::record::OutcomeRecord;

/// One worker's measurement state. At most one record may be open at a
/// time; opening a second is a contract violation and fails fast instead
/// of overwriting the in-flight record.
#[derive(Debug, Default)]
pub struct MeasureSession {
    closed: Vec<OutcomeRecord>,
    open: Option<OutcomeRecord>,
}

impl MeasureSession {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            closed: Vec::with_capacity(capacity),
            open: None,
        }
    }

    /// Opens a new measurement against `target`.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::RecordAlreadyOpen`] when a measurement is
    /// still in flight.
    pub fn open(&mut self, target: &str) -> AppResult<()> {
        if let Some(open) = self.open.as_ref() {
            return Err(AppError::measure(MeasureError::RecordAlreadyOpen {
                target: open.target.clone(),
            }));
        }
        self.open = Some(OutcomeRecord::begin(target));
        Ok(())
    }

    /// Closes the open measurement with its final status.
    ///
    /// # Errors
    ///
    /// Returns [`MeasureError::NoOpenRecord`] when nothing is in flight.
    pub fn close(&mut self, status: u16) -> AppResult<()> {
        let mut record = self
            .open
            .take()
            .ok_or_else(|| AppError::measure(MeasureError::NoOpenRecord))?;
        record.finish(status);
        self.closed.push(record);
        Ok(())
    }

    /// Discards the open measurement after a failed attempt, reopening
    /// the slot. Failed attempts never appear in the collected records.
    pub fn abort(&mut self) {
        if let Some(record) = self.open.take() {
            debug!(target = %record.target, "Discarding measurement for failed attempt");
        }
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.closed.len()
    }

    #[must_use]
    pub fn into_records(mut self) -> Vec<OutcomeRecord> {
        self.abort();
        self.closed
    }
}
