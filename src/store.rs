//! Durable persistence for [`RunResult`]: self-describing JSON that
//! round-trips losslessly.
use std::path::Path;

use tracing::info;

use crate::error::{AppError, AppResult, StoreError};
use crate::measure::{RunResult, SCHEMA_VERSION};

/// Writes the result to `path` as pretty-printed JSON. The in-memory
/// value is only borrowed; saving never alters it.
///
/// # Errors
///
/// Returns [`StoreError::Write`] when the file cannot be written.
pub fn save(result: &RunResult, path: &Path) -> AppResult<()> {
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json).map_err(|err| {
        AppError::store(StoreError::Write {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    info!(path = %path.display(), records = result.records.len(), "Saved measurement session");
    Ok(())
}

/// Loads a result previously written by [`save`], reconstructing every
/// field needed to recompute the same statistics.
///
/// # Errors
///
/// Returns [`StoreError::Read`] or [`StoreError::Parse`] on I/O or
/// format problems, and [`StoreError::SchemaMismatch`] when the file was
/// written under a different schema version.
pub fn load(path: &Path) -> AppResult<RunResult> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        AppError::store(StoreError::Read {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    let result: RunResult = serde_json::from_str(&raw).map_err(|err| {
        AppError::store(StoreError::Parse {
            path: path.to_path_buf(),
            source: err,
        })
    })?;

    if result.schema != SCHEMA_VERSION {
        return Err(AppError::store(StoreError::SchemaMismatch {
            path: path.to_path_buf(),
            found: result.schema,
            expected: SCHEMA_VERSION,
        }));
    }
    Ok(result)
}
