//! Per-request measurement records and the run-level result they roll up
//! into.
mod record;
mod result;
mod session;


pub use record::OutcomeRecord;
pub use result::{RunPolicy, RunResult, SCHEMA_VERSION};
pub use session::MeasureSession;
