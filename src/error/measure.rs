use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("A measurement for '{target}' is already open; close it before opening another.")]
    RecordAlreadyOpen { target: String },
    #[error("No open measurement to close.")]
    NoOpenRecord,
}
