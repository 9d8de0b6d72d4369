use thiserror::Error;

use super::{HttpError, MeasureError, StoreError, TelemetryError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("HTTP client error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
    #[error("Join error: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
    #[error("Measurement error: {0}")]
    Measure(#[from] MeasureError),
    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn http<E>(error: E) -> Self
    where
        E: Into<HttpError>,
    {
        error.into().into()
    }

    pub fn measure<E>(error: E) -> Self
    where
        E: Into<MeasureError>,
    {
        error.into().into()
    }

    pub fn telemetry<E>(error: E) -> Self
    where
        E: Into<TelemetryError>,
    {
        error.into().into()
    }

    pub fn store<E>(error: E) -> Self
    where
        E: Into<StoreError>,
    {
        error.into().into()
    }
}
