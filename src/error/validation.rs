use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("Invalid header '{header}': expected 'Key: Value' format.")]
    InvalidHeaderFormat { header: String },
    #[error("Invalid header name '{header}': {source}")]
    InvalidHeaderName {
        header: String,
        source: reqwest::header::InvalidHeaderName,
    },
    #[error("Invalid header value for '{header}': {source}")]
    InvalidHeaderValue {
        header: String,
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("Invalid HTTP version '{value}' (expected 1.0, 1.1 or 2).")]
    InvalidHttpVersion { value: String },
}
