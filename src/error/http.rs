use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed { source: reqwest::Error },
    #[error("Failed to build request for '{url}': {source}")]
    BuildRequestFailed { url: String, source: reqwest::Error },
    #[error("Target '{url}' is unreachable: {source}")]
    TargetUnreachable { url: String, source: reqwest::Error },
}
