use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ValidationError};

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
    Head,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Head => reqwest::Method::HEAD,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
pub enum HttpVersion {
    #[serde(rename = "1.0")]
    #[value(name = "1.0")]
    V1_0,
    #[serde(rename = "1.1")]
    #[value(name = "1.1")]
    V1_1,
    #[serde(rename = "2")]
    #[value(name = "2")]
    V2,
}

impl HttpVersion {
    #[must_use]
    pub const fn as_reqwest(self) -> reqwest::Version {
        match self {
            HttpVersion::V1_0 => reqwest::Version::HTTP_10,
            HttpVersion::V1_1 => reqwest::Version::HTTP_11,
            HttpVersion::V2 => reqwest::Version::HTTP_2,
        }
    }

    /// Whether the transport multiplexes streams over one connection.
    #[must_use]
    pub const fn is_stream_multiplexed(self) -> bool {
        matches!(self, HttpVersion::V2)
    }
}

impl std::str::FromStr for HttpVersion {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1.0" => Ok(HttpVersion::V1_0),
            "1.1" => Ok(HttpVersion::V1_1),
            "2" => Ok(HttpVersion::V2),
            _ => Err(AppError::validation(ValidationError::InvalidHttpVersion {
                value: s.to_owned(),
            })),
        }
    }
}
