//! Request specification and single-request execution.
mod client;
mod executor;


use std::time::Duration;

use crate::args::{HttpMethod, HttpVersion};

pub use client::build_client;
pub use executor::{Attempt, RequestExecutor};

/// A fully-configured request, built once by the CLI layer and shared
/// read-only across every worker in a run.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    pub version: HttpVersion,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Duration,
}
