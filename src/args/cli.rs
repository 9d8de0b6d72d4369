use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_header, parse_positive_u64};
use super::types::{HttpMethod, HttpVersion};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Async HTTP load-generation and measurement harness - concurrent workers, per-request timing, telemetry totals, and session-to-session diffs."
)]
pub struct HarnessArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run a load measurement session against a target URL
    Run(RunArgs),
    /// Diff two persisted measurement sessions
    Compare(CompareArgs),
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Target URL for the measurement run
    #[arg(long, short)]
    pub url: String,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// HTTP version to negotiate
    #[arg(long = "http-version", default_value = "1.1")]
    pub http_version: HttpVersion,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long, short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body
    #[arg(long, short = 'd')]
    pub body: Option<String>,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long, default_value = "10s", value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Number of concurrent clients
    #[arg(long, short = 'c', default_value = "1", value_parser = parse_positive_u64)]
    pub clients: u64,

    /// Total number of measured requests across all clients
    #[arg(long, short = 'n', default_value = "100", value_parser = parse_positive_u64)]
    pub requests: u64,

    /// Follow HTTP redirects (up to 10 hops)
    #[arg(long = "follow-redirects")]
    pub follow_redirects: bool,

    /// Accept any TLS certificate chain
    #[arg(long)]
    pub insecure: bool,

    /// Write the measurement session to this path when the run completes
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    /// Path of the baseline measurement session
    pub left: String,

    /// Path of the measurement session to compare against the baseline
    pub right: String,

    /// Label for the baseline side (defaults to the file stem)
    #[arg(long = "left-label")]
    pub left_label: Option<String>,

    /// Label for the comparison side (defaults to the file stem)
    #[arg(long = "right-label")]
    pub right_label: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
