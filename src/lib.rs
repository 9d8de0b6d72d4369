//! Core library for the `loadmeter` CLI.
//!
//! This crate provides the internal building blocks used by the binary:
//! CLI argument types, single-request execution, the load orchestrator
//! and its shared counters, telemetry accumulation, progress reporting,
//! result statistics, and session persistence/diffing. The primary
//! user-facing interface is the `loadmeter` command-line application.
pub mod args;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod measure;
pub mod progress;
pub mod report;
pub mod run;
pub mod shutdown;
pub mod stats;
pub mod store;
pub mod telemetry;
