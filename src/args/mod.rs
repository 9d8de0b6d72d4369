//! CLI argument types and parsing helpers.
mod cli;
mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{Command, CompareArgs, HarnessArgs, RunArgs};
pub use types::{HttpMethod, HttpVersion};

pub const DEFAULT_USER_AGENT: &str = concat!("loadmeter/", env!("CARGO_PKG_VERSION"));
