use tracing_subscriber::EnvFilter;

/// Primary filter override; `RUST_LOG` is honored as a fallback.
const LOG_ENV: &str = "LOADMETER_LOG";

/// Installs the stderr logger. Verbose mode raises this crate to debug
/// while third-party crates stay at info, so request-level noise never
/// drowns the run summary. Later calls keep the first configuration.
pub fn init_logging(verbose: bool) {
    let filter = [LOG_ENV, "RUST_LOG"]
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| default_filter(verbose));

    drop(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    );
}

fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(concat!("info,", env!("CARGO_PKG_NAME"), "=debug"))
    } else {
        EnvFilter::new("info")
    }
}
