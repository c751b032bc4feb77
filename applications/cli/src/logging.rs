/// Log filtering for the `audic` binary
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset; `audic` is the binary's target
pub const DEFAULT_FILTER: &str = "audic=info,audic_desktop=info";

/// Filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
