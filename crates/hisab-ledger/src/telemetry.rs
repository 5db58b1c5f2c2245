//! Tracing subscriber setup.
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show debug messages (overrides the configured filter)
//! - `RUST_LOG=hisab=trace` - Trace for hisab crates only
//! - Default: `info,hisab=debug,sqlx=warn`

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config supplies one.
pub const DEFAULT_LOG_FILTER: &str = "info,hisab=debug,sqlx=warn";

/// Builds the filter: `RUST_LOG` first, then `configured`, then the default.
pub fn build_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global fmt subscriber.
///
/// Returns false if a subscriber was already installed.
pub fn init_tracing(configured: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(configured))
        .with_target(true)
        .try_init()
        .is_ok()
}
