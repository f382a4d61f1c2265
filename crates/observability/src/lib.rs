//! Process-wide logging setup.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LEVEL: &str = "info";

/// Initialize JSON logging filtered by `RUST_LOG`, falling back to `info`.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with_default(DEFAULT_LEVEL);
}

/// Like [`init`], but with a caller-chosen fallback filter such as `"debug"`.
pub fn init_with_default(default_filter: &str) {
    let filter = filter_or(default_filter);

    // JSON logs + timestamps, to stderr so command output stays clean.
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(default_filter, "logging initialized");
    }
}

fn filter_or(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_harmless() {
        init();
        init_with_default("debug");
        tracing::info!("still logging");
    }

    #[test]
    fn fallback_filter_is_used_verbatim() {
        // RUST_LOG is not set under the test harness by default.
        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(filter_or("debug").to_string(), "debug");
        }
    }
}
