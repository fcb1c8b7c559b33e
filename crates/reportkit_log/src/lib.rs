//! `reportkit_log`:
//! Shared `tracing` subscriber setup for reportkit binaries.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const C_LOG_FILTER_DEFAULT: &str = "info";
/// Default filter when verbose output is requested.
pub const C_LOG_FILTER_VERBOSE: &str = "debug";

/// Resolve the filter directive used when `RUST_LOG` is absent.
pub fn derive_default_filter(if_verbose: bool) -> &'static str {
    if if_verbose {
        C_LOG_FILTER_VERBOSE
    } else {
        C_LOG_FILTER_DEFAULT
    }
}

/// Install a global fmt subscriber writing to stderr.
///
/// `RUST_LOG` wins over `if_verbose`. Calling this twice is a no-op, the
/// first subscriber stays installed.
pub fn init_logging(if_verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| derive_default_filter(if_verbose).into());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_default_filter() {
        assert_eq!(derive_default_filter(false), "info");
        assert_eq!(derive_default_filter(true), "debug");
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging(false);
        init_logging(true);
        tracing::info!("logging initialized");
    }
}
