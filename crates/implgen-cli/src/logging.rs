//! Subscriber setup for the `implgen` binary

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "IMPLGEN_LOG";

/// Filter from `IMPLGEN_LOG`, falling back to `default_level`
pub fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the fmt subscriber on stderr
///
/// Call once at startup; later calls leave the first subscriber in place.
pub fn init_logging(default_level: &str) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter(default_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    // Ignore the error if a subscriber is already set
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn filter___without_env___uses_default_level() {
        if std::env::var(LOG_ENV).is_ok() {
            return;
        }

        assert!(filter("debug").to_string().contains("debug"));
    }

    #[test]
    fn init_logging___called_twice___does_not_panic() {
        init_logging("debug");
        init_logging("trace");
    }
}
