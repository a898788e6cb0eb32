//! Tracing subscriber setup

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber.
///
/// Logs go to stderr so stdout stays clean for `--json`. `RUST_LOG` wins when
/// set; otherwise the level is `warn`, or `debug` with `--verbose`.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .compact();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_default_level_follows_verbosity() {
        let quiet = EnvFilter::new(default_directive(false));
        let verbose = EnvFilter::new(default_directive(true));
        assert_eq!(quiet.max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(verbose.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_second_init_is_an_error() {
        // The first call may already lose to another test in this process.
        let _ = init(false);
        assert!(init(true).is_err());
    }
}
