//! Utilities: logging setup driven by `-v` / `-q`.
//!
//!   derive_level(verbose, quiet) -> tracing Level
//!   init_logging(level)          -> stderr subscriber (RUST_LOG overrides)

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map CLI verbosity flags to a log level. `quiet` wins over `verbose`.
pub fn derive_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for JSON and for the alias listing of `sites-with-module`.
pub fn init_logging(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("drush_wrap={}", level.as_str().to_ascii_lowercase())));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(derive_level(2, true), Level::ERROR);
    }

    #[test]
    fn verbosity_steps() {
        assert_eq!(derive_level(0, false), Level::INFO);
        assert_eq!(derive_level(1, false), Level::DEBUG);
        assert_eq!(derive_level(5, false), Level::TRACE);
    }
}
