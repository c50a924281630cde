//! Diagnostic logging setup.
//!
//! User-facing output goes through `output`; this is the `tracing` stream on
//! stderr for `--verbose`, `--log-level`, `AUTODOCK_LOG_LEVEL` and `RUST_LOG`.

use std::sync::Once;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted when no level flag is given.
pub const LOG_LEVEL_ENV: &str = "AUTODOCK_LOG_LEVEL";

static INIT: Once = Once::new();

/// Logging flags taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub log_level: Option<String>,
    pub verbose: bool,
    pub quiet: bool,
}

/// Pick the level: `--log-level` > `--verbose` > `--quiet` > env > `warn`.
#[must_use]
pub fn resolve_level(opts: &LogOptions, env_level: Option<&str>) -> LevelFilter {
    if let Some(level) = &opts.log_level {
        parse_level(level)
    } else if opts.verbose {
        LevelFilter::DEBUG
    } else if opts.quiet {
        LevelFilter::ERROR
    } else {
        env_level.map_or(LevelFilter::WARN, parse_level)
    }
}

/// Parse a level name; unknown names fall back to `warn`.
#[must_use]
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "error" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        _ => LevelFilter::WARN,
    }
}

/// Install the global subscriber once. `RUST_LOG` directives win over the
/// resolved level.
pub fn init_logging(opts: &LogOptions) {
    INIT.call_once(|| {
        let env_level = std::env::var(LOG_LEVEL_ENV).ok();
        let level = resolve_level(opts, env_level.as_deref());
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
