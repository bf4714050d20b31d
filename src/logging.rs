//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Events go to stderr so the run report on stdout stays clean.
//!
//! - `warn`: non-fatal surprises such as merged column names differing
//! - `info`: sources read, tables merged, workbook written
//! - `debug`: per-source and per-column detail
//! - `trace`: everything else

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Map a `-v` count to a level: 0 → warn, 1 → info, 2 → debug, 3+ → trace.
pub fn level_from_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbosity`.
pub fn init_logging(verbosity: u8) -> Result<(), tracing_subscriber::util::TryInitError> {
    let level = level_from_verbosity(verbosity);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init()
}
