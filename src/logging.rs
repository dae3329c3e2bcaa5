use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{AdminConfig, LogFormat};

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "facility_admin=debug,info";

/// Filter directive for `config`: `--verbose` wins, then the configured
/// filter, then the default.
pub fn filter_directive(config: &AdminConfig) -> &str {
    if config.verbose {
        VERBOSE_FILTER
    } else {
        config.logging.filter.as_deref().unwrap_or(DEFAULT_FILTER)
    }
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean.
pub fn init_tracing(config: &AdminConfig) {
    let filter = EnvFilter::try_new(filter_directive(config)).unwrap_or_else(|err| {
        eprintln!("Invalid log filter, using '{}': {}", DEFAULT_FILTER, err);
        EnvFilter::new(DEFAULT_FILTER)
    });

    let result = match config.logging.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };
    if let Err(err) = result {
        tracing::warn!(error = %err, "Tracing subscriber already installed");
    }
}
