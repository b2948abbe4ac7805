//! Structured telemetry for the binary.
//!
//! Events go to stderr so stdout carries only command output. The filter
//! comes from the layered configuration (`--log-filter`,
//! `TAILMARK_LOG_FILTER` or the file); directives naming the Tailmark crates
//! use their package names, for example `tailmark-scan=debug`.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tailmark_config::{Config, LOG_TARGETS};
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing::{Subscriber, debug, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

const TELEMETRY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::telemetry");

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Errors encountered while configuring telemetry.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured log filter expression does not parse.
    #[error("invalid log filter `{filter}`: {message}")]
    Filter {
        /// The rejected expression.
        filter: String,
        /// Parser diagnostic.
        message: String,
    },
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Configures the global tracing subscriber when invoked for the first time.
///
/// Later calls return immediately; the first configuration stays in effect
/// for the life of the process.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an unparsable filter and
/// [`TelemetryError::Subscriber`] when another subscriber is already
/// installed.
pub fn initialise(config: &Config) -> Result<(), TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(config))
        .map(|_| ())
}

/// Parses the configured filter. Events whose target no directive names are
/// logged at `warn` and above.
fn build_filter(log_filter: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse(log_filter)
        .map_err(|error| TelemetryError::Filter {
            filter: log_filter.to_owned(),
            message: error.to_string(),
        })
}

fn install_subscriber(config: &Config) -> Result<(), TelemetryError> {
    let filter = build_filter(&config.log_filter)?;
    let structured = config.log_format.is_structured();

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        .with_ansi(!structured && io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());

    let subscriber: Box<dyn Subscriber + Send + Sync> = if structured {
        Box::new(builder.json().flatten_event(true).finish())
    } else {
        Box::new(builder.compact().finish())
    };

    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)?;
    debug!(
        target: TELEMETRY_TARGET,
        filter = %config.log_filter,
        format = %config.log_format,
        crates = ?LOG_TARGETS,
        "telemetry ready"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tailmark_config::DEFAULT_LOG_FILTER;

    #[rstest]
    #[case(DEFAULT_LOG_FILTER)]
    #[case("tailmark-scan=debug")]
    #[case("debug")]
    fn accepts_crate_directives(#[case] filter: &str) {
        assert!(build_filter(filter).is_ok());
    }

    #[test]
    fn rejects_invalid_filters() {
        let error = build_filter("tailmark=[nope").expect_err("invalid filter");
        assert!(
            matches!(&error, TelemetryError::Filter { filter, .. } if filter == "tailmark=[nope")
        );
        assert!(error.to_string().contains("invalid log filter"));
    }
}
