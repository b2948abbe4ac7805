//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use tailmark_scan::{PatternError, ReloadError};
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("failed to initialise telemetry: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("invalid inclusion pattern: {0}")]
    Pattern(#[from] PatternError),
    #[error("no design system configured; pass --design-system or set TAILMARK_DESIGN_SYSTEM")]
    MissingDesignSystem,
    #[error(transparent)]
    Reload(#[from] ReloadError),
    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: Utf8PathBuf,
        source: io::Error,
    },
    #[error("hover output is disabled by configuration")]
    HoverDisabled,
    #[error("failed to serialise output: {0}")]
    Serialise(serde_json::Error),
    #[error("failed to write output: {0}")]
    Write(io::Error),
}
