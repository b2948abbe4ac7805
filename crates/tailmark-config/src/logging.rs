use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Supported logging output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON, one object per event.
    #[default]
    Json,
    /// Human-readable single line output.
    Compact,
}

impl LogFormat {
    /// Returns `true` when events are written as JSON objects; such output
    /// never carries terminal colour codes.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Errors encountered while parsing a [`LogFormat`] from text.
pub type LogFormatParseError = strum::ParseError;

/// Target prefixes of the events emitted by the Tailmark crates.
///
/// Every library module logs under `<crate>::<module>`, so a filter
/// directive naming one of these prefixes selects a whole crate.
pub const LOG_TARGETS: &[&str] = &["tailmark-scan", "tailmark-catalog", "tailmark-cli"];
