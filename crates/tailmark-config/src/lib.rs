//! Configuration for the Tailmark host.
//!
//! [`Config`] is layered by `ortho_config`: built-in defaults, then a TOML
//! file, then `TAILMARK_*` environment variables, then command-line flags.
//! The file is named with `--config-path` or `TAILMARK_CONFIG_PATH`.
//!
//! ```toml
//! log_filter = "warn,tailmark-scan=debug"
//! log_format = "compact"
//! cache_capacity = 100
//! include_patterns = ["tw`[^`]*`"]
//! enable_hover = true
//! design_system = "src/app.css"
//! design_system_version = "v4"
//! ```

mod defaults;
mod logging;

use std::num::NonZeroUsize;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use tailmark_core::{DesignSystemVersion, SourceConfig};
use tailmark_scan::PipelineOptions;

pub use defaults::{
    DEFAULT_LOG_FILTER, default_cache_capacity, default_enable_hover, default_log_filter,
    default_log_filter_string, default_log_format,
};
pub use logging::{LOG_TARGETS, LogFormat, LogFormatParseError};

/// Effective host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "TAILMARK")]
pub struct Config {
    /// `tracing` filter expression.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Log output format.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
    /// Bound of the result cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: NonZeroUsize,
    /// Inclusion regexes appended after the built-in ones.
    #[serde(default)]
    pub include_patterns: Vec<String>,
    /// Whether hover output is offered.
    #[serde(default = "default_enable_hover")]
    pub enable_hover: bool,
    /// Manifest (v3) or stylesheet (v4) to load. Relative paths resolve
    /// against the working directory.
    #[serde(default)]
    pub design_system: Option<Utf8PathBuf>,
    /// Major version of the design system; inferred from the path when
    /// absent.
    #[serde(default)]
    pub design_system_version: Option<DesignSystemVersion>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            cache_capacity: default_cache_capacity(),
            include_patterns: Vec::new(),
            enable_hover: default_enable_hover(),
            design_system: None,
            design_system_version: None,
        }
    }
}

impl Config {
    /// Returns the configured design system, if any.
    ///
    /// Without an explicit version a `.json` path is read as a v3 manifest
    /// and anything else as a v4 stylesheet.
    #[must_use]
    pub fn design_system_settings(&self) -> Option<DesignSystemSettings> {
        let path = self.design_system.clone()?;
        let version = self
            .design_system_version
            .unwrap_or_else(|| version_for_path(&path));
        Some(DesignSystemSettings { version, path })
    }

    /// Returns the pipeline options carried by this configuration.
    #[must_use]
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            cache_capacity: self.cache_capacity,
            include_patterns: self.include_patterns.clone(),
        }
    }
}

/// Location and version of the design system to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignSystemSettings {
    /// Major version of the design system.
    pub version: DesignSystemVersion,
    /// Manifest (v3) or stylesheet (v4) path.
    pub path: Utf8PathBuf,
}

impl DesignSystemSettings {
    /// Returns the loader source for these settings.
    #[must_use]
    pub fn source(&self) -> SourceConfig {
        let path = self.path.clone().into_std_path_buf();
        match self.version {
            DesignSystemVersion::V3 => SourceConfig::ConfigFile(path),
            DesignSystemVersion::V4 => SourceConfig::StylesheetFile(path),
        }
    }
}

fn version_for_path(path: &Utf8Path) -> DesignSystemVersion {
    if path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"))
    {
        DesignSystemVersion::V3
    } else {
        DesignSystemVersion::V4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.cache_capacity.get(), 50);
        assert_eq!(
            config.cache_capacity,
            PipelineOptions::default().cache_capacity
        );
        assert!(config.include_patterns.is_empty());
        assert!(config.enable_hover);
        assert!(config.design_system_settings().is_none());
    }

    #[rstest]
    #[case("app.css", DesignSystemVersion::V4)]
    #[case("tailmark.json", DesignSystemVersion::V3)]
    #[case("TAILMARK.JSON", DesignSystemVersion::V3)]
    #[case("styles", DesignSystemVersion::V4)]
    fn version_is_inferred_from_path(#[case] path: &str, #[case] expected: DesignSystemVersion) {
        let config = Config {
            design_system: Some(Utf8PathBuf::from(path)),
            ..Config::default()
        };
        let settings = config.design_system_settings().expect("design system");
        assert_eq!(settings.version, expected);
    }

    #[test]
    fn explicit_version_wins_over_inference() {
        let config = Config {
            design_system: Some(Utf8PathBuf::from("theme.json")),
            design_system_version: Some(DesignSystemVersion::V4),
            ..Config::default()
        };
        assert_eq!(
            config.design_system_settings().map(|settings| settings.version),
            Some(DesignSystemVersion::V4)
        );
    }

    #[test]
    fn version_without_path_selects_nothing() {
        let config = Config {
            design_system_version: Some(DesignSystemVersion::V3),
            ..Config::default()
        };
        assert!(config.design_system_settings().is_none());
    }

    #[test]
    fn pipeline_options_carry_cache_and_patterns() {
        let config = Config {
            cache_capacity: NonZeroUsize::MIN,
            include_patterns: vec![String::from("tw`[^`]*`")],
            ..Config::default()
        };
        let options = config.pipeline_options();
        assert_eq!(options.cache_capacity, NonZeroUsize::MIN);
        assert_eq!(options.include_patterns, ["tw`[^`]*`"]);
    }

    #[rstest]
    #[case(DesignSystemVersion::V3, SourceConfig::ConfigFile("a".into()))]
    #[case(DesignSystemVersion::V4, SourceConfig::StylesheetFile("a".into()))]
    fn settings_map_to_loader_sources(
        #[case] version: DesignSystemVersion,
        #[case] expected: SourceConfig,
    ) {
        let settings = DesignSystemSettings {
            version,
            path: Utf8PathBuf::from("a"),
        };
        assert_eq!(settings.source(), expected);
    }
}
