use std::num::NonZeroUsize;

use tailmark_scan::DEFAULT_CACHE_CAPACITY;

use crate::logging::LogFormat;

/// Default log filter: the Tailmark crates at `info`, dependencies at `warn`.
pub const DEFAULT_LOG_FILTER: &str = "warn,tailmark-scan=info,tailmark-catalog=info,tailmark-cli=info";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default result cache bound, shared with the pipeline.
#[must_use]
pub const fn default_cache_capacity() -> NonZeroUsize {
    DEFAULT_CACHE_CAPACITY
}

/// Hover output is offered unless disabled.
#[must_use]
pub const fn default_enable_hover() -> bool {
    true
}
