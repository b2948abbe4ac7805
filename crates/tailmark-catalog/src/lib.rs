//! Design-system engines for the Tailmark pipeline.
//!
//! Both engine versions share one [`UtilityCatalog`] model seeded with a
//! bundled preset:
//!
//! - v3 design systems are read from a JSON manifest and validated through
//!   a pair-list [`ConfigEngine`].
//! - v4 design systems are read from a stylesheet of `@utility` and
//!   `@custom-variant` directives and validated through a batch
//!   [`StylesheetEngine`].
//!
//! [`CatalogLoader`] is the [`ContextLoader`] handed to the pipeline.

mod catalog;
mod engine;
mod escape;
mod manifest;
mod stylesheet;
mod tokenizer;

pub use catalog::{DEFAULT_SEPARATOR, UtilityCatalog, ValueTemplate, Variant};
pub use engine::{
    ConfigEngine, StylesheetEngine, config_context, preset_catalog, stylesheet_context,
    stylesheet_file_context,
};
pub use manifest::{Manifest, load_manifest};
pub use stylesheet::read_stylesheet;
pub use tokenizer::DefaultTokenizer;

use tailmark_core::{CatalogError, ContextLoader, SourceConfig, ValidatorContext};

/// Loads design systems from the filesystem or inline stylesheet source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogLoader;

impl ContextLoader for CatalogLoader {
    fn load(&self, source: &SourceConfig) -> Result<ValidatorContext, CatalogError> {
        load(source)
    }
}

/// Builds the validator context described by `source`.
///
/// # Errors
///
/// Returns a [`CatalogError`] when the source cannot be read or parsed.
pub fn load(source: &SourceConfig) -> Result<ValidatorContext, CatalogError> {
    match source {
        SourceConfig::ConfigFile(path) => config_context(path),
        SourceConfig::StylesheetFile(path) => stylesheet_file_context(path),
        SourceConfig::Stylesheet { css } => stylesheet_context(css),
    }
}
