//! Validator engines and context construction for both design-system
//! versions.

use std::fs;
use std::path::Path;

use tailmark_core::{
    BatchValidator, CatalogError, RuleGenerator, RuleMeta, StyleNode, ValidatorAdapter,
    ValidatorContext,
};
use tracing::debug;

use crate::catalog::UtilityCatalog;
use crate::manifest::load_manifest;
use crate::stylesheet::read_stylesheet;
use crate::tokenizer::DefaultTokenizer;

const ENGINE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::engine");

const PRESET: &str = include_str!("preset.css");

/// Slot-per-candidate validator over a stylesheet catalogue.
#[derive(Debug, Clone)]
pub struct StylesheetEngine {
    catalog: UtilityCatalog,
}

impl StylesheetEngine {
    /// Wraps `catalog`.
    #[must_use]
    pub const fn new(catalog: UtilityCatalog) -> Self {
        Self { catalog }
    }
}

impl BatchValidator for StylesheetEngine {
    fn candidates_to_css(&self, candidates: &[String]) -> Vec<Option<StyleNode>> {
        candidates
            .iter()
            .map(|candidate| self.catalog.generate(candidate))
            .collect()
    }
}

/// Pair-list validator over a manifest catalogue.
#[derive(Debug, Clone)]
pub struct ConfigEngine {
    catalog: UtilityCatalog,
}

impl ConfigEngine {
    /// Wraps `catalog`.
    #[must_use]
    pub const fn new(catalog: UtilityCatalog) -> Self {
        Self { catalog }
    }
}

impl RuleGenerator for ConfigEngine {
    fn generate_rules(&self, candidates: &[String]) -> Vec<(RuleMeta, StyleNode)> {
        candidates
            .iter()
            .filter_map(|candidate| {
                self.catalog
                    .generate(candidate)
                    .map(|node| (RuleMeta::new(candidate.as_str()), node))
            })
            .collect()
    }
}

/// Returns a catalogue holding the built-in preset utilities.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidStylesheet`] if the bundled preset fails
/// to parse.
pub fn preset_catalog() -> Result<UtilityCatalog, CatalogError> {
    let mut catalog = UtilityCatalog::default();
    read_stylesheet(PRESET, &mut catalog)?;
    Ok(catalog)
}

/// Builds a batch-validated context from stylesheet source layered over the
/// preset.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidStylesheet`] when `css` cannot be parsed.
pub fn stylesheet_context(css: &str) -> Result<ValidatorContext, CatalogError> {
    let mut catalog = preset_catalog()?;
    read_stylesheet(css, &mut catalog)?;
    debug!(
        target: ENGINE_TARGET,
        utilities = catalog.utility_count(),
        variants = catalog.variant_count(),
        "stylesheet design system built"
    );
    let tokenizer = DefaultTokenizer::new(catalog.separator());
    Ok(ValidatorContext::new(
        Box::new(tokenizer),
        ValidatorAdapter::Batch(Box::new(StylesheetEngine::new(catalog))),
    ))
}

/// Builds a batch-validated context from a stylesheet file.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] when the file cannot be read and
/// [`CatalogError::InvalidStylesheet`] when it cannot be parsed.
pub fn stylesheet_file_context(path: &Path) -> Result<ValidatorContext, CatalogError> {
    let css = fs::read_to_string(path).map_err(|err| CatalogError::io(path, err))?;
    stylesheet_context(&css)
}

/// Builds a pair-list context from a manifest layered over the preset.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] or [`CatalogError::InvalidManifest`] when
/// the manifest cannot be loaded.
pub fn config_context(path: &Path) -> Result<ValidatorContext, CatalogError> {
    let manifest = load_manifest(path)?;
    let mut catalog = preset_catalog()?;
    manifest.apply(path, &mut catalog)?;
    debug!(
        target: ENGINE_TARGET,
        path = %path.display(),
        utilities = catalog.utility_count(),
        variants = catalog.variant_count(),
        "config design system built"
    );
    let tokenizer = DefaultTokenizer::new(catalog.separator());
    Ok(ValidatorContext::new(
        Box::new(tokenizer),
        ValidatorAdapter::PairList(Box::new(ConfigEngine::new(catalog))),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|text| (*text).to_owned()).collect()
    }

    #[test]
    fn preset_parses() {
        let catalog = preset_catalog().expect("preset");
        assert!(catalog.utility_count() > 50);
        assert!(catalog.generate("flex-col").is_some());
        assert!(catalog.generate("w-[3px]").is_some());
    }

    #[test]
    fn batch_engine_answers_every_slot() {
        let engine = StylesheetEngine::new(preset_catalog().expect("preset"));
        let answers = engine.candidates_to_css(&candidates(&["flex", "nope", "grow"]));
        assert_eq!(answers.len(), 3);
        assert!(answers.first().is_some_and(Option::is_some));
        assert!(answers.get(1).is_some_and(Option::is_none));
        assert!(answers.get(2).is_some_and(Option::is_some));
    }

    #[test]
    fn rule_generator_lists_valid_candidates_only() {
        let engine = ConfigEngine::new(preset_catalog().expect("preset"));
        let rules = engine.generate_rules(&candidates(&["flex", "nope", "grow"]));
        let names: Vec<&str> = rules.iter().map(|(meta, _)| meta.candidate()).collect();
        assert_eq!(names, ["flex", "grow"]);
    }

    #[test]
    fn stylesheet_extends_preset() {
        let context = stylesheet_context("@utility brand { color: red; }").expect("context");
        let ValidatorAdapter::Batch(engine) = context.validator() else {
            panic!("expected a batch validator");
        };
        let answers = engine.candidates_to_css(&candidates(&["brand", "flex"]));
        assert!(answers.iter().all(Option::is_some));
    }
}
