//! JSON configuration manifests for pair-list (v3) design systems.
//!
//! A manifest extends the preset catalogue:
//!
//! ```json
//! {
//!   "separator": ":",
//!   "utilities": { "btn": { "padding": "0.5rem 1rem", "border-radius": "0.25rem" } },
//!   "arbitrary": { "tab": ["tab-size"] },
//!   "variants": { "hocus": "&:hover, &:focus", "tall": "@media (min-height: 800px)" }
//! }
//! ```
//!
//! Every section is optional.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tailmark_core::CatalogError;

use crate::catalog::{DEFAULT_SEPARATOR, UtilityCatalog, ValueTemplate, Variant};

/// Deserialised manifest document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Variant separator; exactly one character.
    pub separator: Option<String>,
    /// Static utilities: name to property/value pairs, emitted sorted by
    /// property.
    pub utilities: BTreeMap<String, BTreeMap<String, String>>,
    /// Functional utilities: prefix to the properties set by `prefix-[value]`.
    pub arbitrary: BTreeMap<String, Vec<String>>,
    /// Variants: name to selector template or at-rule.
    pub variants: BTreeMap<String, String>,
}

impl Manifest {
    /// Parses manifest JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidManifest`] naming `path` when the JSON
    /// is malformed.
    pub fn parse(path: &Path, json: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(json)
            .map_err(|err| CatalogError::invalid_manifest(path, err.to_string()))
    }

    /// Adds the manifest's separator, utilities and variants to `catalog`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidManifest`] for a separator that is not
    /// a single character or a variant template that is neither a selector
    /// containing `&` nor an at-rule.
    pub fn apply(&self, path: &Path, catalog: &mut UtilityCatalog) -> Result<(), CatalogError> {
        catalog.set_separator(self.separator_char(path)?);

        for (name, declarations) in &self.utilities {
            let pairs = declarations
                .iter()
                .map(|(property, value)| (property.clone(), value.clone()))
                .collect();
            catalog.add_utility(name.as_str(), pairs);
        }
        for (prefix, properties) in &self.arbitrary {
            let templates = properties
                .iter()
                .map(|property| (property.clone(), ValueTemplate::Arbitrary))
                .collect();
            catalog.add_functional(prefix.as_str(), templates);
        }
        for (name, template) in &self.variants {
            let variant = Variant::parse(template).ok_or_else(|| {
                CatalogError::invalid_manifest(
                    path,
                    format!("variant `{name}` has an invalid template `{template}`"),
                )
            })?;
            catalog.add_variant(name.as_str(), variant);
        }
        Ok(())
    }

    fn separator_char(&self, path: &Path) -> Result<char, CatalogError> {
        let Some(separator) = self.separator.as_deref() else {
            return Ok(DEFAULT_SEPARATOR);
        };
        let mut chars = separator.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if !ch.is_whitespace() => Ok(ch),
            _ => Err(CatalogError::invalid_manifest(
                path,
                format!("separator must be a single character, found `{separator}`"),
            )),
        }
    }
}

/// Reads the manifest at `path`.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] when the file cannot be read and
/// [`CatalogError::InvalidManifest`] when it is not a valid manifest.
pub fn load_manifest(path: &Path) -> Result<Manifest, CatalogError> {
    let json = fs::read_to_string(path).map_err(|err| CatalogError::io(path, err))?;
    Manifest::parse(path, &json)
}
