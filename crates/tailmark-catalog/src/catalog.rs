//! The utility catalogue shared by both engine versions.
//!
//! A catalogue knows three things: static utilities with fixed declarations,
//! functional utilities that take a bracketed arbitrary value, and variants
//! that wrap a utility's rule in a selector or an at-rule. Generating the
//! rule for a candidate such as `md:hover:w-[3px]` splits off the variants,
//! resolves the utility, and applies the variants innermost first.

use std::collections::BTreeMap;

use tailmark_core::StyleNode;

use crate::escape::escape_class;

/// Default variant separator.
pub const DEFAULT_SEPARATOR: char = ':';

const IMPORTANT_PREFIX: char = '!';
const IMPORTANT_SUFFIX: &str = " !important";

/// A declaration value in a functional utility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueTemplate {
    /// Emitted as written.
    Fixed(String),
    /// Replaced by the candidate's bracketed value.
    Arbitrary,
}

/// How a variant transforms a generated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variant {
    /// A selector template in which `&` stands for the current selector.
    Selector(String),
    /// An at-rule that wraps the generated rule.
    AtRule {
        /// At-rule name without `@`.
        name: String,
        /// At-rule prelude.
        params: String,
    },
}

impl Variant {
    /// Parses `&:hover`-style templates and `@media …` at-rules.
    ///
    /// Returns `None` for a selector without `&` or an at-rule without a
    /// name.
    #[must_use]
    pub fn parse(template: &str) -> Option<Self> {
        let trimmed = template.trim();
        if let Some(at_rule) = trimmed.strip_prefix('@') {
            let (name, params) = at_rule
                .split_once(char::is_whitespace)
                .unwrap_or((at_rule, ""));
            if name.is_empty() {
                return None;
            }
            return Some(Self::AtRule {
                name: name.to_owned(),
                params: params.trim().to_owned(),
            });
        }
        trimmed
            .contains('&')
            .then(|| Self::Selector(trimmed.to_owned()))
    }
}

/// Utilities and variants of one design system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtilityCatalog {
    separator: char,
    utilities: BTreeMap<String, Vec<(String, String)>>,
    functional: BTreeMap<String, Vec<(String, ValueTemplate)>>,
    variants: BTreeMap<String, Variant>,
}

impl Default for UtilityCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

impl UtilityCatalog {
    /// Creates a catalogue with the built-in variants and no utilities.
    #[must_use]
    pub fn new(separator: char) -> Self {
        let mut catalog = Self {
            separator,
            utilities: BTreeMap::new(),
            functional: BTreeMap::new(),
            variants: BTreeMap::new(),
        };
        for (name, template) in BUILTIN_VARIANTS {
            if let Some(variant) = Variant::parse(template) {
                catalog.variants.insert((*name).to_owned(), variant);
            }
        }
        catalog
    }

    /// Returns the variant separator.
    #[must_use]
    pub const fn separator(&self) -> char {
        self.separator
    }

    /// Sets the variant separator.
    pub const fn set_separator(&mut self, separator: char) {
        self.separator = separator;
    }

    /// Adds or replaces a static utility.
    pub fn add_utility(&mut self, name: impl Into<String>, declarations: Vec<(String, String)>) {
        self.utilities.insert(name.into(), declarations);
    }

    /// Adds or replaces a functional utility taking `prefix-[value]`.
    pub fn add_functional(
        &mut self,
        prefix: impl Into<String>,
        declarations: Vec<(String, ValueTemplate)>,
    ) {
        self.functional.insert(prefix.into(), declarations);
    }

    /// Adds or replaces a variant.
    pub fn add_variant(&mut self, name: impl Into<String>, variant: Variant) {
        self.variants.insert(name.into(), variant);
    }

    /// Returns the number of static and functional utilities.
    #[must_use]
    pub fn utility_count(&self) -> usize {
        self.utilities.len() + self.functional.len()
    }

    /// Returns the number of variants.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Generates the rule for `candidate`, or `None` when any part of it is
    /// unknown.
    #[must_use]
    pub fn generate(&self, candidate: &str) -> Option<StyleNode> {
        let mut segments = split_variants(candidate, self.separator);
        let utility = segments.pop()?;
        if utility.is_empty() || segments.iter().any(String::is_empty) {
            return None;
        }

        let (important, utility_name) = utility
            .strip_prefix(IMPORTANT_PREFIX)
            .map_or((false, utility.as_str()), |rest| (true, rest));
        let declarations = self.declarations(utility_name)?;

        let mut selector = format!(".{}", escape_class(candidate));
        let mut wrappers = Vec::new();
        for variant_name in segments.iter().rev() {
            match self.variants.get(variant_name)? {
                Variant::Selector(template) => selector = template.replace('&', &selector),
                Variant::AtRule { name, params } => wrappers.push((name, params)),
            }
        }

        let children = declarations
            .into_iter()
            .map(|(property, value)| {
                if important {
                    StyleNode::declaration(property, format!("{value}{IMPORTANT_SUFFIX}"))
                } else {
                    StyleNode::declaration(property, value)
                }
            })
            .collect();
        let rule = StyleNode::rule(selector, children);
        Some(wrappers.into_iter().fold(rule, |inner, (at_name, at_params)| {
            StyleNode::at_rule(at_name.as_str(), at_params.as_str(), vec![inner])
        }))
    }

    fn declarations(&self, name: &str) -> Option<Vec<(String, String)>> {
        if let Some(fixed) = self.utilities.get(name) {
            return Some(fixed.clone());
        }
        let (prefix, value) = arbitrary_parts(name)?;
        let templates = self.functional.get(prefix)?;
        let spaced = value.replace('_', " ");
        Some(
            templates
                .iter()
                .map(|(property, template)| {
                    let rendered = match template {
                        ValueTemplate::Fixed(fixed) => fixed.clone(),
                        ValueTemplate::Arbitrary => spaced.clone(),
                    };
                    (property.clone(), rendered)
                })
                .collect(),
        )
    }
}

/// Splits `prefix-[value]` into its prefix and raw value.
fn arbitrary_parts(name: &str) -> Option<(&str, &str)> {
    let (prefix, bracketed) = name.split_once("-[")?;
    let value = bracketed.strip_suffix(']')?;
    (!prefix.is_empty() && !value.trim().is_empty()).then_some((prefix, value))
}

/// Splits a candidate on `separator`, ignoring separators inside brackets.
fn split_variants(candidate: &str, separator: char) -> Vec<String> {
    let mut segments = vec![String::new()];
    let mut depth = 0_usize;
    for ch in candidate.chars() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if ch == separator && depth == 0 {
            segments.push(String::new());
        } else if let Some(current) = segments.last_mut() {
            current.push(ch);
        }
    }
    segments
}

const BUILTIN_VARIANTS: &[(&str, &str)] = &[
    ("hover", "&:hover"),
    ("focus", "&:focus"),
    ("focus-visible", "&:focus-visible"),
    ("active", "&:active"),
    ("disabled", "&:disabled"),
    ("first", "&:first-child"),
    ("last", "&:last-child"),
    ("odd", "&:nth-child(odd)"),
    ("even", "&:nth-child(even)"),
    ("group-hover", ".group:hover &"),
    ("peer-focus", ".peer:focus ~ &"),
    ("dark", "@media (prefers-color-scheme: dark)"),
    ("print", "@media print"),
    ("sm", "@media (min-width: 640px)"),
    ("md", "@media (min-width: 768px)"),
    ("lg", "@media (min-width: 1024px)"),
    ("xl", "@media (min-width: 1280px)"),
    ("2xl", "@media (min-width: 1536px)"),
];
