//! Shared design-system doubles for pipeline tests.

use std::collections::HashSet;

use tailmark_core::{
    BatchValidator, CatalogError, ContextLoader, DesignSystemVersion, RuleGenerator, RuleMeta,
    SourceConfig, StyleNode, Tokenizer, ValidatorAdapter, ValidatorContext,
};

use crate::{Pipeline, PipelineOptions};

/// Splits on whitespace and the punctuation that surrounds classes in
/// markup and style sheets.
pub(super) struct SplitTokenizer;

impl Tokenizer for SplitTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        split_tokens(text)
    }
}

pub(super) fn split_tokens(text: &str) -> Vec<String> {
    text.split(|ch: char| {
        ch.is_whitespace() || matches!(ch, '"' | '\'' | '`' | '=' | ';' | '{' | '}' | '(' | ')' | ',')
    })
    .filter(|token| !token.is_empty())
    .map(str::to_owned)
    .collect()
}

/// The rule a test design system generates for `token`.
pub(super) fn rule_for(token: &str) -> StyleNode {
    StyleNode::rule(
        format!(".{token}"),
        vec![StyleNode::declaration("--token", token)],
    )
}

/// Batch validator confirming a fixed set of classes.
pub(super) struct FixedBatch {
    valid: HashSet<String>,
}

impl FixedBatch {
    pub(super) fn new(valid: &[&str]) -> Self {
        Self {
            valid: valid.iter().map(|class| (*class).to_owned()).collect(),
        }
    }
}

impl BatchValidator for FixedBatch {
    fn candidates_to_css(&self, candidates: &[String]) -> Vec<Option<StyleNode>> {
        candidates
            .iter()
            .map(|candidate| {
                self.valid
                    .contains(candidate)
                    .then(|| rule_for(candidate))
            })
            .collect()
    }
}

/// Pair-list validator confirming a fixed set of classes, answering in
/// reverse order.
pub(super) struct FixedRules {
    valid: HashSet<String>,
}

impl FixedRules {
    pub(super) fn new(valid: &[&str]) -> Self {
        Self {
            valid: valid.iter().map(|class| (*class).to_owned()).collect(),
        }
    }
}

impl RuleGenerator for FixedRules {
    fn generate_rules(&self, candidates: &[String]) -> Vec<(RuleMeta, StyleNode)> {
        candidates
            .iter()
            .rev()
            .filter(|candidate| self.valid.contains(*candidate))
            .map(|candidate| (RuleMeta::new(candidate.as_str()), rule_for(candidate)))
            .collect()
    }
}

/// Builds a context confirming `valid` in the shape of `version`.
pub(super) fn context(version: DesignSystemVersion, valid: &[&str]) -> ValidatorContext {
    let validator = match version {
        DesignSystemVersion::V3 => ValidatorAdapter::PairList(Box::new(FixedRules::new(valid))),
        DesignSystemVersion::V4 => ValidatorAdapter::Batch(Box::new(FixedBatch::new(valid))),
    };
    ValidatorContext::new(Box::new(SplitTokenizer), validator)
}

/// A loader that confirms `valid` in whichever shape the source asks for.
pub(super) fn fixed_loader(valid: &[&str]) -> Box<dyn ContextLoader> {
    let valid: Vec<String> = valid.iter().map(|class| (*class).to_owned()).collect();
    Box::new(
        move |source: &SourceConfig| -> Result<ValidatorContext, CatalogError> {
            let classes: Vec<&str> = valid.iter().map(String::as_str).collect();
            Ok(context(source.version(), &classes))
        },
    )
}

/// A loader that always fails.
pub(super) fn failing_loader() -> Box<dyn ContextLoader> {
    Box::new(
        |_source: &SourceConfig| -> Result<ValidatorContext, CatalogError> {
            Err(CatalogError::invalid_stylesheet(1, "unterminated block"))
        },
    )
}

/// The source config read by `version`.
pub(super) fn source_for(version: DesignSystemVersion) -> SourceConfig {
    match version {
        DesignSystemVersion::V3 => SourceConfig::ConfigFile("tailwind.config.json".into()),
        DesignSystemVersion::V4 => SourceConfig::Stylesheet {
            css: String::from("@utility flex { display: flex; }"),
        },
    }
}

/// A pipeline already loaded with a design system confirming `valid`.
pub(super) fn loaded_pipeline(version: DesignSystemVersion, valid: &[&str]) -> Pipeline {
    let mut pipeline =
        Pipeline::new(fixed_loader(valid), &PipelineOptions::default()).expect("pipeline");
    pipeline.reload(&source_for(version)).expect("reload");
    pipeline
}
