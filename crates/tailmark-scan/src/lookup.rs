//! Normalised candidate validation.
//!
//! Both validator shapes are reduced to one question: which rule, if any,
//! does a given token string produce? Each distinct token is sent to the
//! validator exactly once per extraction and the first rule generated for it
//! wins, whichever shape answered.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tailmark_core::{CandidateToken, StyleNode, ValidatorAdapter};
use tracing::debug;

const LOOKUP_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::lookup");

/// Rules generated for the distinct tokens of one extraction.
#[derive(Debug, Default, Clone)]
pub struct CandidateLookup {
    rules: HashMap<String, StyleNode>,
}

impl CandidateLookup {
    /// Queries `validator` once with the distinct texts of `tokens`, in
    /// first-occurrence order.
    #[must_use]
    pub fn resolve(validator: &ValidatorAdapter, tokens: &[CandidateToken]) -> Self {
        let candidates = distinct_texts(tokens);
        if candidates.is_empty() {
            return Self::default();
        }

        let mut rules = HashMap::new();
        match validator {
            ValidatorAdapter::Batch(batch) => {
                let slots = batch.candidates_to_css(&candidates);
                if slots.len() != candidates.len() {
                    debug!(
                        target: LOOKUP_TARGET,
                        expected = candidates.len(),
                        received = slots.len(),
                        "batch validator answered a different number of slots"
                    );
                }
                for (candidate, slot) in candidates.iter().zip(slots) {
                    if let Some(rule) = slot {
                        insert_first(&mut rules, candidate, rule);
                    }
                }
            }
            ValidatorAdapter::PairList(generator) => {
                for (meta, rule) in generator.generate_rules(&candidates) {
                    insert_first(&mut rules, meta.candidate(), rule);
                }
            }
        }
        Self { rules }
    }

    /// Returns the rule generated for `token`, if it is valid.
    #[must_use]
    pub fn validate(&self, token: &str) -> Option<&StyleNode> {
        self.rules.get(token)
    }

    /// Returns the number of valid distinct tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when no token was valid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn insert_first(rules: &mut HashMap<String, StyleNode>, candidate: &str, rule: StyleNode) {
    if let Entry::Vacant(slot) = rules.entry(candidate.to_owned()) {
        slot.insert(rule);
    }
}

fn distinct_texts(tokens: &[CandidateToken]) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .iter()
        .map(CandidateToken::text)
        .filter(|text| !text.is_empty() && seen.insert(*text))
        .map(str::to_owned)
        .collect()
}
