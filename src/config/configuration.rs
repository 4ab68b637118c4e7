//! Immutable per-pass settings handed to the engine

use crate::{AssessmentId, CategoryWeights, ContentType};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Texts shorter than this many characters trigger the text presence warning
pub const DEFAULT_MIN_CONTENT_CHARS: usize = 50;

/// Settings for one analysis pass. Built by the host (usually from a
/// [`Config`](super::Config) file) and never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Overrides the paper's locale when set
    pub locale: Option<String>,
    pub content_type: ContentType,
    /// Assessments that are switched off
    pub disabled: BTreeSet<AssessmentId>,
    /// Per-assessment weight in its category score (default 1)
    pub weights: BTreeMap<AssessmentId, f64>,
    pub category_weights: CategoryWeights,
    /// Per-assessment minimum word count below which it is skipped
    pub min_words: BTreeMap<AssessmentId, usize>,
    pub min_content_chars: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::for_content_type(ContentType::default())
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for a content type, including its category weights
    pub fn for_content_type(content_type: ContentType) -> Self {
        Self {
            locale: None,
            content_type,
            disabled: BTreeSet::new(),
            weights: BTreeMap::new(),
            category_weights: CategoryWeights::for_content_type(content_type),
            min_words: BTreeMap::new(),
            min_content_chars: DEFAULT_MIN_CONTENT_CHARS,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Switch content type; category weights follow the new type
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self.category_weights = CategoryWeights::for_content_type(content_type);
        self
    }

    pub fn with_disabled(mut self, id: AssessmentId) -> Self {
        self.disabled.insert(id);
        self
    }

    pub fn with_weight(mut self, id: AssessmentId, weight: f64) -> Self {
        self.weights.insert(id, weight);
        self
    }

    pub fn with_category_weights(mut self, weights: CategoryWeights) -> Self {
        self.category_weights = weights;
        self
    }

    pub fn with_min_words(mut self, id: AssessmentId, words: usize) -> Self {
        self.min_words.insert(id, words);
        self
    }

    pub fn with_min_content_chars(mut self, chars: usize) -> Self {
        self.min_content_chars = chars;
        self
    }

    pub fn is_enabled(&self, id: AssessmentId) -> bool {
        !self.disabled.contains(&id)
    }

    /// Weight of an assessment in its category; non-positive overrides are ignored
    pub fn weight(&self, id: AssessmentId) -> f64 {
        match self.weights.get(&id) {
            Some(&w) if w.is_finite() && w > 0.0 => w,
            _ => 1.0,
        }
    }

    /// Minimum word count for an assessment, falling back to `default`
    pub fn min_words_for(&self, id: AssessmentId, default: usize) -> usize {
        self.min_words.get(&id).copied().unwrap_or(default)
    }

    /// Whether this is a cornerstone piece (stricter length rules)
    pub fn is_cornerstone(&self) -> bool {
        self.content_type == ContentType::Cornerstone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Configuration::new();
        assert_eq!(config.content_type, ContentType::Post);
        assert_eq!(config.min_content_chars, 50);
        assert!(config.is_enabled(AssessmentId::PassiveVoice));
        assert_eq!(config.weight(AssessmentId::PassiveVoice), 1.0);
        assert_eq!(config.category_weights.seo, 50.0);
    }

    #[test]
    fn non_positive_weights_are_ignored() {
        let config = Configuration::new()
            .with_weight(AssessmentId::Images, 0.0)
            .with_weight(AssessmentId::TextLength, 3.0)
            .with_weight(AssessmentId::SingleH1, f64::NAN);
        assert_eq!(config.weight(AssessmentId::Images), 1.0);
        assert_eq!(config.weight(AssessmentId::TextLength), 3.0);
        assert_eq!(config.weight(AssessmentId::SingleH1), 1.0);
    }

    #[test]
    fn content_type_carries_category_weights() {
        let config = Configuration::new().with_content_type(ContentType::Taxonomy);
        assert_eq!(config.category_weights.seo, 70.0);
        assert_eq!(config.category_weights.readability, 30.0);
    }

    #[test]
    fn min_words_override() {
        let config = Configuration::new().with_min_words(AssessmentId::TextTransitionWords, 50);
        assert_eq!(config.min_words_for(AssessmentId::TextTransitionWords, 200), 50);
        assert_eq!(config.min_words_for(AssessmentId::PassiveVoice, 0), 0);
    }
}
