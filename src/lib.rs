//! seolens: content analysis for SEO and readability
//!
//! This library scores a piece of prose and its SEO metadata (keyphrase,
//! synonyms, title, slug, meta description) with a set of independent
//! assessments, and aggregates them into per-category and overall ratings.
//! A pass is a pure function of (paper, configuration) and yields the same
//! report byte for byte every time it runs.

pub mod analyzer;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod language;
pub mod reporter;
pub mod researcher;
pub mod text;
pub mod watcher;

pub use analyzer::engine::AnalysisEngine;
pub use analyzer::CancellationToken;
pub use config::Configuration;
pub use text::InputFormat;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Immutable input of one analysis pass: the text and its SEO metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Paper {
    text: String,
    keyphrase: String,
    synonyms: Vec<String>,
    title: String,
    description: String,
    slug: String,
    url: String,
    locale: String,
    format: InputFormat,
}

impl Paper {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_keyphrase(mut self, keyphrase: impl Into<String>) -> Self {
        self.keyphrase = keyphrase.into().trim().to_string();
        self
    }

    /// Alternate keyphrases, kept in order. Blank entries and case-insensitive
    /// duplicates are dropped.
    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept: Vec<String> = Vec::new();
        for synonym in synonyms {
            let synonym = synonym.into().trim().to_string();
            if synonym.is_empty() {
                continue;
            }
            let lower = synonym.to_lowercase();
            if !kept.iter().any(|k| k.to_lowercase() == lower) {
                kept.push(synonym);
            }
        }
        self.synonyms = kept;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn keyphrase(&self) -> &str {
        &self.keyphrase
    }

    pub fn has_keyphrase(&self) -> bool {
        !self.keyphrase.is_empty()
    }

    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn format(&self) -> InputFormat {
        self.format
    }
}

/// Split a comma-separated synonym list
pub fn parse_synonyms(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Kind of content being analyzed (affects thresholds and category weights)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Blog post or article
    #[default]
    Post,
    /// Static page
    Page,
    /// Long-form pillar content, held to stricter length rules
    Cornerstone,
    /// Category or tag archive description
    Taxonomy,
}

impl ContentType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "post" => Some(ContentType::Post),
            "page" => Some(ContentType::Page),
            "cornerstone" => Some(ContentType::Cornerstone),
            "taxonomy" | "term" => Some(ContentType::Taxonomy),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Post => write!(f, "post"),
            ContentType::Page => write!(f, "page"),
            ContentType::Cornerstone => write!(f, "cornerstone"),
            ContentType::Taxonomy => write!(f, "taxonomy"),
        }
    }
}

/// Per-content-type weights of the two categories in the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWeights {
    pub seo: f64,
    pub readability: f64,
}

impl CategoryWeights {
    pub fn for_content_type(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Post | ContentType::Page | ContentType::Cornerstone => Self {
                seo: 50.0,
                readability: 50.0,
            },
            ContentType::Taxonomy => Self {
                seo: 70.0,
                readability: 30.0,
            },
        }
    }

    pub fn weight(&self, category: Category) -> f64 {
        match category {
            Category::Seo => self.seo,
            Category::Readability => self.readability,
        }
    }
}

/// Assessment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Seo,
    Readability,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Seo => write!(f, "SEO"),
            Category::Readability => write!(f, "Readability"),
        }
    }
}

/// Stable identifiers of the built-in assessments, in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssessmentId {
    IntroductionKeyword,
    KeyphraseLength,
    KeyphraseDensity,
    MetaDescriptionKeyword,
    MetaDescriptionLength,
    SubheadingsKeyword,
    Images,
    TextLength,
    ExternalLinks,
    TitleKeyword,
    InternalLinks,
    SlugKeyword,
    SingleH1,
    SubheadingsTooLong,
    TextParagraphTooLong,
    TextSentenceLength,
    SentenceBeginnings,
    PassiveVoice,
    TextTransitionWords,
    FleschReadingEase,
    TextPresence,
}

impl AssessmentId {
    pub const ALL: [AssessmentId; 21] = [
        AssessmentId::IntroductionKeyword,
        AssessmentId::KeyphraseLength,
        AssessmentId::KeyphraseDensity,
        AssessmentId::MetaDescriptionKeyword,
        AssessmentId::MetaDescriptionLength,
        AssessmentId::SubheadingsKeyword,
        AssessmentId::Images,
        AssessmentId::TextLength,
        AssessmentId::ExternalLinks,
        AssessmentId::TitleKeyword,
        AssessmentId::InternalLinks,
        AssessmentId::SlugKeyword,
        AssessmentId::SingleH1,
        AssessmentId::SubheadingsTooLong,
        AssessmentId::TextParagraphTooLong,
        AssessmentId::TextSentenceLength,
        AssessmentId::SentenceBeginnings,
        AssessmentId::PassiveVoice,
        AssessmentId::TextTransitionWords,
        AssessmentId::FleschReadingEase,
        AssessmentId::TextPresence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentId::IntroductionKeyword => "introductionKeyword",
            AssessmentId::KeyphraseLength => "keyphraseLength",
            AssessmentId::KeyphraseDensity => "keyphraseDensity",
            AssessmentId::MetaDescriptionKeyword => "metaDescriptionKeyword",
            AssessmentId::MetaDescriptionLength => "metaDescriptionLength",
            AssessmentId::SubheadingsKeyword => "subheadingsKeyword",
            AssessmentId::Images => "images",
            AssessmentId::TextLength => "textLength",
            AssessmentId::ExternalLinks => "externalLinks",
            AssessmentId::TitleKeyword => "titleKeyword",
            AssessmentId::InternalLinks => "internalLinks",
            AssessmentId::SlugKeyword => "slugKeyword",
            AssessmentId::SingleH1 => "singleH1",
            AssessmentId::SubheadingsTooLong => "subheadingsTooLong",
            AssessmentId::TextParagraphTooLong => "textParagraphTooLong",
            AssessmentId::TextSentenceLength => "textSentenceLength",
            AssessmentId::SentenceBeginnings => "sentenceBeginnings",
            AssessmentId::PassiveVoice => "passiveVoice",
            AssessmentId::TextTransitionWords => "textTransitionWords",
            AssessmentId::FleschReadingEase => "fleschReadingEase",
            AssessmentId::TextPresence => "textPresence",
        }
    }

    pub fn category(&self) -> Category {
        use AssessmentId::*;
        match self {
            IntroductionKeyword | KeyphraseLength | KeyphraseDensity | MetaDescriptionKeyword
            | MetaDescriptionLength | SubheadingsKeyword | Images | TextLength | ExternalLinks
            | TitleKeyword | InternalLinks | SlugKeyword | SingleH1 => Category::Seo,
            SubheadingsTooLong | TextParagraphTooLong | TextSentenceLength
            | SentenceBeginnings | PassiveVoice | TextTransitionWords | FleschReadingEase
            | TextPresence => Category::Readability,
        }
    }

    /// Position in the registration order
    pub fn order(&self) -> usize {
        Self::ALL.iter().position(|id| id == self).unwrap_or(Self::ALL.len())
    }
}

impl std::str::FromStr for AssessmentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssessmentId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown assessment '{}'", s))
    }
}

impl std::fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Traffic-light bucket, plus `Feedback` for results without a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Feedback,
    Bad,
    Ok,
    Good,
}

impl Rating {
    /// Bucket of an assessment score (0-9)
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => Rating::Feedback,
            1..=4 => Rating::Bad,
            5..=7 => Rating::Ok,
            _ => Rating::Good,
        }
    }

    /// Bucket of a 0-100 score; the 0-9 table applied to tenths
    pub fn from_percent(score: u8) -> Self {
        match score {
            0..=40 => Rating::Bad,
            41..=70 => Rating::Ok,
            _ => Rating::Good,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Feedback => write!(f, "feedback"),
            Rating::Bad => write!(f, "bad"),
            Rating::Ok => write!(f, "ok"),
            Rating::Good => write!(f, "good"),
        }
    }
}

/// What a [`Match`] highlights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchKind {
    Keyphrase,
    PassiveVoice,
    LongSentence,
    LongParagraph,
    LongSection,
    SentenceBeginning,
    TransitionWord,
    KeyphraseInSubheading,
    MultipleH1,
}

/// A located occurrence of a feature, for highlighting in the host editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub kind: MatchKind,
    /// Byte offset into the normalized text
    pub start: usize,
    pub end: usize,
    /// Byte offset into the raw input
    pub source_start: usize,
    pub source_end: usize,
    /// The matched normalized text
    pub text: String,
}

/// Output of one assessment for one pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub identifier: AssessmentId,
    pub category: Category,
    /// Score 0-9 (0 only when uncalculated)
    pub score: u8,
    pub has_score: bool,
    pub rating: Rating,
    /// Human-readable feedback
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<Match>,
    /// The raw number behind the rating, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement: Option<f64>,
}

impl AssessmentResult {
    pub fn new(identifier: AssessmentId, score: u8, text: impl Into<String>) -> Self {
        Self {
            identifier,
            category: identifier.category(),
            score,
            has_score: true,
            rating: Rating::from_score(score),
            text: text.into(),
            matches: Vec::new(),
            measurement: None,
        }
    }

    /// A result that informs without contributing a score
    pub fn uncalculated(identifier: AssessmentId, text: impl Into<String>) -> Self {
        Self {
            identifier,
            category: identifier.category(),
            score: 0,
            has_score: false,
            rating: Rating::Feedback,
            text: text.into(),
            matches: Vec::new(),
            measurement: None,
        }
    }

    pub fn with_matches(mut self, matches: Vec<Match>) -> Self {
        self.matches = matches;
        self
    }

    pub fn with_measurement(mut self, value: f64) -> Self {
        self.measurement = Some(value);
        self
    }
}

/// Aggregate score of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: Category,
    /// Score 0-100 over scored results
    pub score: u8,
    pub rating: Rating,
    /// Number of results that contributed a score
    pub scored: usize,
}

/// Overall score (0-100) and the indicator bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallScore {
    pub score: u8,
    pub rating: Rating,
}

/// Statistics about the analyzed text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub subheadings: usize,
    pub characters: usize,
}

/// The aggregated output of one analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Code of the language pack that analyzed the text
    pub locale: String,
    pub content_type: ContentType,
    pub seo: CategoryScore,
    pub readability: CategoryScore,
    pub overall: OverallScore,
    /// Results, lowest score first
    pub results: Vec<AssessmentResult>,
    pub stats: TextStats,
}

impl Report {
    pub fn result(&self, identifier: AssessmentId) -> Option<&AssessmentResult> {
        self.results.iter().find(|r| r.identifier == identifier)
    }

    pub fn category(&self, category: Category) -> &CategoryScore {
        match category {
            Category::Seo => &self.seo,
            Category::Readability => &self.readability,
        }
    }

    /// SHA-256 (hex) of the JSON form; equal reports have equal fingerprints
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        hex::encode(Sha256::digest(&json))
    }
}

/// Public API: analyze a paper with a fresh engine and no cancellation
pub fn analyze_paper(paper: &Paper, configuration: &Configuration) -> Report {
    AnalysisEngine::new()
        .run_analysis(paper, configuration, &CancellationToken::new())
        .expect("uncancelled pass always yields a report")
}

/// Public API: analyze a document file. Used by the language server and other
/// programmatic consumers.
///
/// * `path` - path to the document (front matter supplies the metadata)
/// * `work_dir` - project root (for config lookup)
/// * `config_path` - optional path to .seolensrc.json; if None, searches from work_dir
pub fn analyze_document(
    path: &std::path::Path,
    work_dir: &std::path::Path,
    config_path: Option<&std::path::Path>,
) -> anyhow::Result<Report> {
    let config = crate::config::load_config(work_dir, config_path).unwrap_or_default();
    let document = crate::document::read_document(path)?;
    let configuration = config.configuration_for(path, document.content_type);
    Ok(analyze_paper(&document.paper, &configuration))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonyms_are_ordered_and_deduplicated() {
        let paper = Paper::new("x").with_synonyms(["Cats", " ", "kittens", "cats", "Felines"]);
        assert_eq!(paper.synonyms(), &["Cats", "kittens", "Felines"]);
    }

    #[test]
    fn keyphrase_is_trimmed() {
        let paper = Paper::new("x").with_keyphrase("  cats  ");
        assert_eq!(paper.keyphrase(), "cats");
        assert!(paper.has_keyphrase());
        assert!(!Paper::new("x").with_keyphrase("   ").has_keyphrase());
    }

    #[test]
    fn rating_table() {
        assert_eq!(Rating::from_score(0), Rating::Feedback);
        assert_eq!(Rating::from_score(4), Rating::Bad);
        assert_eq!(Rating::from_score(5), Rating::Ok);
        assert_eq!(Rating::from_score(7), Rating::Ok);
        assert_eq!(Rating::from_score(8), Rating::Good);
        assert_eq!(Rating::from_percent(40), Rating::Bad);
        assert_eq!(Rating::from_percent(41), Rating::Ok);
        assert_eq!(Rating::from_percent(71), Rating::Good);
    }

    #[test]
    fn assessment_ids_round_trip_through_strings() {
        for id in AssessmentId::ALL {
            assert_eq!(id.as_str().parse::<AssessmentId>(), Ok(id));
            let json = serde_json::to_string(&id).expect("serialize");
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
        assert!("nope".parse::<AssessmentId>().is_err());
    }

    #[test]
    fn registration_order_matches_all() {
        assert_eq!(AssessmentId::IntroductionKeyword.order(), 0);
        assert_eq!(AssessmentId::TextPresence.order(), 20);
        assert_eq!(AssessmentId::SingleH1.category(), Category::Seo);
        assert_eq!(AssessmentId::PassiveVoice.category(), Category::Readability);
    }

    #[test]
    fn uncalculated_results_have_no_score() {
        let result = AssessmentResult::uncalculated(AssessmentId::KeyphraseLength, "Set one");
        assert!(!result.has_score);
        assert_eq!(result.score, 0);
        assert_eq!(result.rating, Rating::Feedback);
    }

    #[test]
    fn content_type_parsing_is_lenient() {
        assert_eq!(ContentType::parse("Cornerstone"), Some(ContentType::Cornerstone));
        assert_eq!(ContentType::parse("term"), Some(ContentType::Taxonomy));
        assert_eq!(ContentType::parse("landing"), None);
    }

    #[test]
    fn parses_comma_separated_synonyms() {
        assert_eq!(parse_synonyms("a, b ,,c"), vec!["a", "b", "c"]);
    }
}
