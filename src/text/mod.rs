//! Text preprocessing: raw markup to a structural model.
//!
//! The model is a flat list of blocks (paragraphs, headings, list items) whose
//! texts are joined by blank lines into one plain string. Sentences tile their
//! block, tokens tile their sentence, and every plain offset maps back to the
//! raw input through an offset map.

mod markup;
mod patterns;
pub mod sentences;
pub mod tokenizer;

pub use tokenizer::{normalize_word, tokenize, words_of, Token, TokenKind};

use crate::analyzer::CancellationToken;
use crate::error::Cancelled;
use crate::language::LanguagePack;
use patterns::{pattern, PatternId};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// How the raw text of a paper is marked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Sniff the markup from the content
    #[default]
    Auto,
    Html,
    Markdown,
    Plain,
}

impl InputFormat {
    /// Concrete format for `raw`; `Auto` is resolved by sniffing
    pub fn resolve(self, raw: &str) -> InputFormat {
        match self {
            InputFormat::Auto => detect_format(raw),
            other => other,
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Auto => write!(f, "auto"),
            InputFormat::Html => write!(f, "html"),
            InputFormat::Markdown => write!(f, "markdown"),
            InputFormat::Plain => write!(f, "plain"),
        }
    }
}

/// Guess the markup of a raw text. HTML wins over Markdown.
pub fn detect_format(raw: &str) -> InputFormat {
    if pattern(PatternId::HtmlSniff).is_match(raw) {
        InputFormat::Html
    } else if pattern(PatternId::MarkdownSniff).is_match(raw) {
        InputFormat::Markdown
    } else {
        InputFormat::Plain
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Paragraph,
    /// Heading level 1-6
    Heading(u8),
    ListItem,
}

/// A paragraph, heading or list item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Byte range in the model text
    pub range: Range<usize>,
    /// Byte range in the raw input
    pub source: Range<usize>,
    /// Indices of this block's sentences
    pub sentences: Range<usize>,
}

impl Block {
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            BlockKind::Heading(level) => Some(level),
            _ => None,
        }
    }

    pub fn is_heading(&self) -> bool {
        self.heading_level().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub range: Range<usize>,
    /// Index of the containing block
    pub block: usize,
    /// Level of the containing heading, if the sentence is one
    pub heading: Option<u8>,
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn is_heading(&self) -> bool {
        self.heading.is_some()
    }

    pub fn words(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| t.is_word())
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }
}

/// An anchor with its text range in the model text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub text: String,
    pub nofollow: bool,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

/// A run of model text and the raw span it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment {
    pub plain: usize,
    pub plain_len: usize,
    pub source: usize,
    pub source_len: usize,
}

impl Segment {
    fn is_verbatim(&self) -> bool {
        self.plain_len == self.source_len
    }
}

/// Maps model-text offsets back to raw-input offsets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetMap {
    segments: Vec<Segment>,
}

impl OffsetMap {
    pub(crate) fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    fn segment_at(&self, pos: usize) -> Option<&Segment> {
        let idx = self.segments.partition_point(|s| s.plain <= pos);
        idx.checked_sub(1).and_then(|i| self.segments.get(i))
    }

    /// Raw offset of the character at model offset `pos`
    pub fn to_source(&self, pos: usize) -> usize {
        let Some(seg) = self.segment_at(pos) else {
            return 0;
        };
        let offset = pos - seg.plain;
        if offset >= seg.plain_len {
            seg.source + seg.source_len
        } else if seg.is_verbatim() {
            seg.source + offset
        } else {
            seg.source
        }
    }

    /// Raw offset just past the character ending at model offset `end`
    pub fn to_source_end(&self, end: usize) -> usize {
        let Some(last) = end.checked_sub(1) else {
            return 0;
        };
        let Some(seg) = self.segment_at(last) else {
            return 0;
        };
        let offset = end - seg.plain;
        if offset > seg.plain_len || !seg.is_verbatim() {
            seg.source + seg.source_len
        } else {
            seg.source + offset
        }
    }
}

/// Output of preprocessing: blocks, sentences, tokens, links and images
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralModel {
    /// Block texts joined by "\n\n"
    pub text: String,
    pub blocks: Vec<Block>,
    pub sentences: Vec<Sentence>,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    /// Format the raw input was read as
    pub format: InputFormat,
    offsets: OffsetMap,
}

impl StructuralModel {
    /// Preprocess without a cancellation point
    pub fn parse(raw: &str, format: InputFormat, pack: &LanguagePack) -> StructuralModel {
        let model = preprocess(raw, format, pack, &CancellationToken::new());
        model.unwrap_or_default()
    }

    /// Preprocess this model's own text again.
    ///
    /// The text is already normalized, so it is read as plain text and never
    /// sniffed for markup: a paragraph starting with "# " stays a paragraph.
    /// Block kinds, links and images carry over from this model.
    pub fn reparse(&self, pack: &LanguagePack) -> StructuralModel {
        let mut markup = markup::scan_plain(&self.text);
        for block in &mut markup.blocks {
            if let Some(original) = self.blocks.iter().find(|b| b.range == block.range) {
                block.kind = original.kind;
            }
        }
        markup.links = self.links.clone();
        markup.images = self.images.clone();
        segment(markup, InputFormat::Plain, pack, &CancellationToken::new()).unwrap_or_default()
    }

    pub fn sentence_text(&self, index: usize) -> &str {
        self.sentences
            .get(index)
            .map_or("", |s| &self.text[s.range.clone()])
    }

    pub fn block_text(&self, index: usize) -> &str {
        self.blocks
            .get(index)
            .map_or("", |b| &self.text[b.range.clone()])
    }

    /// Raw-input span of a model-text range
    pub fn to_source_range(&self, range: Range<usize>) -> Range<usize> {
        self.offsets.to_source(range.start)..self.offsets.to_source_end(range.end)
    }

    pub fn offsets(&self) -> &OffsetMap {
        &self.offsets
    }

    /// Characters of prose, excluding block separators
    pub fn character_count(&self) -> usize {
        self.blocks
            .iter()
            .map(|b| self.text[b.range.clone()].chars().count())
            .sum()
    }

    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(Sentence::word_count).sum()
    }
}

/// Build the structural model of `raw`, polling `token` once per sentence.
///
/// Never fails on content: HTML that cannot be scanned (an unterminated tag or
/// comment) is read as one plain paragraph.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = raw.len()))]
pub fn preprocess(
    raw: &str,
    format: InputFormat,
    pack: &LanguagePack,
    token: &CancellationToken,
) -> Result<StructuralModel, Cancelled> {
    let format = format.resolve(raw);
    let markup = match format {
        InputFormat::Html => markup::scan_html(raw).unwrap_or_else(|_| {
            tracing::debug!("malformed markup, reading input as a single paragraph");
            markup::single_paragraph(raw)
        }),
        InputFormat::Markdown => markup::scan_markdown(raw),
        InputFormat::Plain | InputFormat::Auto => markup::scan_plain(raw),
    };
    segment(markup, format, pack, token)
}

/// Split scanned blocks into sentences and tokens
fn segment(
    markup: markup::Markup,
    format: InputFormat,
    pack: &LanguagePack,
    token: &CancellationToken,
) -> Result<StructuralModel, Cancelled> {
    let mut blocks = markup.blocks;
    let mut sentences = Vec::new();
    for (index, block) in blocks.iter_mut().enumerate() {
        let first = sentences.len();
        let text = &markup.text[block.range.clone()];
        let heading = block.heading_level();
        let ranges = if heading.is_some() {
            vec![0..text.len()]
        } else {
            sentences::split_sentences(text, pack)
        };
        for range in ranges {
            token.check()?;
            let absolute = block.range.start + range.start..block.range.start + range.end;
            sentences.push(Sentence {
                tokens: tokenize(&markup.text[absolute.clone()], absolute.start),
                range: absolute,
                block: index,
                heading,
            });
        }
        block.sentences = first..sentences.len();
    }

    tracing::debug!(
        format = %format,
        blocks = blocks.len(),
        sentences = sentences.len(),
        "preprocessed"
    );
    Ok(StructuralModel {
        text: markup.text,
        blocks,
        sentences,
        links: markup.links,
        images: markup.images,
        format,
        offsets: markup.offsets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{for_locale, DEFAULT_PACK};

    fn parse(raw: &str, format: InputFormat) -> StructuralModel {
        StructuralModel::parse(raw, format, for_locale("en"))
    }

    #[test]
    fn detects_formats() {
        assert_eq!(detect_format("<p>Hello</p>"), InputFormat::Html);
        assert_eq!(detect_format("## Heading\n\ntext"), InputFormat::Markdown);
        assert_eq!(detect_format("Just some text."), InputFormat::Plain);
    }

    #[test]
    fn headings_are_single_sentences() {
        let model = parse("<h2>Why? Because. Yes</h2><p>One. Two.</p>", InputFormat::Auto);
        assert_eq!(model.sentences.len(), 3);
        assert_eq!(model.sentences[0].heading, Some(2));
        assert_eq!(model.sentence_text(0), "Why? Because. Yes");
        assert_eq!(model.blocks[1].sentences, 1..3);
    }

    #[test]
    fn offsets_map_back_to_raw_input() {
        let raw = "<p>Fish &amp; <b>chips</b> today.</p>";
        let model = parse(raw, InputFormat::Html);
        let start = model.text.find("chips").expect("present");
        let span = model.to_source_range(start..start + "chips".len());
        assert_eq!(&raw[span], "chips");
        let amp = model.text.find('&').expect("present");
        let span = model.to_source_range(amp..amp + 1);
        assert_eq!(&raw[span], "&amp;");
    }

    #[test]
    fn malformed_html_becomes_one_paragraph() {
        let model = parse("<p>Unclosed <a href=\"x", InputFormat::Html);
        assert_eq!(model.blocks.len(), 1);
        assert_eq!(model.blocks[0].kind, BlockKind::Paragraph);
        assert!(model.text.starts_with("<p>Unclosed"));
    }

    #[test]
    fn empty_input_has_no_blocks() {
        let model = parse("", InputFormat::Auto);
        assert!(model.blocks.is_empty());
        assert!(model.sentences.is_empty());
        assert_eq!(model.word_count(), 0);
    }

    #[test]
    fn cancelled_token_stops_preprocessing() {
        let token = CancellationToken::new();
        token.cancel();
        let result = preprocess("One. Two.", InputFormat::Plain, &DEFAULT_PACK, &token);
        assert_eq!(result.err(), Some(Cancelled));
    }

    /// Parts of a model that do not depend on the raw input it came from
    fn shape(model: &StructuralModel) -> (String, Vec<(BlockKind, Range<usize>, Range<usize>)>, Vec<Sentence>) {
        let blocks = model
            .blocks
            .iter()
            .map(|b| (b.kind, b.range.clone(), b.sentences.clone()))
            .collect();
        (model.text.clone(), blocks, model.sentences.clone())
    }

    #[test]
    fn reparse_keeps_leading_markers_as_text() {
        let first = parse("<p># Cats are great pets.</p><p>1. They purr.</p>", InputFormat::Auto);
        assert_eq!(first.format, InputFormat::Html);
        assert_eq!(first.text, "# Cats are great pets.\n\n1. They purr.");

        let second = first.reparse(for_locale("en"));
        assert_eq!(second.format, InputFormat::Plain);
        assert_eq!(
            second.blocks.iter().map(|b| b.kind).collect::<Vec<_>>(),
            vec![BlockKind::Paragraph, BlockKind::Paragraph]
        );
        assert_eq!(shape(&first), shape(&second));
    }

    #[test]
    fn reparse_keeps_headings_and_links() {
        let first = parse(
            "## Why? Because. Yes\n\n- One [cat](https://a.example). Two.",
            InputFormat::Auto,
        );
        let second = first.reparse(for_locale("en"));
        assert_eq!(second.blocks[0].kind, BlockKind::Heading(2));
        assert_eq!(second.blocks[1].kind, BlockKind::ListItem);
        assert_eq!(second.links, first.links);
        assert_eq!(shape(&first), shape(&second));
    }

    #[test]
    fn character_count_excludes_separators() {
        let model = parse("Ab.\n\nCd.", InputFormat::Plain);
        assert_eq!(model.text.len(), 8);
        assert_eq!(model.character_count(), 6);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn prose() -> impl Strategy<Value = String> {
            "[A-Za-z0-9 ,.!?'\\-\n]{0,200}"
        }

        /// Line starts that Markdown reads as structure
        fn marker() -> impl Strategy<Value = &'static str> {
            prop::sample::select(vec!["", "# ", "## ", "- ", "* ", "1. ", "> "])
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn sentences_tile_blocks_and_tokens_tile_sentences(raw in prose()) {
                let model = StructuralModel::parse(&raw, InputFormat::Plain, for_locale("en"));
                for block in &model.blocks {
                    let sentences = &model.sentences[block.sentences.clone()];
                    prop_assert!(!sentences.is_empty());
                    prop_assert_eq!(sentences[0].range.start, block.range.start);
                    prop_assert_eq!(sentences[sentences.len() - 1].range.end, block.range.end);
                    for pair in sentences.windows(2) {
                        prop_assert_eq!(pair[0].range.end, pair[1].range.start);
                    }
                }
                for sentence in &model.sentences {
                    let rebuilt: String = sentence
                        .tokens
                        .iter()
                        .map(|t| &model.text[t.start..t.end])
                        .collect();
                    prop_assert_eq!(rebuilt.as_str(), &model.text[sentence.range.clone()]);
                }
            }

            #[test]
            fn reprocessing_model_text_is_idempotent(raw in prose()) {
                let first = StructuralModel::parse(&raw, InputFormat::Plain, for_locale("en"));
                let second = StructuralModel::parse(&first.text, InputFormat::Plain, for_locale("en"));
                prop_assert_eq!(&first.text, &second.text);
                prop_assert_eq!(&first.sentences, &second.sentences);
            }

            #[test]
            fn reparsing_marked_up_input_is_idempotent(
                paragraphs in prop::collection::vec((marker(), prose()), 0..5),
                as_html in any::<bool>(),
            ) {
                let raw = if as_html {
                    paragraphs
                        .iter()
                        .map(|(m, p)| format!("<p>{}{}</p>", m, p))
                        .collect::<String>()
                } else {
                    paragraphs
                        .iter()
                        .map(|(m, p)| format!("{}{}", m, p))
                        .collect::<Vec<_>>()
                        .join("\n\n")
                };
                let first = StructuralModel::parse(&raw, InputFormat::Auto, for_locale("en"));
                let second = first.reparse(for_locale("en"));
                prop_assert_eq!(shape(&first), shape(&second));
                let third = second.reparse(for_locale("en"));
                prop_assert_eq!(shape(&second), shape(&third));
            }

            #[test]
            fn plain_offsets_point_at_identical_words(raw in prose()) {
                let model = StructuralModel::parse(&raw, InputFormat::Plain, &DEFAULT_PACK);
                for sentence in &model.sentences {
                    for word in sentence.words() {
                        let span = model.to_source_range(word.start..word.end);
                        prop_assert_eq!(&raw[span], &model.text[word.start..word.end]);
                    }
                }
            }
        }
    }
}
