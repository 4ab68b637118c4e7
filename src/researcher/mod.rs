//! Memoized research over one analysis pass.
//!
//! The [`Researcher`] owns the structural model of a paper and answers typed
//! queries about it. Each query is computed at most once per pass and cached in a
//! [`OnceCell`]; a new pass builds a new researcher, so nothing leaks between
//! passes. Because of the cells the researcher is `!Sync` and stays on the thread
//! that runs its pass.

pub mod keyphrase;

pub use keyphrase::{KeyphraseForms, PhraseForm};

use crate::analyzer::CancellationToken;
use crate::error::Cancelled;
use crate::language::LanguagePack;
use crate::text::{BlockKind, StructuralModel};
use crate::{Match, MatchKind, Paper};
use std::cell::{Cell, OnceCell};
use std::collections::HashSet;
use std::ops::Range;
use url::Url;

/// Typed research queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Research {
    SentenceProfiles,
    WordCount,
    SentenceCount,
    BodySentences,
    KeyphraseForms,
    KeyphraseMatches,
    SentenceLengths,
    Paragraphs,
    Headings,
    SubheadingSections,
    LinkStats,
    ImageStats,
    SentenceBeginnings,
    PassiveSentences,
    TransitionSentences,
    Syllables,
    Introduction,
    DescriptionKeyphrase,
    TitleKeyphrase,
    SlugKeyphrase,
}

impl Research {
    const COUNT: usize = 20;

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Research {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Per-sentence linguistic facts, computed once while priming
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentenceProfile {
    /// Normalized words
    pub words: Vec<String>,
    /// Byte range of each word in the model text
    pub spans: Vec<Range<usize>>,
    /// Syllables over all words (0 when the pack cannot count them)
    pub syllables: usize,
    /// Inclusive word span of a passive verb group
    pub passive: Option<(usize, usize)>,
    /// Inclusive word span of the first transition word or phrase
    pub transition: Option<(usize, usize)>,
}

impl SentenceProfile {
    /// Model-text range covering words `first..=last`
    pub fn word_range(&self, first: usize, last: usize) -> Option<Range<usize>> {
        Some(self.spans.get(first)?.start..self.spans.get(last)?.end)
    }
}

/// Word count of one body sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceLength {
    pub sentence: usize,
    pub words: usize,
}

/// Word count of one paragraph or list item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphLength {
    pub block: usize,
    pub words: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub block: usize,
    pub level: u8,
    pub text: String,
    /// Whether the heading reflects the keyphrase or a synonym
    pub has_keyphrase: bool,
}

/// Body text between two subheadings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Block of the subheading that opens the section
    pub heading: Option<usize>,
    /// Model-text range to highlight for the section
    pub highlight: Range<usize>,
    pub words: usize,
}

impl Section {
    fn is_kept(&self) -> bool {
        self.words > 0 || self.heading.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    pub has_subheadings: bool,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkCounts {
    pub total: usize,
    pub nofollow: usize,
}

impl LinkCounts {
    pub fn followed(&self) -> usize {
        self.total - self.nofollow
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    pub internal: LinkCounts,
    pub external: LinkCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageStats {
    pub count: usize,
    /// Images whose alt text reflects the keyphrase or a synonym
    pub with_keyphrase: usize,
}

/// Consecutive body sentences that open with the same word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeginningRun {
    /// The opening word, combined with the next word for first-word exceptions
    pub beginning: String,
    pub sentences: Vec<usize>,
}

/// Where the keyphrase shows up in the first paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Introduction {
    pub block: usize,
    /// Some sentence reflects the keyphrase on its own
    pub in_one_sentence: bool,
    /// The paragraph as a whole reflects it
    pub in_paragraph: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitlePlacement {
    /// The exact keyphrase opens the title
    AtStart,
    /// The exact keyphrase appears later in the title
    Elsewhere,
    /// Every content word appears, in some order
    AllWords,
    Missing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlugCoverage {
    pub matched: usize,
    pub total: usize,
}

/// Memoized query facade over one paper and its structural model
pub struct Researcher<'a> {
    paper: &'a Paper,
    model: StructuralModel,
    pack: &'static LanguagePack,
    counters: [Cell<usize>; Research::COUNT],
    profiles: OnceCell<Vec<SentenceProfile>>,
    word_count: OnceCell<usize>,
    sentence_count: OnceCell<usize>,
    body_sentences: OnceCell<Vec<usize>>,
    keyphrase: OnceCell<KeyphraseForms>,
    keyphrase_matches: OnceCell<Vec<Match>>,
    sentence_lengths: OnceCell<Vec<SentenceLength>>,
    paragraphs: OnceCell<Vec<ParagraphLength>>,
    headings: OnceCell<Vec<Heading>>,
    sections: OnceCell<Sections>,
    link_stats: OnceCell<LinkStats>,
    image_stats: OnceCell<ImageStats>,
    beginnings: OnceCell<Vec<BeginningRun>>,
    passive: OnceCell<Vec<usize>>,
    transitions: OnceCell<Vec<usize>>,
    syllables: OnceCell<Option<usize>>,
    introduction: OnceCell<Option<Introduction>>,
    description: OnceCell<usize>,
    title: OnceCell<TitlePlacement>,
    slug: OnceCell<SlugCoverage>,
}

impl<'a> Researcher<'a> {
    pub fn new(paper: &'a Paper, model: StructuralModel, pack: &'static LanguagePack) -> Self {
        Self {
            paper,
            model,
            pack,
            counters: Default::default(),
            profiles: OnceCell::new(),
            word_count: OnceCell::new(),
            sentence_count: OnceCell::new(),
            body_sentences: OnceCell::new(),
            keyphrase: OnceCell::new(),
            keyphrase_matches: OnceCell::new(),
            sentence_lengths: OnceCell::new(),
            paragraphs: OnceCell::new(),
            headings: OnceCell::new(),
            sections: OnceCell::new(),
            link_stats: OnceCell::new(),
            image_stats: OnceCell::new(),
            beginnings: OnceCell::new(),
            passive: OnceCell::new(),
            transitions: OnceCell::new(),
            syllables: OnceCell::new(),
            introduction: OnceCell::new(),
            description: OnceCell::new(),
            title: OnceCell::new(),
            slug: OnceCell::new(),
        }
    }

    pub fn paper(&self) -> &Paper {
        self.paper
    }

    pub fn model(&self) -> &StructuralModel {
        &self.model
    }

    pub fn pack(&self) -> &'static LanguagePack {
        self.pack
    }

    /// How many times a query was computed in this pass (0 or 1)
    pub fn computations(&self, research: Research) -> usize {
        self.counters[research.index()].get()
    }

    fn record(&self, research: Research) {
        let counter = &self.counters[research.index()];
        counter.set(counter.get() + 1);
        tracing::trace!(query = %research, "research computed");
    }

    fn memo<'s, T>(
        &'s self,
        research: Research,
        cell: &'s OnceCell<T>,
        compute: impl FnOnce() -> T,
    ) -> &'s T {
        cell.get_or_init(|| {
            self.record(research);
            compute()
        })
    }

    /// Compute the per-sentence profiles, polling `token` once per sentence
    #[tracing::instrument(level = "debug", skip_all, fields(sentences = self.model.sentences.len()))]
    pub fn prime(&self, token: &CancellationToken) -> Result<(), Cancelled> {
        if self.profiles.get().is_some() {
            return Ok(());
        }
        let mut profiles = Vec::with_capacity(self.model.sentences.len());
        for index in 0..self.model.sentences.len() {
            token.check()?;
            profiles.push(self.profile(index));
        }
        self.record(Research::SentenceProfiles);
        let _ = self.profiles.set(profiles);
        Ok(())
    }

    fn profile(&self, index: usize) -> SentenceProfile {
        let sentence = &self.model.sentences[index];
        let mut profile = SentenceProfile::default();
        for token in sentence.words() {
            let word = token.as_str(&self.model.text);
            profile.syllables += self.pack.count_syllables(word).unwrap_or(0);
            profile.words.push(crate::text::normalize_word(word));
            profile.spans.push(token.start..token.end);
        }
        if !sentence.is_heading() {
            profile.passive = self.pack.passive.and_then(|detect| detect(&profile.words));
            profile.transition = self.pack.find_transition(&profile.words);
        }
        profile
    }

    pub fn profiles(&self) -> &[SentenceProfile] {
        self.memo(Research::SentenceProfiles, &self.profiles, || {
            (0..self.model.sentences.len())
                .map(|i| self.profile(i))
                .collect()
        })
        .as_slice()
    }

    pub fn word_count(&self) -> usize {
        *self.memo(Research::WordCount, &self.word_count, || {
            self.model.word_count()
        })
    }

    pub fn sentence_count(&self) -> usize {
        *self.memo(Research::SentenceCount, &self.sentence_count, || {
            self.model
                .sentences
                .iter()
                .filter(|s| s.word_count() > 0)
                .count()
        })
    }

    /// Indices of non-heading sentences that contain at least one word
    pub fn body_sentences(&self) -> &[usize] {
        self.memo(Research::BodySentences, &self.body_sentences, || {
            let profiles = self.profiles();
            self.model
                .sentences
                .iter()
                .enumerate()
                .filter(|(i, s)| !s.is_heading() && !profiles[*i].words.is_empty())
                .map(|(i, _)| i)
                .collect()
        })
        .as_slice()
    }

    pub fn keyphrase(&self) -> &KeyphraseForms {
        self.memo(Research::KeyphraseForms, &self.keyphrase, || {
            KeyphraseForms::from_paper(self.paper, self.pack)
        })
    }

    /// Non-overlapping keyphrase and synonym occurrences across the text
    pub fn keyphrase_matches(&self) -> &[Match] {
        self.memo(Research::KeyphraseMatches, &self.keyphrase_matches, || {
            let forms = self.keyphrase();
            if forms.is_empty() {
                return Vec::new();
            }
            let mut matches = Vec::new();
            for profile in self.profiles() {
                for (first, last) in forms.find_in(&profile.words) {
                    if let Some(range) = profile.word_range(first, last) {
                        matches.push(self.highlight(MatchKind::Keyphrase, range));
                    }
                }
            }
            matches
        })
        .as_slice()
    }

    pub fn sentence_lengths(&self) -> &[SentenceLength] {
        self.memo(Research::SentenceLengths, &self.sentence_lengths, || {
            let profiles = self.profiles();
            self.body_sentences()
                .iter()
                .map(|&sentence| SentenceLength {
                    sentence,
                    words: profiles[sentence].words.len(),
                })
                .collect()
        })
        .as_slice()
    }

    /// Paragraphs and list items with words, in document order
    pub fn paragraphs(&self) -> &[ParagraphLength] {
        self.memo(Research::Paragraphs, &self.paragraphs, || {
            self.model
                .blocks
                .iter()
                .enumerate()
                .filter(|(_, b)| matches!(b.kind, BlockKind::Paragraph | BlockKind::ListItem))
                .map(|(block, b)| ParagraphLength {
                    block,
                    words: self.block_words(b.sentences.clone()),
                })
                .filter(|p| p.words > 0)
                .collect()
        })
        .as_slice()
    }

    fn block_words(&self, sentences: Range<usize>) -> usize {
        let profiles = self.profiles();
        sentences.map(|i| profiles[i].words.len()).sum()
    }

    pub fn headings(&self) -> &[Heading] {
        self.memo(Research::Headings, &self.headings, || {
            let profiles = self.profiles();
            let forms = self.keyphrase();
            self.model
                .blocks
                .iter()
                .enumerate()
                .filter_map(|(block, b)| {
                    let level = b.heading_level()?;
                    let words: Vec<String> = b
                        .sentences
                        .clone()
                        .flat_map(|i| profiles[i].words.iter().cloned())
                        .collect();
                    Some(Heading {
                        block,
                        level,
                        text: self.model.block_text(block).to_string(),
                        has_keyphrase: forms.is_reflected_in(&words),
                    })
                })
                .collect()
        })
        .as_slice()
    }

    /// Body text split at H2-H6 subheadings
    pub fn subheading_sections(&self) -> &Sections {
        self.memo(Research::SubheadingSections, &self.sections, || {
            let mut result = Sections::default();
            let mut current: Option<Section> = None;
            for (index, block) in self.model.blocks.iter().enumerate() {
                match block.heading_level() {
                    Some(level) if level >= 2 => {
                        result.has_subheadings = true;
                        result.sections.extend(current.take().filter(Section::is_kept));
                        current = Some(Section {
                            heading: Some(index),
                            highlight: block.range.clone(),
                            words: 0,
                        });
                    }
                    Some(_) => {}
                    None => {
                        let words = self.block_words(block.sentences.clone());
                        let section = current.get_or_insert_with(|| Section {
                            heading: None,
                            highlight: block.range.clone(),
                            words: 0,
                        });
                        section.words += words;
                    }
                }
            }
            result.sections.extend(current.filter(Section::is_kept));
            result
        })
    }

    pub fn link_stats(&self) -> &LinkStats {
        self.memo(Research::LinkStats, &self.link_stats, || {
            let site = Url::parse(self.paper.url()).ok();
            let mut stats = LinkStats::default();
            for link in &self.model.links {
                let counts = match classify_link(&link.href, site.as_ref()) {
                    Some(LinkTarget::Internal) => &mut stats.internal,
                    Some(LinkTarget::External) => &mut stats.external,
                    None => continue,
                };
                counts.total += 1;
                if link.nofollow {
                    counts.nofollow += 1;
                }
            }
            stats
        })
    }

    pub fn image_stats(&self) -> &ImageStats {
        self.memo(Research::ImageStats, &self.image_stats, || {
            let forms = self.keyphrase();
            ImageStats {
                count: self.model.images.len(),
                with_keyphrase: self
                    .model
                    .images
                    .iter()
                    .filter(|image| forms.is_reflected_in(&crate::text::words_of(&image.alt)))
                    .count(),
            }
        })
    }

    /// Runs of consecutive body sentences with the same beginning, per section
    pub fn sentence_beginnings(&self) -> &[BeginningRun] {
        self.memo(Research::SentenceBeginnings, &self.beginnings, || {
            let profiles = self.profiles();
            let mut runs: Vec<BeginningRun> = Vec::new();
            let mut open = false;
            for (index, sentence) in self.model.sentences.iter().enumerate() {
                if sentence.is_heading() {
                    open = false;
                    continue;
                }
                let Some(beginning) = self.beginning(&profiles[index]) else {
                    continue;
                };
                match runs.last_mut() {
                    Some(run) if open && run.beginning == beginning => run.sentences.push(index),
                    _ => runs.push(BeginningRun {
                        beginning,
                        sentences: vec![index],
                    }),
                }
                open = true;
            }
            runs
        })
        .as_slice()
    }

    fn beginning(&self, profile: &SentenceProfile) -> Option<String> {
        let first = profile.words.first()?;
        match profile.words.get(1) {
            Some(next) if self.pack.is_first_word_exception(first) => {
                Some(format!("{} {}", first, next))
            }
            _ => Some(first.clone()),
        }
    }

    /// Body sentences containing a passive verb group
    pub fn passive_sentences(&self) -> &[usize] {
        self.memo(Research::PassiveSentences, &self.passive, || {
            let profiles = self.profiles();
            self.body_sentences()
                .iter()
                .copied()
                .filter(|&i| profiles[i].passive.is_some())
                .collect()
        })
        .as_slice()
    }

    /// Body sentences containing a transition word or phrase
    pub fn transition_sentences(&self) -> &[usize] {
        self.memo(Research::TransitionSentences, &self.transitions, || {
            let profiles = self.profiles();
            self.body_sentences()
                .iter()
                .copied()
                .filter(|&i| profiles[i].transition.is_some())
                .collect()
        })
        .as_slice()
    }

    /// Syllables in the body sentences, if the pack counts syllables
    pub fn syllable_count(&self) -> Option<usize> {
        *self.memo(Research::Syllables, &self.syllables, || {
            self.pack.syllables.as_ref()?;
            let profiles = self.profiles();
            Some(self.body_sentences().iter().map(|&i| profiles[i].syllables).sum())
        })
    }

    /// Body words (headings excluded)
    pub fn body_word_count(&self) -> usize {
        self.sentence_lengths().iter().map(|s| s.words).sum()
    }

    pub fn introduction(&self) -> Option<Introduction> {
        *self.memo(Research::Introduction, &self.introduction, || {
            let forms = self.keyphrase();
            let first = self
                .paragraphs()
                .iter()
                .find(|p| self.model.blocks[p.block].kind == BlockKind::Paragraph)?;
            let profiles = self.profiles();
            let sentences = self.model.blocks[first.block].sentences.clone();
            let in_one_sentence = sentences
                .clone()
                .any(|i| forms.is_reflected_in(&profiles[i].words));
            let words: Vec<String> = sentences
                .flat_map(|i| profiles[i].words.iter().cloned())
                .collect();
            Some(Introduction {
                block: first.block,
                in_one_sentence,
                in_paragraph: forms.is_reflected_in(&words),
            })
        })
    }

    /// Meta description sentences that reflect the keyphrase
    pub fn description_keyphrase(&self) -> usize {
        *self.memo(Research::DescriptionKeyphrase, &self.description, || {
            let forms = self.keyphrase();
            let description = StructuralModel::parse(
                self.paper.description(),
                crate::InputFormat::Plain,
                self.pack,
            );
            (0..description.sentences.len())
                .filter(|&i| {
                    forms.is_reflected_in(&crate::text::words_of(description.sentence_text(i)))
                })
                .count()
        })
    }

    pub fn title_keyphrase(&self) -> TitlePlacement {
        *self.memo(Research::TitleKeyphrase, &self.title, || {
            let Some(keyphrase) = self.keyphrase().keyphrase() else {
                return TitlePlacement::Missing;
            };
            let title = crate::text::words_of(self.paper.title());
            if title.starts_with(&keyphrase.words) {
                TitlePlacement::AtStart
            } else if title
                .windows(keyphrase.words.len())
                .any(|w| w == keyphrase.words.as_slice())
            {
                TitlePlacement::Elsewhere
            } else if keyphrase.is_reflected_in(&title) {
                TitlePlacement::AllWords
            } else {
                TitlePlacement::Missing
            }
        })
    }

    /// Keyphrase words (stop words removed) found among the slug's words
    pub fn slug_keyphrase(&self) -> SlugCoverage {
        *self.memo(Research::SlugKeyphrase, &self.slug, || {
            let Some(keyphrase) = self.keyphrase().keyphrase() else {
                return SlugCoverage::default();
            };
            let slug: Vec<String> = self
                .paper
                .slug()
                .split(['-', '_', '/', ' '])
                .filter(|part| !part.is_empty())
                .map(crate::text::normalize_word)
                .collect();
            let mut wanted: Vec<&String> = keyphrase
                .words
                .iter()
                .filter(|w| !self.pack.is_stop_word(w))
                .collect();
            if wanted.is_empty() {
                wanted = keyphrase.words.iter().collect();
            }
            let mut seen = HashSet::new();
            wanted.retain(|w| seen.insert(*w));
            SlugCoverage {
                matched: wanted.iter().filter(|w| slug.contains(w)).count(),
                total: wanted.len(),
            }
        })
    }

    /// A highlight of a model-text range, mapped back to the raw input
    pub fn highlight(&self, kind: MatchKind, range: Range<usize>) -> Match {
        let source = self.model.to_source_range(range.clone());
        Match {
            kind,
            text: self.model.text[range.clone()].to_string(),
            start: range.start,
            end: range.end,
            source_start: source.start,
            source_end: source.end,
        }
    }

    /// Highlight the words of a sentence, without trailing whitespace
    pub fn highlight_sentence(&self, kind: MatchKind, index: usize) -> Option<Match> {
        let sentence = self.model.sentences.get(index)?;
        let text = &self.model.text[sentence.range.clone()];
        let end = sentence.range.start + text.trim_end().len();
        if end == sentence.range.start {
            return None;
        }
        Some(self.highlight(kind, sentence.range.start..end))
    }
}

enum LinkTarget {
    Internal,
    External,
}

/// Classify an href against the site URL. Fragments, mail and script links are
/// neither internal nor external.
fn classify_link(href: &str, site: Option<&Url>) -> Option<LinkTarget> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    match Url::parse(href) {
        Ok(target) => {
            if !matches!(target.scheme(), "http" | "https") {
                return None;
            }
            let same_host = site
                .and_then(|s| s.host_str())
                .zip(target.host_str())
                .is_some_and(|(a, b)| {
                    a.trim_start_matches("www.").eq_ignore_ascii_case(b.trim_start_matches("www."))
                });
            Some(if same_host {
                LinkTarget::Internal
            } else {
                LinkTarget::External
            })
        }
        // Protocol-relative links carry a host
        Err(_) if href.starts_with("//") => {
            let target = Url::parse(&format!("https:{}", href)).ok()?;
            let same_host = site
                .and_then(|s| s.host_str())
                .zip(target.host_str())
                .is_some_and(|(a, b)| a.eq_ignore_ascii_case(b));
            Some(if same_host {
                LinkTarget::Internal
            } else {
                LinkTarget::External
            })
        }
        Err(_) => Some(LinkTarget::Internal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{for_locale, DEFAULT_PACK};
    use crate::InputFormat;

    fn researcher(paper: &Paper) -> Researcher<'_> {
        let pack = for_locale("en");
        let model = StructuralModel::parse(paper.text(), paper.format(), pack);
        Researcher::new(paper, model, pack)
    }

    #[test]
    fn queries_are_computed_once_per_pass() {
        let paper = Paper::new("Cats are great pets. Cats are loyal.").with_keyphrase("cats");
        let r = researcher(&paper);
        assert_eq!(r.computations(Research::KeyphraseMatches), 0);
        assert_eq!(r.keyphrase_matches().len(), 2);
        assert_eq!(r.keyphrase_matches().len(), 2);
        assert_eq!(r.computations(Research::KeyphraseMatches), 1);
        assert_eq!(r.computations(Research::KeyphraseForms), 1);

        let fresh = researcher(&paper);
        assert_eq!(fresh.computations(Research::KeyphraseMatches), 0);
    }

    #[test]
    fn list_queries_are_computed_once_per_pass() {
        let paper = Paper::new("## Cat care\n\nThe cat was fed early. However, it slept. The cat purred loudly.")
            .with_keyphrase("cat");
        let r = researcher(&paper);
        assert!(std::ptr::eq(r.profiles(), r.profiles()));
        assert!(std::ptr::eq(r.body_sentences(), r.body_sentences()));
        assert!(std::ptr::eq(r.keyphrase_matches(), r.keyphrase_matches()));
        assert!(std::ptr::eq(r.sentence_lengths(), r.sentence_lengths()));
        assert!(std::ptr::eq(r.paragraphs(), r.paragraphs()));
        assert!(std::ptr::eq(r.headings(), r.headings()));
        assert!(std::ptr::eq(r.sentence_beginnings(), r.sentence_beginnings()));
        assert!(std::ptr::eq(r.passive_sentences(), r.passive_sentences()));
        assert!(std::ptr::eq(r.transition_sentences(), r.transition_sentences()));
        for research in [
            Research::SentenceProfiles,
            Research::BodySentences,
            Research::KeyphraseMatches,
            Research::SentenceLengths,
            Research::Paragraphs,
            Research::Headings,
            Research::SentenceBeginnings,
            Research::PassiveSentences,
            Research::TransitionSentences,
        ] {
            assert_eq!(r.computations(research), 1, "{}", research);
        }
        assert_eq!(r.headings().len(), 1);
        assert_eq!(r.body_sentences().len(), 3);
        assert_eq!(r.transition_sentences().len(), 1);
    }

    #[test]
    fn prime_builds_profiles_once() {
        let paper = Paper::new("One sentence here. Another one.");
        let r = researcher(&paper);
        r.prime(&CancellationToken::new()).expect("not cancelled");
        r.prime(&CancellationToken::new()).expect("not cancelled");
        assert_eq!(r.profiles().len(), 2);
        assert_eq!(r.computations(Research::SentenceProfiles), 1);
    }

    #[test]
    fn prime_honors_cancellation() {
        let paper = Paper::new("One sentence here. Another one.");
        let r = researcher(&paper);
        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(r.prime(&token), Err(Cancelled));
    }

    #[test]
    fn keyphrase_matches_carry_offsets() {
        let paper = Paper::new("Good search engine optimization matters.")
            .with_keyphrase("SEO")
            .with_synonyms(["search engine optimization"]);
        let r = researcher(&paper);
        let matches = r.keyphrase_matches();
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.text, "search engine optimization");
        assert_eq!(&r.model().text[m.start..m.end], m.text);
        assert_eq!(&paper.text()[m.source_start..m.source_end], m.text);
    }

    #[test]
    fn classifies_links_against_site_url() {
        let paper = Paper::new(
            r#"<p>See <a href="/about">us</a>, <a href="https://www.example.com/x">this</a>, <a href="https://other.org" rel="nofollow">that</a> and <a href="mailto:a@b.c">mail</a>.</p>"#,
        )
        .with_url("https://example.com/post")
        .with_format(InputFormat::Html);
        let stats = *researcher(&paper).link_stats();
        assert_eq!(stats.internal.total, 2);
        assert_eq!(stats.external.total, 1);
        assert_eq!(stats.external.nofollow, 1);
        assert_eq!(stats.external.followed(), 0);
    }

    #[test]
    fn sections_split_at_subheadings() {
        let paper = Paper::new("Intro words here.\n\n## First\n\nOne two three.\n\n## Second\n\nFour five.")
            .with_format(InputFormat::Markdown);
        let r = researcher(&paper);
        let sections = r.subheading_sections();
        assert!(sections.has_subheadings);
        let words: Vec<usize> = sections.sections.iter().map(|s| s.words).collect();
        assert_eq!(words, vec![3, 3, 2]);
        assert_eq!(sections.sections[0].heading, None);
    }

    #[test]
    fn repeated_beginnings_form_runs() {
        let paper = Paper::new("The cat ran. The cat sat. The cat slept. A dog barked.");
        let runs = researcher(&paper).sentence_beginnings().to_vec();
        assert_eq!(runs[0].beginning, "the cat");
        assert_eq!(runs[0].sentences.len(), 3);
        assert_eq!(runs[1].beginning, "a dog");
    }

    #[test]
    fn title_placement() {
        let base = Paper::new("x").with_keyphrase("cat food");
        let place = |title: &str| {
            let paper = base.clone().with_title(title);
            researcher(&paper).title_keyphrase()
        };
        assert_eq!(place("Cat food for everyone"), TitlePlacement::AtStart);
        assert_eq!(place("The best cat food"), TitlePlacement::Elsewhere);
        assert_eq!(place("Food your cat loves"), TitlePlacement::AllWords);
        assert_eq!(place("Dog toys"), TitlePlacement::Missing);
    }

    #[test]
    fn slug_coverage_ignores_stop_words() {
        let paper = Paper::new("x").with_keyphrase("the best cat food").with_slug("best-cat-toys");
        let coverage = researcher(&paper).slug_keyphrase();
        assert_eq!(coverage, SlugCoverage { matched: 2, total: 3 });
    }

    #[test]
    fn slug_coverage_counts_repeated_words_once() {
        let paper = Paper::new("x").with_keyphrase("cat dog cat").with_slug("cat-toys");
        let coverage = researcher(&paper).slug_keyphrase();
        assert_eq!(coverage, SlugCoverage { matched: 1, total: 2 });
    }

    #[test]
    fn introduction_checks_first_paragraph() {
        let paper = Paper::new("Cat food matters. We love it.\n\nLater text.").with_keyphrase("cat food");
        let intro = researcher(&paper).introduction().expect("paragraph");
        assert!(intro.in_one_sentence);
        assert!(intro.in_paragraph);
    }

    #[test]
    fn default_pack_has_no_syllables() {
        let paper = Paper::new("Some words.");
        let model = StructuralModel::parse(paper.text(), InputFormat::Plain, &DEFAULT_PACK);
        let r = Researcher::new(&paper, model, &DEFAULT_PACK);
        assert_eq!(r.syllable_count(), None);
        assert!(r.passive_sentences().is_empty());
    }
}
