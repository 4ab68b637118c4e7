//! Keyphrase forms and word-sequence matching

use crate::language::LanguagePack;
use crate::text::words_of;
use crate::Paper;

/// One way of writing the topic: the keyphrase itself or a synonym
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseForm {
    /// All normalized words, in order
    pub words: Vec<String>,
    /// Words that carry meaning (function words removed)
    pub content: Vec<String>,
}

impl PhraseForm {
    fn new(phrase: &str, pack: &LanguagePack) -> Self {
        let words = words_of(phrase.trim_matches(|c| c == '"' || c == '“' || c == '”'));
        let content = words
            .iter()
            .filter(|w| !pack.is_function_word(w))
            .cloned()
            .collect();
        Self { words, content }
    }

    /// Words a text must contain to reflect this form.
    ///
    /// A form made only of function words falls back to all its words.
    pub fn required(&self) -> &[String] {
        if self.content.is_empty() {
            &self.words
        } else {
            &self.content
        }
    }

    /// Whether every required word occurs somewhere in `words`
    pub fn is_reflected_in(&self, words: &[String]) -> bool {
        !self.words.is_empty() && self.required().iter().all(|r| words.contains(r))
    }
}

/// The keyphrase and its synonyms.
///
/// A keyphrase without any words (punctuation only, say) counts as missing, and
/// its synonyms are dropped with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyphraseForms {
    keyphrase: Option<PhraseForm>,
    synonyms: Vec<PhraseForm>,
}

impl KeyphraseForms {
    pub fn from_paper(paper: &Paper, pack: &LanguagePack) -> Self {
        if !paper.has_keyphrase() {
            return Self::default();
        }
        let keyphrase = PhraseForm::new(paper.keyphrase(), pack);
        if keyphrase.words.is_empty() {
            return Self::default();
        }
        let synonyms = paper
            .synonyms()
            .iter()
            .map(|phrase| PhraseForm::new(phrase, pack))
            .filter(|form| !form.words.is_empty())
            .collect();
        Self {
            keyphrase: Some(keyphrase),
            synonyms,
        }
    }

    /// The keyphrase form, if the paper has a keyphrase with words in it
    pub fn keyphrase(&self) -> Option<&PhraseForm> {
        self.keyphrase.as_ref()
    }

    pub fn synonyms(&self) -> &[PhraseForm] {
        &self.synonyms
    }

    /// The keyphrase first, then its synonyms
    pub fn forms(&self) -> impl Iterator<Item = &PhraseForm> {
        self.keyphrase.iter().chain(&self.synonyms)
    }

    pub fn is_empty(&self) -> bool {
        self.keyphrase.is_none()
    }

    /// Whether any form is reflected in `words`
    pub fn is_reflected_in(&self, words: &[String]) -> bool {
        self.forms().any(|form| form.is_reflected_in(words))
    }

    /// Non-overlapping occurrences of any form in a word sequence, as inclusive
    /// word-index spans.
    ///
    /// Scans left to right; at each position the longest form that matches wins,
    /// and scanning resumes after it. An occurrence of "search engine optimization"
    /// is therefore counted once even if "optimization" is also a synonym.
    pub fn find_in(&self, words: &[String]) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let longest = self
                .forms()
                .filter(|form| words[i..].starts_with(&form.words))
                .map(|form| form.words.len())
                .max();
            match longest {
                Some(len) => {
                    spans.push((i, i + len - 1));
                    i += len;
                }
                None => i += 1,
            }
        }
        spans
    }
}
