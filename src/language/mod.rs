//! Language packs: per-language word lists and linguistic predicates.
//!
//! A pack is plain static data plus a few function pointers, so resolving one is a
//! pure lookup and a single pack is shared by every concurrent analysis pass.
//! Locales without a dedicated pack resolve to [`DEFAULT_PACK`], which keeps the
//! language-agnostic assessments (lengths, keyphrase placement, links) and drops
//! the ones that need linguistic knowledge.

mod english;
mod german;
mod spanish;
pub mod syllables;

pub use syllables::SyllableRules;

/// Detects a passive verb group in a sentence given its lowercased words.
/// Returns the inclusive word-index span of the group.
pub type PassiveDetector = fn(&[String]) -> Option<(usize, usize)>;

/// Reading-ease formula family used by a language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadabilityFormula {
    /// Flesch (1948): 206.835 - 1.015 * ASL - 84.6 * ASW
    Flesch,
    /// Amstad (1978), German adaptation: 180 - ASL - 58.5 * ASW
    Amstad,
    /// Fernández-Huerta (1959), Spanish: 206.84 - 1.02 * ASL - 60 * ASW
    FernandezHuerta,
}

impl ReadabilityFormula {
    /// Raw reading ease, clamped to 0-100 and rounded to one decimal
    pub fn score(self, words: usize, sentences: usize, syllables: usize) -> f64 {
        if words == 0 || sentences == 0 {
            return 0.0;
        }
        let asl = words as f64 / sentences as f64;
        let asw = syllables as f64 / words as f64;
        let raw = match self {
            ReadabilityFormula::Flesch => 206.835 - 1.015 * asl - 84.6 * asw,
            ReadabilityFormula::Amstad => 180.0 - asl - 58.5 * asw,
            ReadabilityFormula::FernandezHuerta => 206.84 - 1.02 * asl - 60.0 * asw,
        };
        (raw.clamp(0.0, 100.0) * 10.0).round() / 10.0
    }
}

/// Static linguistic knowledge for one language
#[derive(Debug)]
pub struct LanguagePack {
    /// Language subtag, e.g. "en"
    pub code: &'static str,
    pub name: &'static str,
    /// Lowercase abbreviations without their final period ("dr", "e.g")
    pub abbreviations: &'static [&'static str],
    /// Articles, pronouns, prepositions, auxiliaries... excluded from keyphrase content words
    pub function_words: &'static [&'static str],
    /// Words ignored when matching the keyphrase against a slug
    pub stop_words: &'static [&'static str],
    /// Transition words and phrases (multi-word entries are space separated)
    pub transition_words: &'static [&'static str],
    /// Sentence openers that are combined with the next word when comparing beginnings
    pub first_word_exceptions: &'static [&'static str],
    /// Words per sentence above which a sentence counts as long
    pub sentence_length_limit: usize,
    pub syllables: Option<SyllableRules>,
    pub readability: Option<ReadabilityFormula>,
    pub passive: Option<PassiveDetector>,
}

impl LanguagePack {
    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(&word) || TITLE_ABBREVIATIONS.contains(&word)
    }

    pub fn is_function_word(&self, word: &str) -> bool {
        self.function_words.contains(&word)
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word)
    }

    pub fn is_first_word_exception(&self, word: &str) -> bool {
        self.first_word_exceptions.contains(&word)
    }

    /// Syllables in a word, or `None` when the pack has no syllable rules
    pub fn count_syllables(&self, word: &str) -> Option<usize> {
        self.syllables.as_ref().map(|rules| rules.count(word))
    }

    /// Whether this is the locale-agnostic fallback
    pub fn is_default(&self) -> bool {
        std::ptr::eq(self, &DEFAULT_PACK)
    }

    /// Find the first transition word or phrase in a sentence's lowercased words.
    /// Returns the inclusive word-index span.
    pub fn find_transition(&self, words: &[String]) -> Option<(usize, usize)> {
        for (i, word) in words.iter().enumerate() {
            for entry in self.transition_words {
                let mut parts = entry.split(' ');
                let Some(first) = parts.next() else { continue };
                if first != word {
                    continue;
                }
                let mut end = i;
                let mut matched = true;
                for part in parts {
                    end += 1;
                    if words.get(end).map(String::as_str) != Some(part) {
                        matched = false;
                        break;
                    }
                }
                if matched {
                    return Some((i, end));
                }
            }
        }
        None
    }
}

/// Honorifics that never end a sentence in any Latin-script language
const TITLE_ABBREVIATIONS: &[&str] = &["mr", "mrs", "ms", "dr", "prof", "st", "vs"];

/// Locale-agnostic fallback: title abbreviations only, no syllables, no passive detection
pub static DEFAULT_PACK: LanguagePack = LanguagePack {
    code: "default",
    name: "Default",
    abbreviations: TITLE_ABBREVIATIONS,
    function_words: &[],
    stop_words: &[],
    transition_words: &[],
    first_word_exceptions: &[],
    sentence_length_limit: 20,
    syllables: None,
    readability: None,
    passive: None,
};

/// Language subtag of a locale string: "en_US", "en-GB" and "EN" all give "en"
pub fn language_subtag(locale: &str) -> String {
    locale
        .trim()
        .split(['_', '-'])
        .next()
        .unwrap_or("")
        .to_lowercase()
}

/// Resolve the pack for a locale. Unknown locales get [`DEFAULT_PACK`].
pub fn for_locale(locale: &str) -> &'static LanguagePack {
    match language_subtag(locale).as_str() {
        "en" => &english::PACK,
        "de" => &german::PACK,
        "es" => &spanish::PACK,
        _ => &DEFAULT_PACK,
    }
}

/// Language subtags that have a dedicated pack
pub fn supported_languages() -> &'static [&'static str] {
    &["en", "de", "es"]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(|w| w.to_lowercase()).collect()
    }

    #[test]
    fn resolves_by_language_subtag() {
        assert_eq!(for_locale("en_US").code, "en");
        assert_eq!(for_locale("en-GB").code, "en");
        assert_eq!(for_locale("EN").code, "en");
        assert_eq!(for_locale("de_DE").code, "de");
        assert_eq!(for_locale("es").code, "es");
    }

    #[test]
    fn unknown_locale_falls_back_to_default() {
        let pack = for_locale("xx-YY");
        assert!(pack.is_default());
        assert!(pack.passive.is_none());
        assert!(pack.count_syllables("hello").is_none());
        assert!(for_locale("").is_default());
    }

    #[test]
    fn finds_single_and_multi_word_transitions() {
        let pack = for_locale("en");
        assert_eq!(
            pack.find_transition(&words("however the cat slept")),
            Some((0, 0))
        );
        assert_eq!(
            pack.find_transition(&words("the cat slept for example all day")),
            Some((3, 4))
        );
        assert_eq!(pack.find_transition(&words("the cat slept")), None);
    }

    #[test]
    fn flesch_scores_are_clamped_and_rounded() {
        let easy = ReadabilityFormula::Flesch.score(10, 2, 11);
        assert!(easy > 90.0 && easy <= 100.0);
        let hard = ReadabilityFormula::Flesch.score(60, 1, 200);
        assert_eq!(hard, 0.0);
        assert_eq!(ReadabilityFormula::Amstad.score(0, 0, 0), 0.0);
        let s = ReadabilityFormula::FernandezHuerta.score(20, 2, 30);
        assert_eq!(s, (s * 10.0).round() / 10.0);
    }
}
