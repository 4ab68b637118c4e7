//! Share of sentences with a transition word

use super::{percent, Assessment};
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, MatchKind, Paper};

const GOOD_MIN: f64 = 30.0;
const OK_MIN: f64 = 20.0;

pub struct TransitionWordsAssessment;

impl TransitionWordsAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TransitionWordsAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for TransitionWordsAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::TextTransitionWords
    }

    fn default_min_words(&self) -> usize {
        200
    }

    fn is_applicable(&self, _paper: &Paper, researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        !researcher.pack().transition_words.is_empty() && !researcher.body_sentences().is_empty()
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let profiles = researcher.profiles();
        let with_transition = researcher.transition_sentences();
        let share = percent(with_transition.len(), researcher.body_sentences().len());
        let matches = with_transition
            .iter()
            .filter_map(|&i| {
                let (first, last) = profiles[i].transition?;
                let range = profiles[i].word_range(first, last)?;
                Some(researcher.highlight(MatchKind::TransitionWord, range))
            })
            .collect();

        let result = if share >= GOOD_MIN {
            AssessmentResult::new(id, 9, "Transition words: Well done!")
        } else {
            AssessmentResult::new(
                id,
                if share >= OK_MIN { 6 } else { 3 },
                format!(
                    "Transition words: Only {:.1}% of the sentences contain transition words, which is not enough. Use more of them.",
                    share
                ),
            )
        };
        Ok(result.with_matches(matches).with_measurement(share))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::assessments::testing::{assess, assess_default, repeat};

    #[test]
    fn counts_single_and_multi_word_transitions() {
        let text = format!(
            "However, cats sleep. In addition, they purr. {}",
            repeat("Cats eat fish.", 4)
        );
        let result = assess_default(&TransitionWordsAssessment::new(), &Paper::new(text)).expect("applicable");
        let measured = result.measurement.expect("share");
        assert!((measured - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.score, 9);
        let texts: Vec<&str> = result.matches.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["However", "In addition"]);
    }

    #[test]
    fn few_transitions_are_bad() {
        let text = format!("Therefore cats sleep. {}", repeat("Cats eat fish.", 9));
        let result = assess_default(&TransitionWordsAssessment::new(), &Paper::new(text)).expect("applicable");
        assert_eq!(result.score, 3);
    }

    #[test]
    fn waits_for_enough_words_by_default() {
        assert_eq!(TransitionWordsAssessment::new().default_min_words(), 200);
    }

    #[test]
    fn default_pack_has_no_transition_words() {
        let config = Configuration::default().with_locale("xx");
        let paper = Paper::new("However, cats sleep.");
        assert!(assess(&TransitionWordsAssessment::new(), &paper, &config).is_none());
    }
}
