//! Reading ease, with the formula of the text's language

use super::Assessment;
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, Paper};

const GOOD_MIN: f64 = 60.0;
const OK_MIN: f64 = 50.0;

pub struct FleschReadingEaseAssessment;

impl FleschReadingEaseAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FleschReadingEaseAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for FleschReadingEaseAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::FleschReadingEase
    }

    fn is_applicable(&self, _paper: &Paper, researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        researcher.pack().readability.is_some() && !researcher.body_sentences().is_empty()
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let formula = researcher
            .pack()
            .readability
            .ok_or(AssessmentError::MissingResearch("readability formula"))?;
        let syllables = researcher
            .syllable_count()
            .ok_or(AssessmentError::MissingResearch("syllables"))?;
        let ease = formula.score(
            researcher.body_word_count(),
            researcher.body_sentences().len(),
            syllables,
        );

        let result = if ease >= GOOD_MIN {
            AssessmentResult::new(
                id,
                9,
                format!(
                    "Flesch Reading Ease: The copy scores {:.1} in the test, which is considered easy to read. Good job!",
                    ease
                ),
            )
        } else if ease >= OK_MIN {
            AssessmentResult::new(
                id,
                6,
                format!(
                    "Flesch Reading Ease: The copy scores {:.1} in the test, which is considered fairly difficult to read. Try to make shorter sentences to improve readability.",
                    ease
                ),
            )
        } else {
            AssessmentResult::new(
                id,
                3,
                format!(
                    "Flesch Reading Ease: The copy scores {:.1} in the test, which is considered difficult to read. Try to make shorter sentences, using less difficult words to improve readability.",
                    ease
                ),
            )
        };
        Ok(result.with_measurement(ease))
    }
}
