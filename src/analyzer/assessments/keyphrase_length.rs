//! Number of content words in the keyphrase

use super::Assessment;
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, Paper};

const MAX_GOOD: usize = 4;
const MAX_OK: usize = 8;

pub struct KeyphraseLengthAssessment;

impl KeyphraseLengthAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeyphraseLengthAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for KeyphraseLengthAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::KeyphraseLength
    }

    fn is_applicable(&self, _paper: &Paper, _researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        true
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        if researcher.keyphrase().is_empty() {
            return Ok(AssessmentResult::uncalculated(
                id,
                "Keyphrase length: No focus keyphrase was set for this page. Set a keyphrase in order to calculate your SEO score.",
            ));
        }

        let words = researcher
            .keyphrase()
            .keyphrase()
            .map_or(0, |form| form.content.len());
        let result = match words {
            0 => AssessmentResult::new(
                id,
                3,
                "Keyphrase length: The keyphrase contains only function words. Add a word that describes your topic.",
            ),
            1..=MAX_GOOD => AssessmentResult::new(id, 9, "Keyphrase length: Good job!"),
            5..=MAX_OK => AssessmentResult::new(
                id,
                6,
                format!(
                    "Keyphrase length: The keyphrase contains {} content words. That's more than the recommended maximum of {}. Make it shorter!",
                    words, MAX_GOOD
                ),
            ),
            _ => AssessmentResult::new(
                id,
                3,
                format!(
                    "Keyphrase length: The keyphrase contains {} content words. That's way more than the recommended maximum of {}. Make it shorter!",
                    words, MAX_GOOD
                ),
            ),
        };
        Ok(result.with_measurement(words as f64))
    }
}
