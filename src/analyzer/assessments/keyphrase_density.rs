//! Keyphrase density: occurrences of the keyphrase (or a synonym) per 100 words.
//!
//! Below 0.5% the topic is unclear, above 3% the text reads as keyphrase
//! stuffing. Both ends are bad; stuffing scores lower.

use super::{has_keyphrase, has_text, percent, Assessment};
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, Paper};

const MIN_DENSITY: f64 = 0.5;
const MAX_DENSITY: f64 = 3.0;

pub struct KeyphraseDensityAssessment;

impl KeyphraseDensityAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeyphraseDensityAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for KeyphraseDensityAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::KeyphraseDensity
    }

    fn is_applicable(&self, _paper: &Paper, researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        has_keyphrase(researcher) && has_text(researcher)
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let matches = researcher.keyphrase_matches().to_vec();
        let count = matches.len();
        let density = percent(count, researcher.word_count());
        if !density.is_finite() {
            return Err(AssessmentError::Unscorable {
                what: "keyphrase density",
                value: density,
            });
        }

        let result = if density < MIN_DENSITY {
            AssessmentResult::new(
                id,
                4,
                format!(
                    "Keyphrase density: The keyphrase was found {} time{}. That's less than the recommended minimum of {}% for a text of this length. Focus on your keyphrase!",
                    count,
                    if count == 1 { "" } else { "s" },
                    MIN_DENSITY
                ),
            )
        } else if density <= MAX_DENSITY {
            AssessmentResult::new(
                id,
                9,
                format!(
                    "Keyphrase density: The keyphrase was found {} time{}. This is great!",
                    count,
                    if count == 1 { "" } else { "s" }
                ),
            )
        } else {
            AssessmentResult::new(
                id,
                2,
                format!(
                    "Keyphrase density: The keyphrase was found {} times. That's more than the recommended maximum of {}% for a text of this length. Don't overoptimize!",
                    count, MAX_DENSITY
                ),
            )
        };
        Ok(result.with_matches(matches).with_measurement(density))
    }
}
