//! Distribution of text over subheadings

use super::{has_text, Assessment};
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, MatchKind, Paper};

/// Longest text that needs no subheading at all
const WITHOUT_SUBHEADINGS: usize = 300;

pub struct SubheadingsTooLongAssessment;

impl SubheadingsTooLongAssessment {
    pub fn new() -> Self {
        Self
    }

    /// (ok above, bad above) section lengths in words
    fn limits(config: &Configuration) -> (usize, usize) {
        if config.is_cornerstone() {
            (250, 300)
        } else {
            (300, 350)
        }
    }
}

impl Default for SubheadingsTooLongAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for SubheadingsTooLongAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::SubheadingsTooLong
    }

    fn is_applicable(&self, _paper: &Paper, researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        has_text(researcher)
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let sections = researcher.subheading_sections();

        if !sections.has_subheadings {
            let words: usize = sections.sections.iter().map(|s| s.words).sum();
            return Ok(if words <= WITHOUT_SUBHEADINGS {
                AssessmentResult::new(
                    id,
                    9,
                    "Subheading distribution: You are not using any subheadings, but your text is short enough and probably doesn't need them.",
                )
            } else {
                AssessmentResult::new(
                    id,
                    2,
                    "Subheading distribution: You are not using any subheadings, although your text is rather long. Try and add some subheadings.",
                )
            }
            .with_measurement(words as f64));
        }

        let (ok_limit, bad_limit) = Self::limits(config);
        let too_long: Vec<_> = sections
            .sections
            .iter()
            .filter(|s| s.words > ok_limit)
            .collect();
        let longest = sections.sections.iter().map(|s| s.words).max().unwrap_or(0);
        let matches = too_long
            .iter()
            .map(|s| researcher.highlight(MatchKind::LongSection, s.highlight.clone()))
            .collect();

        let result = if longest > bad_limit {
            AssessmentResult::new(
                id,
                3,
                format!(
                    "Subheading distribution: {} section{} of your text {} longer than {} words and {} not separated by any subheadings. Add subheadings to improve readability.",
                    too_long.len(),
                    if too_long.len() == 1 { "" } else { "s" },
                    if too_long.len() == 1 { "is" } else { "are" },
                    ok_limit,
                    if too_long.len() == 1 { "is" } else { "are" },
                ),
            )
        } else if longest > ok_limit {
            AssessmentResult::new(
                id,
                6,
                format!(
                    "Subheading distribution: {} section{} of your text {} longer than {} words. Add subheadings to improve readability.",
                    too_long.len(),
                    if too_long.len() == 1 { "" } else { "s" },
                    if too_long.len() == 1 { "is" } else { "are" },
                    ok_limit,
                ),
            )
        } else {
            AssessmentResult::new(id, 9, "Subheading distribution: Great job!")
        };
        Ok(result.with_matches(matches).with_measurement(longest as f64))
    }
}
