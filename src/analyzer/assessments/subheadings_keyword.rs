//! Keyphrase in H2 and H3 subheadings

use super::{has_keyphrase, percent, Assessment};
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::{Heading, Researcher};
use crate::{AssessmentId, AssessmentResult, MatchKind, Paper};

const MIN_PERCENT: f64 = 30.0;
const MAX_PERCENT: f64 = 75.0;

pub struct SubheadingsKeywordAssessment;

impl SubheadingsKeywordAssessment {
    pub fn new() -> Self {
        Self
    }

    fn subheadings<'r>(researcher: &'r Researcher<'_>) -> impl Iterator<Item = &'r Heading> {
        researcher
            .headings()
            .iter()
            .filter(|h| matches!(h.level, 2 | 3))
    }
}

impl Default for SubheadingsKeywordAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for SubheadingsKeywordAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::SubheadingsKeyword
    }

    fn is_applicable(&self, _paper: &Paper, researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        has_keyphrase(researcher) && Self::subheadings(researcher).next().is_some()
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let subheadings: Vec<&Heading> = Self::subheadings(researcher).collect();
        let reflecting: Vec<&Heading> = subheadings
            .iter()
            .copied()
            .filter(|h| h.has_keyphrase)
            .collect();
        let share = percent(reflecting.len(), subheadings.len());
        let model = researcher.model();
        let matches = reflecting
            .iter()
            .map(|h| researcher.highlight(MatchKind::KeyphraseInSubheading, model.blocks[h.block].range.clone()))
            .collect();

        let result = if subheadings.len() == 1 && reflecting.len() == 1 {
            AssessmentResult::new(
                id,
                9,
                "Keyphrase in subheading: Your H2 or H3 subheading reflects the topic of your copy. Good job!",
            )
        } else if reflecting.is_empty() {
            AssessmentResult::new(
                id,
                3,
                "Keyphrase in subheading: Use more keyphrases or synonyms in your H2 and H3 subheadings!",
            )
        } else if share < MIN_PERCENT {
            AssessmentResult::new(
                id,
                3,
                format!(
                    "Keyphrase in subheading: Only {} of {} H2 and H3 subheadings reflect the topic of your copy. Use more keyphrases or synonyms!",
                    reflecting.len(),
                    subheadings.len()
                ),
            )
        } else if share > MAX_PERCENT {
            AssessmentResult::new(
                id,
                3,
                format!(
                    "Keyphrase in subheading: More than {}% of your H2 and H3 subheadings reflect the topic of your copy. That's too much. Don't over-optimize!",
                    MAX_PERCENT
                ),
            )
        } else {
            AssessmentResult::new(
                id,
                9,
                format!(
                    "Keyphrase in subheading: {} of your H2 and H3 subheadings reflect the topic of your copy. Good job!",
                    reflecting.len()
                ),
            )
        };
        Ok(result.with_matches(matches).with_measurement(share))
    }
}
