//! Keyphrase in the meta description

use super::{has_keyphrase, Assessment};
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, Paper};

const MAX_SENTENCES: usize = 2;

pub struct MetaDescriptionKeywordAssessment;

impl MetaDescriptionKeywordAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MetaDescriptionKeywordAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for MetaDescriptionKeywordAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::MetaDescriptionKeyword
    }

    fn is_applicable(&self, paper: &Paper, researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        has_keyphrase(researcher) && !paper.description().trim().is_empty()
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let sentences = researcher.description_keyphrase();
        let result = match sentences {
            0 => AssessmentResult::new(
                id,
                3,
                "Keyphrase in meta description: The meta description has been specified, but it does not contain the keyphrase. Fix that!",
            ),
            1..=MAX_SENTENCES => AssessmentResult::new(
                id,
                9,
                "Keyphrase in meta description: Keyphrase or synonym appear in the meta description. Well done!",
            ),
            _ => AssessmentResult::new(
                id,
                3,
                format!(
                    "Keyphrase in meta description: The meta description contains the keyphrase {} times, which is over the advised maximum of {} times. Limit that!",
                    sentences, MAX_SENTENCES
                ),
            ),
        };
        Ok(result.with_measurement(sentences as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::assessments::testing::assess_default;

    fn score(description: &str) -> Option<u8> {
        let paper = Paper::new("Body.")
            .with_keyphrase("cat food")
            .with_synonyms(["kibble"])
            .with_description(description);
        assess_default(&MetaDescriptionKeywordAssessment::new(), &paper).map(|r| r.score)
    }

    #[test]
    fn one_or_two_sentences_are_good() {
        assert_eq!(score("The best food for your cat."), Some(9));
        assert_eq!(score("Cat food reviews. Kibble compared."), Some(9));
    }

    #[test]
    fn absent_or_repeated_keyphrase_is_bad() {
        assert_eq!(score("Reviews of dog toys."), Some(3));
        assert_eq!(score("Cat food. Cat food again. More cat food."), Some(3));
    }

    #[test]
    fn needs_a_description() {
        assert_eq!(score("  "), None);
    }
}
