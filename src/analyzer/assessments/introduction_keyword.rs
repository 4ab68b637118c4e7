//! Keyphrase in the first paragraph

use super::{has_keyphrase, Assessment};
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, Paper};

pub struct IntroductionKeywordAssessment;

impl IntroductionKeywordAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IntroductionKeywordAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for IntroductionKeywordAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::IntroductionKeyword
    }

    fn is_applicable(&self, _paper: &Paper, researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        has_keyphrase(researcher) && researcher.introduction().is_some()
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let intro = researcher
            .introduction()
            .ok_or(AssessmentError::MissingResearch("introduction"))?;
        let id = self.identifier();

        if !intro.in_paragraph {
            return Ok(AssessmentResult::new(
                id,
                3,
                "Keyphrase in introduction: Your keyphrase or its synonyms do not appear in the first paragraph. Make sure the topic is clear immediately.",
            ));
        }
        if !intro.in_one_sentence {
            return Ok(AssessmentResult::new(
                id,
                6,
                "Keyphrase in introduction: Your keyphrase or its synonyms appear in the first paragraph, but not within one sentence. Fix that!",
            ));
        }

        let block = &researcher.model().blocks[intro.block];
        let matches = researcher
            .keyphrase_matches()
            .iter()
            .filter(|m| m.start >= block.range.start && m.end <= block.range.end)
            .cloned()
            .collect();
        Ok(AssessmentResult::new(id, 9, "Keyphrase in introduction: Well done!").with_matches(matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::assessments::testing::assess_default;

    #[test]
    fn keyphrase_in_first_sentence_is_good() {
        let paper = Paper::new("Cat food keeps cats healthy. More text.\n\nSecond paragraph.")
            .with_keyphrase("cat food");
        let result = assess_default(&IntroductionKeywordAssessment::new(), &paper).expect("applicable");
        assert_eq!(result.score, 9);
        assert_eq!(result.matches.len(), 1);
    }

    #[test]
    fn keyphrase_split_across_sentences_is_ok() {
        let paper = Paper::new("Cats are picky. They like good food.").with_keyphrase("cats food");
        let result = assess_default(&IntroductionKeywordAssessment::new(), &paper).expect("applicable");
        assert_eq!(result.score, 6);
    }

    #[test]
    fn missing_keyphrase_is_bad() {
        let paper = Paper::new("Dogs are loyal.\n\nCat food later.").with_keyphrase("cat food");
        let result = assess_default(&IntroductionKeywordAssessment::new(), &paper).expect("applicable");
        assert_eq!(result.score, 3);
    }

    #[test]
    fn needs_a_keyphrase() {
        let paper = Paper::new("Some text.");
        assert!(assess_default(&IntroductionKeywordAssessment::new(), &paper).is_none());
    }
}
