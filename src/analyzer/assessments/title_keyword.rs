//! Keyphrase in the SEO title

use super::{has_keyphrase, Assessment};
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::{Researcher, TitlePlacement};
use crate::{AssessmentId, AssessmentResult, Paper};

pub struct TitleKeywordAssessment;

impl TitleKeywordAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TitleKeywordAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for TitleKeywordAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::TitleKeyword
    }

    fn is_applicable(&self, paper: &Paper, researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        has_keyphrase(researcher) && !paper.title().trim().is_empty()
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let result = match researcher.title_keyphrase() {
            TitlePlacement::AtStart => AssessmentResult::new(
                id,
                9,
                "Keyphrase in SEO title: The exact match of the focus keyphrase appears at the beginning of the SEO title. Good job!",
            ),
            TitlePlacement::Elsewhere => AssessmentResult::new(
                id,
                6,
                "Keyphrase in SEO title: The exact match of the focus keyphrase appears in the SEO title, but not at the beginning. Move it to the beginning for the best results.",
            ),
            TitlePlacement::AllWords => AssessmentResult::new(
                id,
                6,
                "Keyphrase in SEO title: Does not contain the exact match. Try to write the exact match of your keyphrase in the SEO title and put it at the beginning of the title.",
            ),
            TitlePlacement::Missing => AssessmentResult::new(
                id,
                2,
                "Keyphrase in SEO title: Not all the words from your keyphrase appear in the SEO title. For the best SEO results write the exact match of your keyphrase in the SEO title, and put the keyphrase at the beginning of the title.",
            ),
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::assessments::testing::assess_default;

    fn score(title: &str) -> Option<u8> {
        let paper = Paper::new("Body.").with_keyphrase("cat food").with_title(title);
        assess_default(&TitleKeywordAssessment::new(), &paper).map(|r| r.score)
    }

    #[test]
    fn placement_scores() {
        assert_eq!(score("Cat Food: a buyer's guide"), Some(9));
        assert_eq!(score("The ultimate cat food guide"), Some(6));
        assert_eq!(score("Food every cat loves"), Some(6));
        assert_eq!(score("Dog toys"), Some(2));
    }

    #[test]
    fn needs_a_title() {
        assert_eq!(score(""), None);
    }

    #[test]
    fn synonym_does_not_stand_in_for_a_wordless_keyphrase() {
        let paper = Paper::new("Body.")
            .with_keyphrase("???")
            .with_synonyms(["cat food"])
            .with_title("Cat food reviews");
        assert!(assess_default(&TitleKeywordAssessment::new(), &paper).is_none());
    }
}
