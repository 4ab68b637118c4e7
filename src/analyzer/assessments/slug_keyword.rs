//! Keyphrase in the slug

use super::{has_keyphrase, Assessment};
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, Paper};

pub struct SlugKeywordAssessment;

impl SlugKeywordAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SlugKeywordAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for SlugKeywordAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::SlugKeyword
    }

    fn is_applicable(&self, paper: &Paper, researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        has_keyphrase(researcher) && !paper.slug().trim().is_empty()
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let coverage = researcher.slug_keyphrase();
        if coverage.total == 0 {
            return Err(AssessmentError::MissingResearch("slug keyphrase words"));
        }
        let result = if coverage.matched == coverage.total {
            AssessmentResult::new(id, 9, "Keyphrase in slug: Great work!")
        } else if coverage.matched * 2 > coverage.total {
            AssessmentResult::new(
                id,
                6,
                "Keyphrase in slug: More than half of your keyphrase appears in the slug. That's great!",
            )
        } else {
            AssessmentResult::new(
                id,
                3,
                "Keyphrase in slug: (Part of) your keyphrase does not appear in the slug. Change that!",
            )
        };
        Ok(result.with_measurement(coverage.matched as f64 / coverage.total as f64 * 100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::assessments::testing::assess_default;

    fn score(slug: &str) -> Option<u8> {
        let paper = Paper::new("Body.")
            .with_keyphrase("the best cat food")
            .with_slug(slug);
        assess_default(&SlugKeywordAssessment::new(), &paper).map(|r| r.score)
    }

    #[test]
    fn coverage_buckets() {
        assert_eq!(score("best-cat-food"), Some(9));
        assert_eq!(score("best_cat_food_2024"), Some(9));
        assert_eq!(score("best-cat-toys"), Some(6));
        assert_eq!(score("cat-toys"), Some(3));
    }

    #[test]
    fn needs_a_slug() {
        assert_eq!(score(""), None);
    }
}
