//! Meta description length in characters

use super::Assessment;
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, Paper};

const RECOMMENDED_MIN: usize = 120;
const RECOMMENDED_MAX: usize = 156;

pub struct MetaDescriptionLengthAssessment;

impl MetaDescriptionLengthAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MetaDescriptionLengthAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for MetaDescriptionLengthAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::MetaDescriptionLength
    }

    fn is_applicable(&self, _paper: &Paper, _researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        true
    }

    fn get_result(
        &self,
        paper: &Paper,
        _researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let length = paper.description().trim().chars().count();
        let result = if length == 0 {
            AssessmentResult::new(
                id,
                1,
                "Meta description length: No meta description has been specified. Search engines will display copy from the page instead. Make sure to write one!",
            )
        } else if length < RECOMMENDED_MIN {
            AssessmentResult::new(
                id,
                6,
                format!(
                    "Meta description length: The meta description is too short (under {} characters). Up to {} characters are available. Use the space!",
                    RECOMMENDED_MIN, RECOMMENDED_MAX
                ),
            )
        } else if length > RECOMMENDED_MAX {
            AssessmentResult::new(
                id,
                6,
                format!(
                    "Meta description length: The meta description is over {} characters. To ensure the entire description will be visible, you should reduce the length!",
                    RECOMMENDED_MAX
                ),
            )
        } else {
            AssessmentResult::new(id, 9, "Meta description length: Well done!")
        };
        Ok(result.with_measurement(length as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::assessments::testing::assess_default;

    fn score(description: &str) -> u8 {
        let paper = Paper::new("Body.").with_description(description);
        assess_default(&MetaDescriptionLengthAssessment::new(), &paper)
            .expect("always applicable")
            .score
    }

    #[test]
    fn length_buckets() {
        assert_eq!(score(""), 1);
        assert_eq!(score(&"a".repeat(119)), 6);
        assert_eq!(score(&"a".repeat(120)), 9);
        assert_eq!(score(&"a".repeat(156)), 9);
        assert_eq!(score(&"a".repeat(157)), 6);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(score(&"é".repeat(130)), 9);
    }
}
