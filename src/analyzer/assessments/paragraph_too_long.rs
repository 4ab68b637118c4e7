//! Paragraph length

use super::Assessment;
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, MatchKind, Paper};

const RECOMMENDED_MAX: usize = 150;
const ACCEPTABLE_MAX: usize = 200;

pub struct ParagraphTooLongAssessment;

impl ParagraphTooLongAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ParagraphTooLongAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for ParagraphTooLongAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::TextParagraphTooLong
    }

    fn is_applicable(&self, _paper: &Paper, researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        !researcher.paragraphs().is_empty()
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let model = researcher.model();
        let paragraphs = researcher.paragraphs();
        let too_long: Vec<_> = paragraphs
            .iter()
            .filter(|p| p.words > RECOMMENDED_MAX)
            .collect();
        let longest = paragraphs.iter().map(|p| p.words).max().unwrap_or(0);
        let matches = too_long
            .iter()
            .map(|p| researcher.highlight(MatchKind::LongParagraph, model.blocks[p.block].range.clone()))
            .collect();

        let result = if longest > ACCEPTABLE_MAX {
            AssessmentResult::new(
                id,
                3,
                format!(
                    "Paragraph length: {} of the paragraphs contain{} more than the recommended maximum of {} words. Shorten your paragraphs!",
                    too_long.len(),
                    if too_long.len() == 1 { "s" } else { "" },
                    RECOMMENDED_MAX
                ),
            )
        } else if longest > RECOMMENDED_MAX {
            AssessmentResult::new(
                id,
                6,
                format!(
                    "Paragraph length: {} of the paragraphs contain{} more than the recommended maximum of {} words. Shorten your paragraphs!",
                    too_long.len(),
                    if too_long.len() == 1 { "s" } else { "" },
                    RECOMMENDED_MAX
                ),
            )
        } else {
            AssessmentResult::new(id, 9, "Paragraph length: None of the paragraphs are too long. Great job!")
        };
        Ok(result.with_matches(matches).with_measurement(longest as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::assessments::testing::{assess_default, repeat};

    fn paragraph(words: usize) -> String {
        repeat("one two three four five six seven eight nine ten.", words / 10)
    }

    fn score(text: &str) -> Option<u8> {
        assess_default(&ParagraphTooLongAssessment::new(), &Paper::new(text)).map(|r| r.score)
    }

    #[test]
    fn length_buckets() {
        assert_eq!(score(&paragraph(150)), Some(9));
        assert_eq!(score(&format!("{}\n\n{}", paragraph(20), paragraph(160))), Some(6));
        assert_eq!(score(&paragraph(210)), Some(3));
    }

    #[test]
    fn long_paragraphs_are_highlighted() {
        let text = format!("{}\n\n{}", paragraph(160), paragraph(20));
        let result = assess_default(&ParagraphTooLongAssessment::new(), &Paper::new(text)).expect("applicable");
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].start, 0);
    }

    #[test]
    fn empty_text_is_not_applicable() {
        assert_eq!(score(""), None);
    }
}
