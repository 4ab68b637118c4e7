//! Text length in words, by content type

use super::Assessment;
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, ContentType, Paper};

/// Word-count boundaries and the score reached at each, highest first
struct LengthTable {
    recommended: usize,
    steps: &'static [(usize, u8)],
}

impl LengthTable {
    fn for_content_type(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Post | ContentType::Page => Self {
                recommended: 300,
                steps: &[(300, 9), (250, 6), (200, 3), (100, 2)],
            },
            ContentType::Taxonomy => Self {
                recommended: 250,
                steps: &[(250, 9), (200, 6), (100, 3), (50, 2)],
            },
            ContentType::Cornerstone => Self {
                recommended: 900,
                steps: &[(900, 9), (400, 3), (300, 2)],
            },
        }
    }

    fn score(&self, words: usize) -> u8 {
        self.steps
            .iter()
            .find(|(min, _)| words >= *min)
            .map_or(1, |(_, score)| *score)
    }
}

pub struct TextLengthAssessment;

impl TextLengthAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextLengthAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for TextLengthAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::TextLength
    }

    fn is_applicable(&self, _paper: &Paper, _researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        true
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let words = researcher.word_count();
        let table = LengthTable::for_content_type(config.content_type);
        let score = table.score(words);
        let text = if score >= 9 {
            format!("Text length: The text contains {} words. Good job!", words)
        } else {
            format!(
                "Text length: The text contains {} words. This is below the recommended minimum of {} words. Add more content.",
                words, table.recommended
            )
        };
        Ok(AssessmentResult::new(id, score, text).with_measurement(words as f64))
    }
}
