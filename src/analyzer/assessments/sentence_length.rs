//! Share of long sentences

use super::{percent, Assessment};
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, MatchKind, Paper};

pub struct SentenceLengthAssessment;

impl SentenceLengthAssessment {
    pub fn new() -> Self {
        Self
    }

    /// (good up to, ok up to) percent of long sentences
    fn limits(config: &Configuration) -> (f64, f64) {
        if config.is_cornerstone() {
            (20.0, 25.0)
        } else {
            (25.0, 30.0)
        }
    }
}

impl Default for SentenceLengthAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for SentenceLengthAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::TextSentenceLength
    }

    fn is_applicable(&self, _paper: &Paper, researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        !researcher.sentence_lengths().is_empty()
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let limit = researcher.pack().sentence_length_limit;
        let lengths = researcher.sentence_lengths();
        let long: Vec<usize> = lengths
            .iter()
            .filter(|s| s.words > limit)
            .map(|s| s.sentence)
            .collect();
        let share = percent(long.len(), lengths.len());
        let matches = long
            .iter()
            .filter_map(|&i| researcher.highlight_sentence(MatchKind::LongSentence, i))
            .collect();

        let (good, ok) = Self::limits(config);
        let result = if share <= good {
            AssessmentResult::new(id, 9, "Sentence length: Great!")
        } else {
            AssessmentResult::new(
                id,
                if share <= ok { 6 } else { 3 },
                format!(
                    "Sentence length: {:.1}% of the sentences contain more than {} words, which is more than the recommended maximum of {}%. Try to shorten the sentences.",
                    share, limit, good
                ),
            )
        };
        Ok(result.with_matches(matches).with_measurement(share))
    }
}
