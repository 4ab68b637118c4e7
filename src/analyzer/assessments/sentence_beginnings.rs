//! Consecutive sentences that start with the same word

use super::Assessment;
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, MatchKind, Paper};

/// Shortest run of identical beginnings that is flagged
const MAX_REPEATS: usize = 3;

pub struct SentenceBeginningsAssessment;

impl SentenceBeginningsAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SentenceBeginningsAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for SentenceBeginningsAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::SentenceBeginnings
    }

    fn is_applicable(&self, _paper: &Paper, researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        !researcher.pack().first_word_exceptions.is_empty() && !researcher.body_sentences().is_empty()
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let profiles = researcher.profiles();
        let repeated: Vec<_> = researcher
            .sentence_beginnings()
            .iter()
            .filter(|run| run.sentences.len() >= MAX_REPEATS)
            .collect();
        if repeated.is_empty() {
            return Ok(AssessmentResult::new(
                id,
                9,
                "Consecutive sentences: There is enough variety in your sentences. That's great!",
            ));
        }

        let mut matches = Vec::new();
        for run in &repeated {
            let words = run.beginning.split(' ').count();
            for &sentence in &run.sentences {
                if let Some(range) = profiles[sentence].word_range(0, words - 1) {
                    matches.push(researcher.highlight(MatchKind::SentenceBeginning, range));
                }
            }
        }
        let longest = repeated.iter().map(|r| r.sentences.len()).max().unwrap_or(0);
        Ok(AssessmentResult::new(
            id,
            3,
            format!(
                "Consecutive sentences: The text contains {} consecutive sentences starting with the same word. Try to mix things up!",
                longest
            ),
        )
        .with_matches(matches)
        .with_measurement(longest as f64))
    }
}
