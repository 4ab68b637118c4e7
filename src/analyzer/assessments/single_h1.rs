//! At most one H1 in the body

use super::Assessment;
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, MatchKind, Paper};

pub struct SingleH1Assessment;

impl SingleH1Assessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SingleH1Assessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for SingleH1Assessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::SingleH1
    }

    fn is_applicable(&self, _paper: &Paper, researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        researcher.headings().iter().any(|h| h.level == 1)
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let model = researcher.model();
        let h1s: Vec<usize> = researcher
            .headings()
            .iter()
            .filter(|h| h.level == 1)
            .map(|h| h.block)
            .collect();
        if h1s.len() <= 1 {
            return Ok(AssessmentResult::new(id, 9, "Single title: You don't have multiple H1 headings, well done!"));
        }

        let matches = h1s[1..]
            .iter()
            .map(|&block| researcher.highlight(MatchKind::MultipleH1, model.blocks[block].range.clone()))
            .collect();
        Ok(AssessmentResult::new(
            id,
            1,
            format!(
                "Single title: H1s should only be used as your main title. Find all {} H1s in your text and consider changing them to a lower heading level!",
                h1s.len()
            ),
        )
        .with_matches(matches)
        .with_measurement(h1s.len() as f64))
    }
}
