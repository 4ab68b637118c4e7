//! Warns when there is too little text to analyze

use super::Assessment;
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, Paper};

pub struct TextPresenceAssessment;

impl TextPresenceAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextPresenceAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for TextPresenceAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::TextPresence
    }

    fn is_applicable(&self, _paper: &Paper, researcher: &Researcher<'_>, config: &Configuration) -> bool {
        researcher.model().character_count() < config.min_content_chars
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        Ok(AssessmentResult::new(
            self.identifier(),
            3,
            "Not enough content: Please add some content to enable a good analysis.",
        )
        .with_measurement(researcher.model().character_count() as f64))
    }
}
