//! Images in the text, and the keyphrase in their alt attributes

use super::{has_keyphrase, has_text, Assessment};
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, Paper};

pub struct ImagesAssessment;

impl ImagesAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImagesAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for ImagesAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::Images
    }

    fn is_applicable(&self, _paper: &Paper, researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        has_text(researcher)
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let stats = researcher.image_stats();
        let result = if stats.count == 0 {
            AssessmentResult::new(
                id,
                3,
                "Image keyphrase: No images appear on this page. Add some as appropriate!",
            )
        } else if !has_keyphrase(researcher) {
            AssessmentResult::new(id, 9, "Images: Good job!")
        } else if stats.with_keyphrase == 0 {
            AssessmentResult::new(
                id,
                6,
                "Image keyphrase: Images on this page do not have alt attributes that reflect the topic of your text. Add your keyphrase or synonyms to the alt tags of relevant images!",
            )
        } else {
            AssessmentResult::new(
                id,
                9,
                format!(
                    "Image keyphrase: {} of {} images have alt attributes that reflect the topic of your text. Good job!",
                    stats.with_keyphrase, stats.count
                ),
            )
        };
        Ok(result.with_measurement(stats.count as f64))
    }
}
