//! Links to other pages of the same site

use super::{has_text, Assessment};
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, Paper};

pub struct InternalLinksAssessment;

impl InternalLinksAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InternalLinksAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for InternalLinksAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::InternalLinks
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
        let links = researcher.link_stats().internal;
        let result = if links.total == 0 {
            AssessmentResult::new(
                id,
                3,
                "Internal links: No internal links appear in this page, make sure to add some!",
            )
        } else if links.nofollow == links.total {
            AssessmentResult::new(
                id,
                7,
                "Internal links: The internal links in this page are all nofollowed. Add some good internal links.",
            )
        } else if links.nofollow > 0 {
            AssessmentResult::new(
                id,
                8,
                format!(
                    "Internal links: There are both nofollowed ({}) and normal ({}) internal links on this page. Good job!",
                    links.nofollow,
                    links.followed()
                ),
            )
        } else {
            AssessmentResult::new(id, 9, "Internal links: You have enough internal links. Good job!")
        };
        Ok(result.with_measurement(links.total as f64))
    }
}
