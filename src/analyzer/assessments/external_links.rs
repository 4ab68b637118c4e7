//! Outbound links and how many of them are followed

use super::{has_text, Assessment};
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, Paper};

pub struct ExternalLinksAssessment;

impl ExternalLinksAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExternalLinksAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for ExternalLinksAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::ExternalLinks
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
        let links = researcher.link_stats().external;
        let result = if links.total == 0 {
            AssessmentResult::new(
                id,
                6,
                "Outbound links: No outbound links appear in this page. Add some!",
            )
        } else if links.nofollow == links.total {
            AssessmentResult::new(
                id,
                7,
                "Outbound links: All outbound links on this page are nofollowed. Add some normal links.",
            )
        } else if links.nofollow > 0 {
            AssessmentResult::new(
                id,
                8,
                format!(
                    "Outbound links: There are both nofollowed ({}) and normal ({}) outbound links on this page. Good job!",
                    links.nofollow,
                    links.followed()
                ),
            )
        } else {
            AssessmentResult::new(id, 9, "Outbound links: Good job!")
        };
        Ok(result.with_measurement(links.total as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::assessments::testing::assess_default;
    use crate::InputFormat;

    fn score(body: &str) -> u8 {
        let paper = Paper::new(format!("<p>Some text {}</p>", body))
            .with_url("https://example.com/post")
            .with_format(InputFormat::Html);
        assess_default(&ExternalLinksAssessment::new(), &paper)
            .expect("applicable")
            .score
    }

    #[test]
    fn follow_state_decides_score() {
        assert_eq!(score(""), 6);
        assert_eq!(score(r#"<a href="https://example.com/about">ours</a>"#), 6);
        assert_eq!(score(r#"<a href="https://a.org" rel="nofollow">a</a>"#), 7);
        assert_eq!(
            score(r#"<a href="https://a.org" rel="nofollow">a</a> <a href="https://b.org">b</a>"#),
            8
        );
        assert_eq!(score(r#"<a href="https://b.org">b</a>"#), 9);
    }
}
