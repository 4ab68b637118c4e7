//! Assessments: independent scoring units over one paper

pub mod external_links;
pub mod flesch_reading_ease;
pub mod images;
pub mod internal_links;
pub mod introduction_keyword;
pub mod keyphrase_density;
pub mod keyphrase_length;
pub mod meta_description_keyword;
pub mod meta_description_length;
pub mod paragraph_too_long;
pub mod passive_voice;
pub mod sentence_beginnings;
pub mod sentence_length;
pub mod single_h1;
pub mod slug_keyword;
pub mod subheadings_keyword;
pub mod subheadings_too_long;
pub mod text_length;
pub mod text_presence;
pub mod title_keyword;
pub mod transition_words;

pub use external_links::ExternalLinksAssessment;
pub use flesch_reading_ease::FleschReadingEaseAssessment;
pub use images::ImagesAssessment;
pub use internal_links::InternalLinksAssessment;
pub use introduction_keyword::IntroductionKeywordAssessment;
pub use keyphrase_density::KeyphraseDensityAssessment;
pub use keyphrase_length::KeyphraseLengthAssessment;
pub use meta_description_keyword::MetaDescriptionKeywordAssessment;
pub use meta_description_length::MetaDescriptionLengthAssessment;
pub use paragraph_too_long::ParagraphTooLongAssessment;
pub use passive_voice::PassiveVoiceAssessment;
pub use sentence_beginnings::SentenceBeginningsAssessment;
pub use sentence_length::SentenceLengthAssessment;
pub use single_h1::SingleH1Assessment;
pub use slug_keyword::SlugKeywordAssessment;
pub use subheadings_keyword::SubheadingsKeywordAssessment;
pub use subheadings_too_long::SubheadingsTooLongAssessment;
pub use text_length::TextLengthAssessment;
pub use text_presence::TextPresenceAssessment;
pub use title_keyword::TitleKeywordAssessment;
pub use transition_words::TransitionWordsAssessment;

use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, Paper};

/// Trait for assessments
pub trait Assessment: Send + Sync {
    /// Stable identifier; also decides the tie-break order of results
    fn identifier(&self) -> AssessmentId;

    /// Words the text needs before this assessment runs (configurable per id)
    fn default_min_words(&self) -> usize {
        0
    }

    /// Whether the assessment has anything to say about this paper.
    /// Not applicable means no result at all, not a failure.
    fn is_applicable(&self, paper: &Paper, researcher: &Researcher<'_>, config: &Configuration)
        -> bool;

    fn get_result(
        &self,
        paper: &Paper,
        researcher: &Researcher<'_>,
        config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError>;
}

/// The built-in catalogue, in registration order
pub fn default_assessments() -> Vec<Box<dyn Assessment>> {
    vec![
        Box::new(IntroductionKeywordAssessment::new()),
        Box::new(KeyphraseLengthAssessment::new()),
        Box::new(KeyphraseDensityAssessment::new()),
        Box::new(MetaDescriptionKeywordAssessment::new()),
        Box::new(MetaDescriptionLengthAssessment::new()),
        Box::new(SubheadingsKeywordAssessment::new()),
        Box::new(ImagesAssessment::new()),
        Box::new(TextLengthAssessment::new()),
        Box::new(ExternalLinksAssessment::new()),
        Box::new(TitleKeywordAssessment::new()),
        Box::new(InternalLinksAssessment::new()),
        Box::new(SlugKeywordAssessment::new()),
        Box::new(SingleH1Assessment::new()),
        Box::new(SubheadingsTooLongAssessment::new()),
        Box::new(ParagraphTooLongAssessment::new()),
        Box::new(SentenceLengthAssessment::new()),
        Box::new(SentenceBeginningsAssessment::new()),
        Box::new(PassiveVoiceAssessment::new()),
        Box::new(TransitionWordsAssessment::new()),
        Box::new(FleschReadingEaseAssessment::new()),
        Box::new(TextPresenceAssessment::new()),
    ]
}

/// `part` as a percentage of `whole` (0 when `whole` is 0)
pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Whether the text has at least one word
pub(crate) fn has_text(researcher: &Researcher<'_>) -> bool {
    researcher.word_count() > 0
}

/// Whether the paper has a keyphrase with words in it
pub(crate) fn has_keyphrase(researcher: &Researcher<'_>) -> bool {
    !researcher.keyphrase().is_empty()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::language::for_locale;
    use crate::text::StructuralModel;

    /// Run one assessment the way the engine does, minus fault isolation
    pub(crate) fn assess(
        assessment: &dyn Assessment,
        paper: &Paper,
        config: &Configuration,
    ) -> Option<AssessmentResult> {
        let pack = for_locale(config.locale.as_deref().unwrap_or_else(|| {
            if paper.locale().is_empty() {
                "en"
            } else {
                paper.locale()
            }
        }));
        let model = StructuralModel::parse(paper.text(), paper.format(), pack);
        let researcher = Researcher::new(paper, model, pack);
        if !assessment.is_applicable(paper, &researcher, config) {
            return None;
        }
        let result = assessment
            .get_result(paper, &researcher, config)
            .expect("assessment result");
        assert_eq!(result.identifier, assessment.identifier());
        for m in &result.matches {
            assert_eq!(&researcher.model().text[m.start..m.end], m.text);
        }
        Some(result)
    }

    pub(crate) fn assess_default(assessment: &dyn Assessment, paper: &Paper) -> Option<AssessmentResult> {
        assess(assessment, paper, &Configuration::default())
    }

    /// `count` copies of a sentence
    pub(crate) fn repeat(sentence: &str, count: usize) -> String {
        vec![sentence; count].join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_follows_registration_order() {
        let ids: Vec<AssessmentId> = default_assessments()
            .iter()
            .map(|a| a.identifier())
            .collect();
        assert_eq!(ids, AssessmentId::ALL.to_vec());
    }

    #[test]
    fn percent_of_nothing_is_zero() {
        assert_eq!(percent(3, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }
}
