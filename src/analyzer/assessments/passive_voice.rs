//! Share of sentences in the passive voice

use super::{percent, Assessment};
use crate::config::Configuration;
use crate::error::AssessmentError;
use crate::researcher::Researcher;
use crate::{AssessmentId, AssessmentResult, MatchKind, Paper};

const GOOD_MAX: f64 = 10.0;
const OK_MAX: f64 = 15.0;

pub struct PassiveVoiceAssessment;

impl PassiveVoiceAssessment {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PassiveVoiceAssessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Assessment for PassiveVoiceAssessment {
    fn identifier(&self) -> AssessmentId {
        AssessmentId::PassiveVoice
    }

    fn is_applicable(&self, _paper: &Paper, researcher: &Researcher<'_>, _config: &Configuration) -> bool {
        researcher.pack().passive.is_some() && !researcher.body_sentences().is_empty()
    }

    fn get_result(
        &self,
        _paper: &Paper,
        researcher: &Researcher<'_>,
        _config: &Configuration,
    ) -> Result<AssessmentResult, AssessmentError> {
        let id = self.identifier();
        let profiles = researcher.profiles();
        let passive = researcher.passive_sentences();
        let share = percent(passive.len(), researcher.body_sentences().len());
        let matches = passive
            .iter()
            .filter_map(|&i| {
                let (first, last) = profiles[i].passive?;
                let range = profiles[i].word_range(first, last)?;
                Some(researcher.highlight(MatchKind::PassiveVoice, range))
            })
            .collect();

        let result = if share <= GOOD_MAX {
            AssessmentResult::new(id, 9, "Passive voice: You're using enough active voice. That's great!")
        } else {
            AssessmentResult::new(
                id,
                if share <= OK_MAX { 6 } else { 3 },
                format!(
                    "Passive voice: {:.1}% of the sentences contain passive voice, which is more than the recommended maximum of {}%. Try to use their active counterparts.",
                    share, GOOD_MAX
                ),
            )
        };
        Ok(result.with_matches(matches).with_measurement(share))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::assessments::testing::{assess, assess_default, repeat};

    #[test]
    fn active_text_is_good() {
        let paper = Paper::new("The cat chased the mouse. We wrote a book.");
        let result = assess_default(&PassiveVoiceAssessment::new(), &paper).expect("applicable");
        assert_eq!(result.score, 9);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn passive_share_is_measured_and_highlighted() {
        // 1 passive sentence out of 8
        let text = format!("The mouse was chased by the cat. {}", repeat("We wrote a book.", 7));
        let result = assess_default(&PassiveVoiceAssessment::new(), &Paper::new(text)).expect("applicable");
        assert_eq!(result.measurement, Some(12.5));
        assert_eq!(result.score, 6);
        assert_eq!(result.matches[0].text, "was chased");
    }

    #[test]
    fn mostly_passive_is_bad() {
        let paper = Paper::new("The book was written. The song was sung. We smiled.");
        let result = assess_default(&PassiveVoiceAssessment::new(), &paper).expect("applicable");
        assert_eq!(result.score, 3);
    }

    #[test]
    fn german_passive() {
        let paper = Paper::new("Das Haus wird gebaut. Wir essen Brot.");
        let config = Configuration::default().with_locale("de");
        let result = assess(&PassiveVoiceAssessment::new(), &paper, &config).expect("applicable");
        assert_eq!(result.measurement, Some(50.0));
    }

    #[test]
    fn default_pack_has_no_passive_detection() {
        let config = Configuration::default().with_locale("xx-YY");
        let paper = Paper::new("The book was written.");
        assert!(assess(&PassiveVoiceAssessment::new(), &paper, &config).is_none());
    }
}
