//! Reporter module for output formatting

pub mod console;
pub mod json;

pub use console::ConsoleReporter;
pub use json::JsonReporter;

use crate::document::{position_utf16, Document};
use crate::{AssessmentId, MatchKind, Rating, Report};
use serde::Serialize;
use std::path::PathBuf;

/// A highlight located in the document file (1-based line and column)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub assessment: AssessmentId,
    pub kind: MatchKind,
    pub rating: Rating,
    pub line: u32,
    pub column: u32,
    pub text: String,
}

/// Report of one document, as the hosts print it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    pub file_path: PathBuf,
    #[serde(flatten)]
    pub report: Report,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<Highlight>,
}

impl DocumentReport {
    /// Locate the matches of `report` in the file the document came from
    pub fn new(file_path: impl Into<PathBuf>, file_text: &str, document: &Document, report: Report) -> Self {
        let highlights = report
            .results
            .iter()
            .flat_map(|result| {
                result.matches.iter().map(move |m| {
                    let (line, column) = position_utf16(file_text, document.file_offset(m.source_start));
                    Highlight {
                        assessment: result.identifier,
                        kind: m.kind,
                        rating: result.rating,
                        line: line + 1,
                        column: column + 1,
                        text: m.text.clone(),
                    }
                })
            })
            .collect();
        Self {
            file_path: file_path.into(),
            report,
            threshold: None,
            highlights,
        }
    }

    pub fn with_threshold(mut self, threshold: Option<u8>) -> Self {
        self.threshold = threshold;
        self
    }

    /// Overall score is under the threshold
    pub fn below_threshold(&self) -> bool {
        self.threshold
            .is_some_and(|threshold| self.report.overall.score < threshold)
    }
}

/// Statistics across all analyzed documents
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub files_analyzed: usize,
    pub average_score: u8,
    pub average_rating: Rating,
    pub below_threshold: usize,
    pub total_words: usize,
}

impl SummaryStats {
    pub fn from_reports(reports: &[DocumentReport]) -> Self {
        if reports.is_empty() {
            return Self {
                files_analyzed: 0,
                average_score: 0,
                average_rating: Rating::Feedback,
                below_threshold: 0,
                total_words: 0,
            };
        }
        let total: usize = reports.iter().map(|r| usize::from(r.report.overall.score)).sum();
        let average = (total as f64 / reports.len() as f64).round() as u8;
        Self {
            files_analyzed: reports.len(),
            average_score: average,
            average_rating: Rating::from_percent(average),
            below_threshold: reports.iter().filter(|r| r.below_threshold()).count(),
            total_words: reports.iter().map(|r| r.report.stats.words).sum(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::cats_report;
    use super::*;

    #[test]
    fn highlights_point_into_the_file() {
        let report = cats_report(None);
        let keyphrase: Vec<&Highlight> = report
            .highlights
            .iter()
            .filter(|h| h.assessment == AssessmentId::KeyphraseDensity)
            .collect();
        assert_eq!(keyphrase.len(), 2);
        assert_eq!((keyphrase[0].line, keyphrase[0].column), (4, 1));
        assert_eq!((keyphrase[1].line, keyphrase[1].column), (4, 22));
        assert_eq!(keyphrase[0].text, "Cats");
    }

    #[test]
    fn threshold_check() {
        assert!(!cats_report(None).below_threshold());
        assert!(cats_report(Some(100)).below_threshold());
        assert!(!cats_report(Some(0)).below_threshold());
    }

    #[test]
    fn summary_averages_overall_scores() {
        let reports = vec![cats_report(Some(100)), cats_report(None)];
        let stats = SummaryStats::from_reports(&reports);
        assert_eq!(stats.files_analyzed, 2);
        assert_eq!(stats.average_score, reports[0].report.overall.score);
        assert_eq!(stats.below_threshold, 1);
        assert_eq!(stats.total_words, 14);
        assert_eq!(SummaryStats::from_reports(&[]).average_rating, Rating::Feedback);
    }
}
