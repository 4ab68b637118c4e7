//! Analysis engine - runs one pass: preprocess, research, assess, aggregate

use crate::config::Configuration;
use crate::diagnostics::{AssessmentFault, Diagnostics};
use crate::error::Cancelled;
use crate::language::{for_locale, LanguagePack};
use crate::researcher::Researcher;
use crate::text::{preprocess, StructuralModel};
use crate::{AssessmentId, AssessmentResult, Paper, Rating, Report, TextStats};
use rayon::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::assessments::{default_assessments, Assessment};
use super::{CancellationToken, ScoreCalculator};

/// Locale used when neither the configuration nor the paper names one
pub const DEFAULT_LOCALE: &str = "en";

/// Stage of an analysis pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassState {
    Idle,
    Preprocessing,
    Researching,
    Scoring,
    Reported,
}

impl std::fmt::Display for PassState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassState::Idle => write!(f, "idle"),
            PassState::Preprocessing => write!(f, "preprocessing"),
            PassState::Researching => write!(f, "researching"),
            PassState::Scoring => write!(f, "scoring"),
            PassState::Reported => write!(f, "reported"),
        }
    }
}

/// Callback for pass state transitions
pub type PassObserver = Arc<dyn Fn(PassState) + Send + Sync>;

/// Main analysis engine that orchestrates all assessments.
///
/// The engine holds no per-pass state, so one engine can run any number of
/// passes at once from different threads.
pub struct AnalysisEngine {
    /// Registered assessments, in registration order
    assessments: Vec<Box<dyn Assessment>>,
    diagnostics: Option<Arc<dyn Diagnostics>>,
    observer: Option<PassObserver>,
}

impl AnalysisEngine {
    /// Create an engine with the built-in assessments
    pub fn new() -> Self {
        Self {
            assessments: default_assessments(),
            diagnostics: None,
            observer: None,
        }
    }

    /// Create an engine with no assessments
    pub fn empty() -> Self {
        Self {
            assessments: Vec::new(),
            diagnostics: None,
            observer: None,
        }
    }

    /// Register an assessment, replacing any with the same identifier
    pub fn with_assessment(mut self, assessment: Box<dyn Assessment>) -> Self {
        let id = assessment.identifier();
        match self.assessments.iter().position(|a| a.identifier() == id) {
            Some(slot) => self.assessments[slot] = assessment,
            None => {
                self.assessments.push(assessment);
                self.assessments.sort_by_key(|a| a.identifier().order());
            }
        }
        self
    }

    /// Send assessment faults to a diagnostics collaborator
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Observe state transitions of every pass
    pub fn with_observer(mut self, observer: impl Fn(PassState) + Send + Sync + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Identifiers of the registered assessments, in registration order
    pub fn assessment_ids(&self) -> Vec<AssessmentId> {
        self.assessments.iter().map(|a| a.identifier()).collect()
    }

    /// Pack for a pass: configuration locale, then paper locale, then English
    pub fn resolve_pack(paper: &Paper, config: &Configuration) -> &'static LanguagePack {
        let locale = config
            .locale
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .or_else(|| Some(paper.locale()).filter(|l| !l.trim().is_empty()))
            .unwrap_or(DEFAULT_LOCALE);
        for_locale(locale)
    }

    /// Run one analysis pass.
    ///
    /// Returns `None` only when `token` was cancelled before the pass finished.
    /// Assessment faults never abort the pass.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = paper.text().len()))]
    pub fn run_analysis(
        &self,
        paper: &Paper,
        config: &Configuration,
        token: &CancellationToken,
    ) -> Option<Report> {
        match self.run_pass(paper, config, token) {
            Ok(report) => Some(report),
            Err(Cancelled) => {
                tracing::debug!("pass cancelled");
                self.enter(PassState::Idle);
                None
            }
        }
    }

    /// Analyze independent papers on the rayon pool. Each pass gets its own
    /// researcher; reports come back in input order.
    pub fn analyze_parallel(&self, papers: &[Paper], config: &Configuration) -> Vec<Report> {
        papers
            .par_iter()
            .filter_map(|paper| self.run_analysis(paper, config, &CancellationToken::new()))
            .collect()
    }

    fn run_pass(
        &self,
        paper: &Paper,
        config: &Configuration,
        token: &CancellationToken,
    ) -> Result<Report, Cancelled> {
        let pack = Self::resolve_pack(paper, config);
        token.check()?;

        self.enter(PassState::Preprocessing);
        let model: StructuralModel = preprocess(paper.text(), paper.format(), pack, token)?;

        self.enter(PassState::Researching);
        let researcher = Researcher::new(paper, model, pack);
        researcher.prime(token)?;

        self.enter(PassState::Scoring);
        let mut results = Vec::with_capacity(self.assessments.len());
        for assessment in &self.assessments {
            token.check()?;
            if let Some(result) = self.assess(assessment.as_ref(), paper, &researcher, config) {
                results.push(result);
            }
        }

        let report = ScoreCalculator::aggregate(results, config, pack.code, text_stats(&researcher));
        self.enter(PassState::Reported);
        Ok(report)
    }

    fn enter(&self, state: PassState) {
        tracing::debug!(state = %state, "pass state");
        if let Some(observer) = &self.observer {
            observer(state);
        }
    }

    /// Run one assessment behind the fault boundary
    fn assess(
        &self,
        assessment: &dyn Assessment,
        paper: &Paper,
        researcher: &Researcher<'_>,
        config: &Configuration,
    ) -> Option<AssessmentResult> {
        let id = assessment.identifier();
        let _span = tracing::debug_span!("assessment", id = %id).entered();
        if !config.is_enabled(id) {
            return None;
        }
        let min_words = config.min_words_for(id, assessment.default_min_words());
        if researcher.word_count() < min_words {
            tracing::debug!(min_words, "below minimum word count");
            return None;
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            if assessment.is_applicable(paper, researcher, config) {
                assessment.get_result(paper, researcher, config).map(Some)
            } else {
                Ok(None)
            }
        }));
        let fault = match outcome {
            Ok(Ok(None)) => return None,
            Ok(Ok(Some(result))) => match validate(id, &result, researcher.model()) {
                Ok(()) => {
                    tracing::debug!(score = result.score, "assessed");
                    return Some(result);
                }
                Err(reason) => AssessmentFault::malformed(id, reason),
            },
            Ok(Err(error)) => AssessmentFault::failed(id, &error),
            Err(payload) => AssessmentFault::panicked(id, panic_message(payload.as_ref())),
        };
        self.report_fault(fault);
        None
    }

    fn report_fault(&self, fault: AssessmentFault) {
        match &self.diagnostics {
            Some(diagnostics) => diagnostics.record(fault),
            None => tracing::debug!(fault = %fault, "assessment fault dropped"),
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a result against the invariants of a report
fn validate(id: AssessmentId, result: &AssessmentResult, model: &StructuralModel) -> Result<(), String> {
    if result.identifier != id {
        return Err(format!("identifier {} does not match", result.identifier));
    }
    if result.category != id.category() {
        return Err(format!("category {} does not match", result.category));
    }
    if result.score > 9 {
        return Err(format!("score {} is out of range", result.score));
    }
    if result.has_score && result.score == 0 {
        return Err("scored result has score 0".to_string());
    }
    let expected = if result.has_score {
        Rating::from_score(result.score)
    } else {
        Rating::Feedback
    };
    if result.rating != expected {
        return Err(format!("rating {} does not follow score {}", result.rating, result.score));
    }

    for m in &result.matches {
        if model.text.get(m.start..m.end) != Some(m.text.as_str()) {
            return Err(format!("match {}..{} does not point at its text", m.start, m.end));
        }
    }
    let mut spans: Vec<_> = result.matches.iter().map(|m| (m.kind as u8, m.start, m.end)).collect();
    spans.sort_unstable();
    for pair in spans.windows(2) {
        if pair[0].0 == pair[1].0 && pair[1].1 < pair[0].2 {
            return Err(format!("matches {}..{} and {}..{} overlap", pair[0].1, pair[0].2, pair[1].1, pair[1].2));
        }
    }
    Ok(())
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn text_stats(researcher: &Researcher<'_>) -> TextStats {
    TextStats {
        words: researcher.word_count(),
        sentences: researcher.sentence_count(),
        paragraphs: researcher.paragraphs().len(),
        subheadings: researcher.headings().iter().filter(|h| h.level >= 2).count(),
        characters: researcher.model().character_count(),
    }
}
