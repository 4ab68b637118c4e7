//! Integration tests: full analysis pipeline against test-docs/

use seolens::analyzer::AnalysisEngine;
use seolens::config::Config;
use seolens::diagnostics::CollectingDiagnostics;
use seolens::document::read_document;
use seolens::{
    analyze_document, AssessmentId, CancellationToken, Category, ContentType, MatchKind, Rating,
    Report,
};
use std::path::Path;
use std::sync::Arc;

const DOCS: &str = "test-docs";

fn analyze(path: &str) -> Report {
    analyze_document(Path::new(path), Path::new(DOCS), None)
        .unwrap_or_else(|e| panic!("analyze({}) failed: {}", path, e))
}

fn rating(report: &Report, id: AssessmentId) -> Rating {
    report
        .result(id)
        .unwrap_or_else(|| panic!("no {} result", id))
        .rating
}

// --- Well-optimized post ---

#[test]
fn sourdough_post_scores_well() {
    let r = analyze("test-docs/blog/sourdough.md");
    assert_eq!(r.locale, "en");
    assert_eq!(r.content_type, ContentType::Post);
    assert!(r.seo.score >= 70, "seo = {}", r.seo.score);
    assert!(r.overall.score >= 60, "overall = {}", r.overall.score);
    assert!(r.stats.words > 300);
    assert_eq!(r.stats.subheadings, 5);
}

#[test]
fn sourdough_post_keyphrase_results() {
    let r = analyze("test-docs/blog/sourdough.md");
    assert_eq!(rating(&r, AssessmentId::KeyphraseDensity), Rating::Good);
    assert_eq!(rating(&r, AssessmentId::KeyphraseLength), Rating::Good);
    assert_eq!(rating(&r, AssessmentId::IntroductionKeyword), Rating::Good);
    assert_eq!(rating(&r, AssessmentId::MetaDescriptionLength), Rating::Good);
    assert_eq!(rating(&r, AssessmentId::TextLength), Rating::Good);
    assert_eq!(rating(&r, AssessmentId::TitleKeyword), Rating::Good);
    assert_eq!(rating(&r, AssessmentId::Images), Rating::Good);
}

#[test]
fn sourdough_post_links_are_classified() {
    let r = analyze("test-docs/blog/sourdough.md");
    let internal = r.result(AssessmentId::InternalLinks).expect("internal links");
    let external = r.result(AssessmentId::ExternalLinks).expect("external links");
    assert!(internal.score >= 8);
    assert!(external.score >= 8);
}

#[test]
fn synonym_counts_as_keyphrase() {
    let r = analyze("test-docs/blog/sourdough.md");
    let density = r.result(AssessmentId::KeyphraseDensity).unwrap();
    assert!(density
        .matches
        .iter()
        .any(|m| m.text.eq_ignore_ascii_case("sourdough loaf")));
}

#[test]
fn matches_point_at_their_text() {
    let path = Path::new("test-docs/blog/sourdough.md");
    let document = read_document(path).unwrap();
    let r = analyze("test-docs/blog/sourdough.md");
    let text = document.paper.text();
    for result in &r.results {
        for m in &result.matches {
            assert!(m.source_start <= m.source_end && m.source_end <= text.len());
            if m.kind == MatchKind::Keyphrase {
                let raw = &text[m.source_start..m.source_end];
                assert!(raw.to_lowercase().contains(&m.text.to_lowercase()), "{:?} vs {:?}", raw, m.text);
            }
        }
    }
}

// --- Keyphrase stuffing ---

#[test]
fn stuffed_post_is_bad() {
    let r = analyze("test-docs/blog/cats.md");
    let density = r.result(AssessmentId::KeyphraseDensity).unwrap();
    assert_eq!(density.rating, Rating::Bad);
    assert_eq!(density.score, 2);
    assert_eq!(density.matches.len(), 2);
    assert_eq!(rating(&r, AssessmentId::TextPresence), Rating::Bad);
    assert!(r.overall.score < analyze("test-docs/blog/sourdough.md").overall.score);
}

// --- HTML page ---

#[test]
fn html_page_flags_second_h1() {
    let r = analyze("test-docs/pages/about.html");
    let h1 = r.result(AssessmentId::SingleH1).expect("single h1");
    assert!(h1.score <= 4);
    assert!(h1.matches.iter().all(|m| m.kind == MatchKind::MultipleH1));
    assert_eq!(h1.matches.len(), 1);
    assert_eq!(h1.matches[0].text, "Our team");
}

#[test]
fn html_page_without_keyphrase_still_reports() {
    let r = analyze("test-docs/pages/about.html");
    let length = r.result(AssessmentId::KeyphraseLength).expect("keyphrase length");
    assert!(!length.has_score || length.score <= 4);
    assert!(r.result(AssessmentId::KeyphraseDensity).is_none());
    assert!(r.category(Category::Readability).scored > 0);
}

#[test]
fn html_page_passive_voice_is_found() {
    let r = analyze("test-docs/pages/about.html");
    let passive = r.result(AssessmentId::PassiveVoice).expect("passive voice");
    assert!(passive.score < 9);
    assert!(passive.matches.iter().any(|m| m.text.contains("was baked")));
}

// --- Other languages ---

#[test]
fn german_document_uses_german_pack() {
    let r = analyze("test-docs/de/brot.md");
    assert_eq!(r.locale, "de");
    assert!(r.result(AssessmentId::FleschReadingEase).is_some());
    let passive = r.result(AssessmentId::PassiveVoice).expect("german passive");
    assert!(!passive.matches.is_empty());
}

#[test]
fn unknown_locale_degrades_gracefully() {
    let r = analyze("test-docs/notes/field-notes.txt");
    assert_eq!(r.locale, "default");
    assert!(r.result(AssessmentId::PassiveVoice).is_none());
    assert!(r.result(AssessmentId::FleschReadingEase).is_none());
    assert!(r.result(AssessmentId::TextLength).is_some());
}

// --- Engine contract ---

#[test]
fn identical_passes_have_identical_fingerprints() {
    let a = analyze("test-docs/blog/sourdough.md");
    let b = analyze("test-docs/blog/sourdough.md");
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn parallel_analysis_matches_sequential() {
    let papers: Vec<_> = ["blog/sourdough.md", "blog/cats.md", "pages/about.html", "de/brot.md"]
        .iter()
        .map(|p| read_document(&Path::new(DOCS).join(p)).unwrap().paper)
        .collect();
    let engine = AnalysisEngine::new();
    let config = seolens::Configuration::default();
    let parallel = engine.analyze_parallel(&papers, &config);
    assert_eq!(parallel.len(), papers.len());
    for (paper, report) in papers.iter().zip(&parallel) {
        let sequential = engine
            .run_analysis(paper, &config, &CancellationToken::new())
            .unwrap();
        assert_eq!(&sequential, report);
    }
}

#[test]
fn config_overrides_reach_the_engine() {
    let config: Config = serde_json::from_str(
        r#"{
            "assessments": { "keyphraseDensity": "off" },
            "overrides": [{ "files": ["**/blog/**"], "contentType": "cornerstone" }]
        }"#,
    )
    .unwrap();
    let path = Path::new("test-docs/blog/sourdough.md");
    let document = read_document(path).unwrap();
    let configuration = config.configuration_for(path, document.content_type);
    assert_eq!(configuration.content_type, ContentType::Cornerstone);

    let r = AnalysisEngine::new()
        .run_analysis(&document.paper, &configuration, &CancellationToken::new())
        .unwrap();
    assert!(r.result(AssessmentId::KeyphraseDensity).is_none());
    // cornerstone needs 900 words
    assert!(r.result(AssessmentId::TextLength).unwrap().score < 9);
}

#[test]
fn healthy_documents_record_no_faults() {
    let diagnostics = Arc::new(CollectingDiagnostics::new());
    let engine = AnalysisEngine::new().with_diagnostics(diagnostics.clone());
    for path in ["blog/sourdough.md", "blog/cats.md", "pages/about.html", "de/brot.md", "notes/field-notes.txt"] {
        let document = read_document(&Path::new(DOCS).join(path)).unwrap();
        let report = engine.run_analysis(
            &document.paper,
            &seolens::Configuration::default(),
            &CancellationToken::new(),
        );
        assert!(report.is_some());
    }
    assert!(diagnostics.faults().is_empty(), "{:?}", diagnostics.faults());
}
