//! seolens LSP server: re-analyzes open documents on every edit and publishes
//! the highlights of weak results as diagnostics.

use seolens::config::{load_config, Config};
use seolens::diagnostics::TracingDiagnostics;
use seolens::document::{parse_document, position_utf16, Document};
use seolens::{AnalysisEngine, CancellationToken, Rating, Report};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};

/// Quiet period after an edit before a pass starts
const DEBOUNCE: Duration = Duration::from_millis(250);

/// Per-document state: the token of the newest pass and what was last published
#[derive(Debug, Default)]
struct OpenDocument {
    token: CancellationToken,
    published: Option<String>,
}

struct Backend {
    client: Client,
    root_uri: RwLock<Option<Url>>,
    engine: Arc<AnalysisEngine>,
    open: Arc<Mutex<HashMap<Url, OpenDocument>>>,
}

fn rating_to_severity(rating: Rating) -> Option<DiagnosticSeverity> {
    match rating {
        Rating::Bad => Some(DiagnosticSeverity::WARNING),
        Rating::Ok => Some(DiagnosticSeverity::INFORMATION),
        Rating::Good | Rating::Feedback => None,
    }
}

fn position_at(text: &str, offset: usize) -> Position {
    let (line, character) = position_utf16(text, offset);
    Position::new(line, character)
}

/// Diagnostics for the matches of every bad or ok result
fn report_diagnostics(report: &Report, document: &Document, text: &str) -> Vec<Diagnostic> {
    report
        .results
        .iter()
        .filter_map(|result| rating_to_severity(result.rating).map(|severity| (result, severity)))
        .flat_map(|(result, severity)| {
            result.matches.iter().map(move |m| Diagnostic {
                range: Range::new(
                    position_at(text, document.file_offset(m.source_start)),
                    position_at(text, document.file_offset(m.source_end)),
                ),
                severity: Some(severity),
                code: Some(NumberOrString::String(result.identifier.to_string())),
                code_description: None,
                source: Some("seolens".to_string()),
                message: result.text.clone(),
                related_information: None,
                tags: None,
                data: None,
            })
        })
        .collect()
}

/// One pass over an editor buffer. `None` when the pass was superseded.
fn analyze_text(
    engine: &AnalysisEngine,
    uri: &Url,
    text: &str,
    work_dir: &Path,
    token: &CancellationToken,
) -> Option<(Vec<Diagnostic>, String)> {
    let path = uri
        .to_file_path()
        .unwrap_or_else(|_| PathBuf::from(uri.path()));
    let config = load_config(work_dir, None).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config");
        Config::default()
    });
    let document = parse_document(text, Some(&path));
    let configuration = config.configuration_for(&path, document.content_type);
    let report = engine.run_analysis(&document.paper, &configuration, token)?;
    // Front matter edits move highlights without changing the report
    let key = format!("{}:{}", report.fingerprint(), document.body_offset);
    Some((report_diagnostics(&report, &document, text), key))
}

impl Backend {
    fn work_dir(&self, path: Option<&Path>) -> PathBuf {
        let root = self
            .root_uri
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().and_then(|u| u.to_file_path().ok()));
        root.or_else(|| path.and_then(Path::parent).map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Cancel the in-flight pass of `uri` and start a new one after the debounce
    fn schedule(&self, uri: Url, text: String) {
        let token = CancellationToken::new();
        if let Ok(mut open) = self.open.lock() {
            let entry = open.entry(uri.clone()).or_default();
            entry.token.cancel();
            entry.token = token.clone();
        }

        let client = self.client.clone();
        let engine = Arc::clone(&self.engine);
        let open = Arc::clone(&self.open);
        let work_dir = self.work_dir(uri.to_file_path().ok().as_deref());
        tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE).await;
            if token.is_cancelled() {
                return;
            }

            let pass_uri = uri.clone();
            let pass_token = token.clone();
            let outcome = tokio::task::spawn_blocking(move || {
                analyze_text(&engine, &pass_uri, &text, &work_dir, &pass_token)
            })
            .await;
            let (diagnostics, key) = match outcome {
                Ok(Some(done)) => done,
                Ok(None) => return,
                Err(e) => {
                    client
                        .log_message(MessageType::ERROR, format!("seolens analysis failed: {}", e))
                        .await;
                    return;
                }
            };

            let publish = match open.lock() {
                Ok(mut open) => match open.get_mut(&uri) {
                    Some(doc) if !token.is_cancelled() && doc.published.as_deref() != Some(key.as_str()) => {
                        doc.published = Some(key);
                        true
                    }
                    _ => false,
                },
                Err(_) => false,
            };
            if publish {
                client.publish_diagnostics(uri, diagnostics, None).await;
            } else {
                tracing::debug!(uri = %uri, "diagnostics unchanged");
            }
        });
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> LspResult<InitializeResult> {
        if let Some(ref uri) = params.root_uri {
            if let Ok(mut guard) = self.root_uri.write() {
                *guard = Some(uri.clone());
            }
        }
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::FULL),
                        ..Default::default()
                    },
                )),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "seolens-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "seolens LSP initialized")
            .await;
    }

    async fn shutdown(&self) -> LspResult<()> {
        if let Ok(open) = self.open.lock() {
            for doc in open.values() {
                doc.token.cancel();
            }
        }
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.schedule(params.text_document.uri, params.text_document.text);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // Full sync: the last change holds the whole buffer
        if let Some(change) = params.content_changes.into_iter().last() {
            self.schedule(params.text_document.uri, change.text);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Ok(mut open) = self.open.lock() {
            if let Some(doc) = open.remove(&uri) {
                doc.token.cancel();
            }
        }
        self.client.publish_diagnostics(uri, vec![], None).await;
    }
}

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("SEOLENS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .ok();

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(|client| Backend {
        client,
        root_uri: RwLock::new(None),
        engine: Arc::new(AnalysisEngine::new().with_diagnostics(Arc::new(TracingDiagnostics))),
        open: Arc::new(Mutex::new(HashMap::new())),
    });
    Server::new(stdin, stdout, socket).serve(service).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = "---\nkeyphrase: cats\n---\nCats are great pets. Cats are loyal.\n";

    fn uri() -> Url {
        Url::parse("file:///tmp/seolens-lsp-test/cats.md").unwrap()
    }

    #[test]
    fn weak_results_become_diagnostics() {
        let engine = AnalysisEngine::new();
        let (diagnostics, _) = analyze_text(
            &engine,
            &uri(),
            POST,
            Path::new("/tmp/seolens-lsp-test"),
            &CancellationToken::new(),
        )
        .unwrap();

        let density: Vec<&Diagnostic> = diagnostics
            .iter()
            .filter(|d| d.code == Some(NumberOrString::String("keyphraseDensity".to_string())))
            .collect();
        assert_eq!(density.len(), 2);
        assert_eq!(density[0].severity, Some(DiagnosticSeverity::WARNING));
        assert_eq!(density[0].range, Range::new(Position::new(3, 0), Position::new(3, 4)));
        assert_eq!(density[1].range.start, Position::new(3, 21));
        assert_eq!(density[0].source.as_deref(), Some("seolens"));
    }

    #[test]
    fn cancelled_pass_publishes_nothing() {
        let token = CancellationToken::new();
        token.cancel();
        let outcome = analyze_text(
            &AnalysisEngine::new(),
            &uri(),
            POST,
            Path::new("/tmp/seolens-lsp-test"),
            &token,
        );
        assert!(outcome.is_none());
    }

    #[test]
    fn same_text_same_key() {
        let engine = AnalysisEngine::new();
        let dir = Path::new("/tmp/seolens-lsp-test");
        let first = analyze_text(&engine, &uri(), POST, dir, &CancellationToken::new()).unwrap();
        let second = analyze_text(&engine, &uri(), POST, dir, &CancellationToken::new()).unwrap();
        assert_eq!(first.1, second.1);

        let edited = POST.replace("loyal", "very loyal");
        let third = analyze_text(&engine, &uri(), &edited, dir, &CancellationToken::new()).unwrap();
        assert_ne!(first.1, third.1);
    }

    #[test]
    fn good_and_feedback_are_not_published() {
        assert_eq!(rating_to_severity(Rating::Good), None);
        assert_eq!(rating_to_severity(Rating::Feedback), None);
        assert_eq!(rating_to_severity(Rating::Ok), Some(DiagnosticSeverity::INFORMATION));
    }

    #[test]
    fn utf16_positions_count_surrogate_pairs() {
        assert_eq!(position_at("😀ab", 4), Position::new(0, 2));
    }
}
