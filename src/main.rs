//! seolens: content analysis CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use seolens::config::{
    build_ignore_set, is_ignored, load_config, starter_config, Config, CONFIG_FILENAME,
};
use seolens::diagnostics::TracingDiagnostics;
use seolens::document::{parse_document, Document};
use seolens::reporter::{ConsoleReporter, DocumentReport, JsonReporter, SummaryStats};
use seolens::watcher::{DocumentWatcher, FingerprintCache};
use seolens::{parse_synonyms, AnalysisEngine, CancellationToken, ContentType, Paper};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

const STDIN_LABEL: &str = "<stdin>";

/// seolens: SEO and readability analysis for prose
#[derive(Parser, Debug)]
#[command(name = "seolens")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Document or directory to analyze (omit when using a subcommand or --stdin)
    #[arg(required_unless_present = "stdin")]
    path: Option<PathBuf>,

    /// Focus keyphrase (overrides front matter)
    #[arg(long, short)]
    keyphrase: Option<String>,

    /// Comma-separated keyphrase synonyms
    #[arg(long)]
    synonyms: Option<String>,

    /// SEO title
    #[arg(long)]
    title: Option<String>,

    /// Meta description
    #[arg(long)]
    description: Option<String>,

    /// URL slug
    #[arg(long)]
    slug: Option<String>,

    /// Canonical URL of the page (for internal/external link detection)
    #[arg(long)]
    url: Option<String>,

    /// Locale such as en_US or de (overrides config and front matter)
    #[arg(long, short)]
    locale: Option<String>,

    /// Content type: post, page, cornerstone or taxonomy
    #[arg(long, value_parser = parse_content_type)]
    content_type: Option<ContentType>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Minimum overall score (exit 1 if below)
    #[arg(long, short)]
    threshold: Option<u8>,

    /// Quiet mode (minimal output)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (also raises the log level to debug)
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .seolensrc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Watch for file changes and re-analyze
    #[arg(long)]
    watch: bool,

    /// Run analysis in parallel (default for directories with many files)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,

    /// Read one document from stdin
    #[arg(long)]
    stdin: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .seolensrc.json with sensible defaults
    Init {
        /// Minimum overall score (e.g. 70)
        #[arg(long)]
        threshold: Option<u8>,

        /// Default locale of the documents
        #[arg(long)]
        locale: Option<String>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn parse_content_type(value: &str) -> std::result::Result<ContentType, String> {
    ContentType::parse(value).ok_or_else(|| {
        format!(
            "unknown content type '{}' (expected post, page, cornerstone or taxonomy)",
            value
        )
    })
}

/// Metadata given on the command line, applied over front matter
#[derive(Debug, Default)]
struct PaperOverrides {
    keyphrase: Option<String>,
    synonyms: Option<String>,
    title: Option<String>,
    description: Option<String>,
    slug: Option<String>,
    url: Option<String>,
}

impl PaperOverrides {
    fn from_args(args: &Args) -> Self {
        Self {
            keyphrase: args.keyphrase.clone(),
            synonyms: args.synonyms.clone(),
            title: args.title.clone(),
            description: args.description.clone(),
            slug: args.slug.clone(),
            url: args.url.clone(),
        }
    }

    fn apply(&self, mut paper: Paper) -> Paper {
        if let Some(keyphrase) = &self.keyphrase {
            paper = paper.with_keyphrase(keyphrase.as_str());
        }
        if let Some(synonyms) = &self.synonyms {
            paper = paper.with_synonyms(parse_synonyms(synonyms));
        }
        if let Some(title) = &self.title {
            paper = paper.with_title(title.as_str());
        }
        if let Some(description) = &self.description {
            paper = paper.with_description(description.as_str());
        }
        if let Some(slug) = &self.slug {
            paper = paper.with_slug(slug.as_str());
        }
        if let Some(url) = &self.url {
            paper = paper.with_url(url.as_str());
        }
        paper
    }
}

/// Everything a pass over one document needs besides the document itself
struct Session {
    engine: AnalysisEngine,
    config: Config,
    overrides: PaperOverrides,
    content_type: Option<ContentType>,
}

impl Session {
    fn new(args: &Args, work_dir: &Path) -> Result<Self> {
        let config = load_config(work_dir, args.config.as_deref())?
            .merge_with_cli(args.threshold, args.locale.as_deref());
        for key in config.unknown_keys() {
            tracing::warn!(key = %key, "unknown assessment id in config");
        }
        Ok(Self {
            engine: AnalysisEngine::new().with_diagnostics(Arc::new(TracingDiagnostics)),
            config,
            overrides: PaperOverrides::from_args(args),
            content_type: args.content_type,
        })
    }

    fn analyze_file(&self, path: &Path) -> Result<DocumentReport> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read document: {}", path.display()))?;
        let document = parse_document(&raw, Some(path));
        self.analyze(path, &raw, document)
    }

    fn analyze(&self, path: &Path, raw: &str, mut document: Document) -> Result<DocumentReport> {
        document.paper = self.overrides.apply(document.paper);
        let content_type = self.content_type.or(document.content_type);
        let configuration = self.config.configuration_for(path, content_type);
        let threshold = self.config.threshold_for(path, content_type);
        let report = self
            .engine
            .run_analysis(&document.paper, &configuration, &CancellationToken::new())
            .context("analysis was cancelled")?;
        Ok(DocumentReport::new(path, raw, &document, report).with_threshold(threshold))
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "seolens=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SEOLENS_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Some(Commands::Init {
        threshold,
        locale,
        dir,
    }) = &args.command
    {
        return run_init(*threshold, locale.as_deref(), dir.as_deref());
    }

    if args.stdin {
        return run_stdin(&args);
    }

    let path = args
        .path
        .clone()
        .context("a document or directory is required")?;

    if args.watch {
        return run_watch(&args, &path);
    }

    let work_dir = work_dir_for(&path);
    let session = Session::new(&args, work_dir)?;

    let ignore_set = if session.config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&session.config.ignore)?)
    };
    let documents = collect_documents(&path, ignore_set.as_ref(), &session.config)?;
    if documents.is_empty() {
        eprintln!("{}: No documents found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let use_parallel = args.parallel || documents.len() > 10;
    let outcomes: Vec<Result<DocumentReport>> = if use_parallel {
        documents
            .par_iter()
            .map(|file| session.analyze_file(file))
            .collect()
    } else {
        documents
            .iter()
            .map(|file| session.analyze_file(file))
            .collect()
    };

    let mut reports = Vec::with_capacity(outcomes.len());
    let mut had_errors = false;
    for (file, outcome) in documents.iter().zip(outcomes) {
        match outcome {
            Ok(report) => reports.push(report),
            Err(e) => {
                had_errors = true;
                eprintln!(
                    "{}: Failed to analyze {}: {:#}",
                    "Error".red(),
                    file.display(),
                    e
                );
            }
        }
    }

    if reports.is_empty() {
        eprintln!("{}: All documents failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    print_reports(&args, &reports)?;
    Ok(exit_code(&reports, had_errors))
}

fn run_stdin(args: &Args) -> Result<ExitCode> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("Failed to read stdin")?;
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let session = Session::new(args, &cwd)?;
    let document = parse_document(&raw, None);
    let report = session.analyze(Path::new(STDIN_LABEL), &raw, document)?;
    let reports = vec![report];
    print_reports(args, &reports)?;
    Ok(exit_code(&reports, false))
}

fn print_reports(args: &Args, reports: &[DocumentReport]) -> Result<()> {
    let stats = SummaryStats::from_reports(reports);
    if args.json {
        let reporter = JsonReporter::new().pretty();
        if reports.len() == 1 {
            println!("{}", reporter.report(&reports[0]));
        } else {
            println!("{}", reporter.report_with_summary(reports, &stats));
        }
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for report in reports {
            reporter.report_quiet(report).context("Failed to write report")?;
        }
    } else {
        let mut reporter = ConsoleReporter::new();
        if args.verbose {
            reporter = reporter.verbose();
        }
        if reports.len() == 1 {
            reporter.report(&reports[0]).context("Failed to write report")?;
        } else {
            reporter
                .report_many(reports, &stats)
                .context("Failed to write report")?;
        }
    }
    Ok(())
}

fn exit_code(reports: &[DocumentReport], had_errors: bool) -> ExitCode {
    if had_errors {
        ExitCode::from(2)
    } else if reports.iter().any(DocumentReport::below_threshold) {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn work_dir_for(path: &Path) -> &Path {
    if path.is_file() {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    } else {
        path
    }
}

fn run_init(threshold: Option<u8>, locale: Option<&str>, dir: Option<&Path>) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists; use --dir to write elsewhere or remove it first",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let json = serde_json::to_string_pretty(&starter_config(locale, threshold))
        .context("Failed to serialize starter config")?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    std::fs::write(&config_path, format!("{}\n", json))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("{} {}", "Created".green(), config_path.display());
    Ok(ExitCode::SUCCESS)
}

fn run_watch(args: &Args, path: &Path) -> Result<ExitCode> {
    let session = Session::new(args, work_dir_for(path))?;
    let ignore_set = if session.config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&session.config.ignore)?)
    };

    let suffixes: Vec<String> = session
        .config
        .get_document_patterns()
        .into_iter()
        .map(str::to_string)
        .collect();
    let watcher =
        DocumentWatcher::watch_with_suffixes(path, suffixes).context("Failed to create file watcher")?;
    let mut fingerprints = FingerprintCache::new();

    let print = |report: &DocumentReport| -> Result<()> {
        if args.json {
            println!("{}", JsonReporter::new().report(report));
        } else if args.quiet {
            ConsoleReporter::new().report_quiet(report)?;
        } else if args.verbose {
            ConsoleReporter::new().verbose().report(report)?;
        } else {
            ConsoleReporter::new().report(report)?;
        }
        Ok(())
    };

    for file in collect_documents(path, ignore_set.as_ref(), &session.config)? {
        match session.analyze_file(&file) {
            Ok(report) => {
                fingerprints.changed(&file, report.report.fingerprint());
                print(&report).context("Failed to write report")?;
            }
            Err(e) => eprintln!("{}: {}: {:#}", "Error".red(), file.display(), e),
        }
    }
    eprintln!("{}: Watching for changes... (Ctrl+C to stop)", "Info".blue());

    loop {
        let changed: Vec<PathBuf> = watcher
            .next_changes()
            .into_iter()
            .filter(|p| {
                ignore_set
                    .as_ref()
                    .map(|set| !is_ignored(p, set))
                    .unwrap_or(true)
            })
            .collect();
        for file in changed {
            match session.analyze_file(&file) {
                Ok(report) => {
                    if fingerprints.changed(&file, report.report.fingerprint()) {
                        print(&report).context("Failed to write report")?;
                    } else {
                        tracing::debug!(path = %file.display(), "report unchanged");
                    }
                }
                Err(e) => {
                    fingerprints.forget(&file);
                    eprintln!("{}: {}: {:#}", "Error".red(), file.display(), e);
                }
            }
        }
    }
}

fn collect_documents(
    path: &Path,
    ignore_set: Option<&globset::GlobSet>,
    config: &Config,
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden_or_vendored(e.file_name()))
        .filter_map(|e| e.ok())
    {
        let file_path = entry.path();
        if entry.file_type().is_file() && config.is_document(file_path) {
            if let Some(set) = ignore_set {
                if is_ignored(file_path, set) {
                    continue;
                }
            }
            files.push(file_path.to_path_buf());
        }
    }

    // Sort for consistent output
    files.sort();
    Ok(files)
}

fn is_hidden_or_vendored(name: &std::ffi::OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || name == "node_modules" || name == "target"
}
