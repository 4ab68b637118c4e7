//! Watch mode: document change batches and a fingerprint cache so hosts only
//! re-render reports that actually changed.

use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::{Duration, Instant};

/// Quiet period that closes a batch of changes
const DEBOUNCE: Duration = Duration::from_millis(300);
/// Upper bound on one batch while events keep arriving
const MAX_BATCH: Duration = Duration::from_secs(5);

/// Default document suffixes, as in the config schema
const DEFAULT_SUFFIXES: [&str; 5] = [".md", ".markdown", ".html", ".htm", ".txt"];

/// Watches a directory for document changes and emits paths on a channel
pub struct DocumentWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<notify::Event>>,
    suffixes: Vec<String>,
    /// Watched directory as given and canonicalized; filters apply below it
    roots: Vec<PathBuf>,
}

fn touches_content(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

impl DocumentWatcher {
    /// Start watching the given path (file or directory) for the default document suffixes
    pub fn watch(path: &Path) -> notify::Result<Self> {
        Self::watch_with_suffixes(path, DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect())
    }

    /// Start watching for files ending in one of `suffixes`
    pub fn watch_with_suffixes(path: &Path, suffixes: Vec<String>) -> notify::Result<Self> {
        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default().with_poll_interval(DEBOUNCE),
        )?;

        let root = if path.is_dir() {
            path
        } else {
            match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            }
        };
        watcher.watch(root, RecursiveMode::Recursive)?;

        let mut roots = vec![root.to_path_buf()];
        if let Ok(canonical) = root.canonicalize() {
            if canonical != root {
                roots.push(canonical);
            }
        }

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            suffixes,
            roots,
        })
    }

    /// Check if the path is a document we care about
    pub fn is_document(p: &Path, suffixes: &[String]) -> bool {
        let name = match p.file_name().and_then(|n| n.to_str()) {
            Some(n) => n.to_ascii_lowercase(),
            None => return false,
        };
        if p.components().any(|c| {
            let part = c.as_os_str().to_string_lossy();
            part == "node_modules" || (part.starts_with('.') && part.len() > 1 && part != "..")
        }) {
            return false;
        }
        suffixes
            .iter()
            .any(|suffix| name.ends_with(&suffix.to_ascii_lowercase()))
    }

    /// Path below the watched root, so hidden parents of the root do not filter
    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        self.roots
            .iter()
            .find_map(|root| path.strip_prefix(root).ok())
            .unwrap_or(path)
    }

    /// Collect document paths from an event
    fn paths_from_event(&self, event: &notify::Event) -> Vec<PathBuf> {
        if !touches_content(&event.kind) {
            return vec![];
        }
        event
            .paths
            .iter()
            .filter(|p| Self::is_document(self.relative(p), &self.suffixes))
            .cloned()
            .collect()
    }

    /// Block until a document changes, then keep collecting until the tree has
    /// been quiet for the debounce window. Paths are sorted and unique.
    pub fn next_changes(&self) -> Vec<PathBuf> {
        self.next_changes_within(Duration::from_secs(3600))
    }

    /// Like [`next_changes`](Self::next_changes), giving up after `timeout`
    /// when nothing happens at all
    pub fn next_changes_within(&self, timeout: Duration) -> Vec<PathBuf> {
        let mut changed = BTreeSet::new();
        let mut wait = timeout;
        let mut started: Option<Instant> = None;
        while let Ok(received) = self.receiver.recv_timeout(wait) {
            match received {
                Ok(event) => changed.extend(self.paths_from_event(&event)),
                Err(e) => tracing::warn!(error = %e, "watch error"),
            }
            let first = *started.get_or_insert_with(Instant::now);
            if first.elapsed() >= MAX_BATCH {
                break;
            }
            wait = DEBOUNCE;
        }
        changed.into_iter().collect()
    }
}

/// Last report fingerprint per document; hosts re-print only on change
#[derive(Debug, Default)]
pub struct FingerprintCache {
    seen: HashMap<PathBuf, String>,
}

impl FingerprintCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `fingerprint` for `path`; true when it differs from the last one
    pub fn changed(&mut self, path: &Path, fingerprint: String) -> bool {
        match self.seen.get(path) {
            Some(previous) if *previous == fingerprint => false,
            _ => {
                self.seen.insert(path.to_path_buf(), fingerprint);
                true
            }
        }
    }

    pub fn forget(&mut self, path: &Path) {
        self.seen.remove(path);
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
