//! Configuration loading for seolens

mod configuration;
mod schema;

pub use configuration::{Configuration, DEFAULT_MIN_CONTENT_CHARS};
pub use schema::{Config, ConfigOverride, Toggle};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".seolensrc.json";

/// Load the config for `work_dir`: `custom_path` when given (relative to
/// `work_dir`), else the nearest `.seolensrc.json` in `work_dir` or a parent.
/// No file at all yields the default config.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let found = match custom_path {
        Some(p) => {
            let path = work_dir.join(p);
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path)
        }
        None => work_dir
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file()),
    };
    match found {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            ExtendsChain::default().load(&path)
        }
        None => Ok(Config::default()),
    }
}

/// Files visited while following `extends`; a repeat is a cycle
#[derive(Default)]
struct ExtendsChain {
    seen: HashSet<PathBuf>,
}

impl ExtendsChain {
    fn load(&mut self, path: &Path) -> Result<Config> {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if !self.seen.insert(key) {
            anyhow::bail!("Circular extends detected in config: {}", path.display());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON in config: {}", path.display()))?;

        if let Some(extends) = config.extends.take() {
            let base = Self::base_path(path, &extends);
            if !base.is_file() {
                anyhow::bail!(
                    "Extended config not found: {} (referenced from {})",
                    base.display(),
                    path.display()
                );
            }
            config.merge_from(self.load(&base)?);
        }
        Ok(config)
    }

    /// `extends` is relative to the extending file; a missing extension means `.json`
    fn base_path(from: &Path, extends: &str) -> PathBuf {
        let dir = from.parent().unwrap_or(Path::new("."));
        let base = dir.join(extends);
        match base.extension() {
            Some(_) => base,
            None => base.with_extension("json"),
        }
    }
}

/// Compile `ignore` globs into one matcher
pub fn build_ignore_set(patterns: &[String]) -> Result<GlobSet> {
    patterns
        .iter()
        .try_fold(GlobSetBuilder::new(), |mut builder, pattern| {
            let glob = Glob::new(pattern)
                .with_context(|| format!("Invalid ignore pattern: {}", pattern))?;
            builder.add(glob);
            Ok::<_, anyhow::Error>(builder)
        })?
        .build()
        .context("Failed to compile ignore patterns")
}

pub fn is_ignored(path: &Path, ignore_set: &GlobSet) -> bool {
    ignore_set.is_match(path)
}

/// Starter config written by `seolens init`
pub fn starter_config(locale: Option<&str>, threshold: Option<u8>) -> Config {
    Config {
        locale: Some(locale.unwrap_or("en").to_string()),
        content_type: Some("post".to_string()),
        threshold: Some(threshold.unwrap_or(70)),
        ignore: vec!["**/node_modules/**".to_string(), "**/drafts/**".to_string()],
        ..Config::default()
    }
}
