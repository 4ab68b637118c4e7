//! Config schema and deserialization

use super::Configuration;
use crate::{AssessmentId, CategoryWeights, ContentType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// Assessment switch in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    On,
    /// Disable the assessment entirely
    Off,
}

/// Per-path override configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverride {
    /// Glob patterns this override applies to
    #[serde(default)]
    pub files: Vec<String>,

    /// Content types this override applies to (matches any when empty)
    #[serde(default)]
    pub content_types: Vec<String>,

    /// Optional threshold override for matched documents
    #[serde(default)]
    pub threshold: Option<u8>,

    /// Optional content type for matched documents
    #[serde(default)]
    pub content_type: Option<String>,

    #[serde(default)]
    pub assessments: BTreeMap<String, Toggle>,

    #[serde(default)]
    pub weights: BTreeMap<String, f64>,

    #[serde(default)]
    pub min_words: BTreeMap<String, usize>,
}

/// Root config structure for .seolensrc.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Locale of the documents; front matter and paper locales apply when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// post, page, cornerstone or taxonomy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Minimum overall score (exit 1 if below). Default: 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,

    /// Per-assessment switches. Key is the assessment id in camelCase.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub assessments: BTreeMap<String, Toggle>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub weights: BTreeMap<String, f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_weights: Option<CategoryWeights>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub min_words: BTreeMap<String, usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_content_chars: Option<usize>,

    /// Glob patterns for files/directories to exclude from analysis
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,

    /// File suffixes treated as documents (default: .md, .markdown, .html, .htm, .txt)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub document_patterns: Vec<String>,

    /// Per-path configuration overrides
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<ConfigOverride>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli_threshold: Option<u8>, cli_locale: Option<&str>) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        if let Some(locale) = cli_locale {
            self.locale = Some(locale.to_string());
        }
        self
    }

    /// Resolve the per-pass configuration for a document, applying overrides
    /// in order. `content_type` comes from the document itself and beats the
    /// file-level default but not an override.
    pub fn configuration_for(&self, file_path: &Path, content_type: Option<ContentType>) -> Configuration {
        let base_type = content_type
            .or_else(|| self.content_type.as_deref().map(parse_content_type))
            .unwrap_or_default();

        let mut switches = self.assessments.clone();
        let mut weights = self.weights.clone();
        let mut min_words = self.min_words.clone();
        let mut resolved_type = base_type;
        for override_cfg in self.matching_overrides(file_path, base_type) {
            if let Some(value) = &override_cfg.content_type {
                resolved_type = parse_content_type(value);
            }
            switches.extend(override_cfg.assessments.iter().map(|(k, v)| (k.clone(), *v)));
            weights.extend(override_cfg.weights.iter().map(|(k, v)| (k.clone(), *v)));
            min_words.extend(override_cfg.min_words.iter().map(|(k, v)| (k.clone(), *v)));
        }

        let mut configuration = Configuration::for_content_type(resolved_type);
        if let Some(weights) = self.category_weights {
            configuration = configuration.with_category_weights(weights);
        }
        if let Some(locale) = self.locale.as_deref().filter(|l| !l.trim().is_empty()) {
            configuration = configuration.with_locale(locale);
        }
        if let Some(chars) = self.min_content_chars {
            configuration = configuration.with_min_content_chars(chars);
        }
        for (key, toggle) in &switches {
            if let (Some(id), Toggle::Off) = (parse_id(key), toggle) {
                configuration = configuration.with_disabled(id);
            }
        }
        for (key, weight) in &weights {
            if let Some(id) = parse_id(key) {
                if weight.is_finite() && *weight > 0.0 {
                    configuration = configuration.with_weight(id, *weight);
                } else {
                    tracing::warn!(assessment = %id, weight, "ignoring non-positive weight");
                }
            }
        }
        for (key, words) in &min_words {
            if let Some(id) = parse_id(key) {
                configuration = configuration.with_min_words(id, *words);
            }
        }
        configuration
    }

    /// Threshold for a document, after overrides
    pub fn threshold_for(&self, file_path: &Path, content_type: Option<ContentType>) -> Option<u8> {
        let base_type = content_type
            .or_else(|| self.content_type.as_deref().map(parse_content_type))
            .unwrap_or_default();
        self.matching_overrides(file_path, base_type)
            .filter_map(|o| o.threshold)
            .last()
            .or(self.threshold)
    }

    fn matching_overrides<'a>(
        &'a self,
        file_path: &'a Path,
        content_type: ContentType,
    ) -> impl Iterator<Item = &'a ConfigOverride> + 'a {
        self.overrides.iter().filter(move |o| {
            let files_match = o.files.is_empty() || Self::matches_override(file_path, &o.files);
            let type_match = o.content_types.is_empty()
                || o.content_types
                    .iter()
                    .any(|t| ContentType::parse(t) == Some(content_type));
            files_match && type_match
        })
    }

    /// Check if a file path matches any of the override patterns
    fn matches_override(file_path: &Path, patterns: &[String]) -> bool {
        let path_str = file_path.to_string_lossy();
        for pattern in patterns {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(file_path)
                    || path_str.contains(pattern.trim_start_matches("**/"))
                {
                    return true;
                }
            }
        }
        false
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values are overridden by this config's values
        if self.locale.is_none() {
            self.locale = base.locale;
        }
        if self.content_type.is_none() {
            self.content_type = base.content_type;
        }
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.category_weights.is_none() {
            self.category_weights = base.category_weights;
        }
        if self.min_content_chars.is_none() {
            self.min_content_chars = base.min_content_chars;
        }

        for (id, toggle) in base.assessments {
            self.assessments.entry(id).or_insert(toggle);
        }
        for (id, weight) in base.weights {
            self.weights.entry(id).or_insert(weight);
        }
        for (id, words) in base.min_words {
            self.min_words.entry(id).or_insert(words);
        }

        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        if self.document_patterns.is_empty() {
            self.document_patterns = base.document_patterns;
        }

        // Prepend base overrides
        let mut all_overrides = base.overrides;
        all_overrides.append(&mut self.overrides);
        self.overrides = all_overrides;
    }

    /// Assessment ids in the file and its overrides that name no assessment
    pub fn unknown_keys(&self) -> Vec<String> {
        let ids = self
            .assessments
            .keys()
            .chain(self.weights.keys())
            .chain(self.min_words.keys())
            .chain(self.overrides.iter().flat_map(|o| {
                o.assessments.keys().chain(o.weights.keys()).chain(o.min_words.keys())
            }));
        let mut unknown: Vec<String> = ids
            .filter(|k| AssessmentId::from_str(k).is_err())
            .cloned()
            .collect();
        unknown.sort();
        unknown.dedup();
        unknown
    }

    /// Get document file suffixes
    pub fn get_document_patterns(&self) -> Vec<&str> {
        if self.document_patterns.is_empty() {
            vec![".md", ".markdown", ".html", ".htm", ".txt"]
        } else {
            self.document_patterns.iter().map(|s| s.as_str()).collect()
        }
    }

    /// Whether a path looks like a document
    pub fn is_document(&self, path: &Path) -> bool {
        let name = path.to_string_lossy().to_ascii_lowercase();
        self.get_document_patterns()
            .iter()
            .any(|suffix| name.ends_with(&suffix.to_ascii_lowercase()))
    }
}

fn parse_id(key: &str) -> Option<AssessmentId> {
    match AssessmentId::from_str(key) {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::debug!(key, "ignoring unknown assessment in config");
            None
        }
    }
}

fn parse_content_type(value: &str) -> ContentType {
    ContentType::parse(value).unwrap_or_else(|| {
        tracing::warn!(value, "unknown content type, using post");
        ContentType::Post
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Config {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn resolves_switches_weights_and_min_words() {
        let config = parse(
            r#"{
                "locale": "de",
                "assessments": { "passiveVoice": "off", "images": "on" },
                "weights": { "keyphraseDensity": 2.5, "textLength": -1 },
                "minWords": { "textLength": 10 },
                "minContentChars": 20
            }"#,
        );
        let configuration = config.configuration_for(Path::new("post.md"), None);
        assert_eq!(configuration.locale.as_deref(), Some("de"));
        assert!(!configuration.is_enabled(AssessmentId::PassiveVoice));
        assert!(configuration.is_enabled(AssessmentId::Images));
        assert_eq!(configuration.weight(AssessmentId::KeyphraseDensity), 2.5);
        assert_eq!(configuration.weight(AssessmentId::TextLength), 1.0);
        assert_eq!(configuration.min_words_for(AssessmentId::TextLength, 0), 10);
        assert_eq!(configuration.min_content_chars, 20);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let config = parse(r#"{ "assessments": { "readMyMind": "off" }, "weights": { "nope": 3 } }"#);
        let configuration = config.configuration_for(Path::new("a.md"), None);
        assert!(configuration.disabled.is_empty());
        assert!(configuration.weights.is_empty());
        assert_eq!(config.unknown_keys(), vec!["nope".to_string(), "readMyMind".to_string()]);
    }

    #[test]
    fn unknown_content_type_falls_back_to_post() {
        let config = parse(r#"{ "contentType": "landing" }"#);
        let configuration = config.configuration_for(Path::new("a.md"), None);
        assert_eq!(configuration.content_type, ContentType::Post);
    }

    #[test]
    fn document_content_type_beats_file_default() {
        let config = parse(r#"{ "contentType": "page" }"#);
        let configuration = config.configuration_for(Path::new("a.md"), Some(ContentType::Cornerstone));
        assert_eq!(configuration.content_type, ContentType::Cornerstone);
        assert!(configuration.is_cornerstone());
        assert_eq!(
            config.configuration_for(Path::new("a.md"), None).content_type,
            ContentType::Page
        );
    }

    #[test]
    fn overrides_apply_by_path_and_content_type() {
        let config = parse(
            r#"{
                "threshold": 70,
                "overrides": [
                    {
                        "files": ["**/archive/**"],
                        "threshold": 40,
                        "assessments": { "textLength": "off" }
                    },
                    {
                        "contentTypes": ["taxonomy"],
                        "weights": { "textLength": 3 }
                    },
                    {
                        "files": ["docs/pillars/*.md"],
                        "contentType": "cornerstone"
                    }
                ]
            }"#,
        );

        let regular = Path::new("blog/cats.md");
        assert_eq!(config.threshold_for(regular, None), Some(70));
        assert!(config.configuration_for(regular, None).is_enabled(AssessmentId::TextLength));

        let archived = Path::new("blog/archive/old.md");
        assert_eq!(config.threshold_for(archived, None), Some(40));
        assert!(!config.configuration_for(archived, None).is_enabled(AssessmentId::TextLength));

        let taxonomy = config.configuration_for(regular, Some(ContentType::Taxonomy));
        assert_eq!(taxonomy.weight(AssessmentId::TextLength), 3.0);

        let pillar = config.configuration_for(Path::new("docs/pillars/cats.md"), None);
        assert_eq!(pillar.content_type, ContentType::Cornerstone);
    }

    #[test]
    fn merge_keeps_own_values_first() {
        let mut child = parse(r#"{ "threshold": 80, "weights": { "images": 2 }, "ignore": ["b/**"] }"#);
        let base = parse(
            r#"{ "threshold": 50, "locale": "es", "weights": { "images": 5, "textLength": 2 }, "ignore": ["a/**"] }"#,
        );
        child.merge_from(base);
        assert_eq!(child.threshold, Some(80));
        assert_eq!(child.locale.as_deref(), Some("es"));
        assert_eq!(child.weights.get("images"), Some(&2.0));
        assert_eq!(child.weights.get("textLength"), Some(&2.0));
        assert_eq!(child.ignore, vec!["a/**".to_string(), "b/**".to_string()]);
    }

    #[test]
    fn cli_values_win() {
        let config = parse(r#"{ "threshold": 80, "locale": "en" }"#).merge_with_cli(Some(30), Some("de"));
        assert_eq!(config.threshold, Some(30));
        assert_eq!(config.locale.as_deref(), Some("de"));
    }

    #[test]
    fn default_document_patterns() {
        let config = Config::default();
        assert!(config.is_document(Path::new("posts/cats.MD")));
        assert!(config.is_document(Path::new("index.html")));
        assert!(!config.is_document(Path::new("main.rs")));
        let custom = parse(r#"{ "documentPatterns": [".mdx"] }"#);
        assert!(custom.is_document(Path::new("a.mdx")));
        assert!(!custom.is_document(Path::new("a.md")));
    }
}
