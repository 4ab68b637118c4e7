//! JSON reporter for machine-readable output

use super::{DocumentReport, SummaryStats};
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a single document as JSON
    pub fn report(&self, document: &DocumentReport) -> String {
        self.to_json(document, "{}")
    }

    /// Report multiple documents as a JSON array
    pub fn report_many(&self, documents: &[DocumentReport]) -> String {
        self.to_json(documents, "[]")
    }

    /// Report with summary
    pub fn report_with_summary(&self, documents: &[DocumentReport], stats: &SummaryStats) -> String {
        let output = JsonOutput {
            results: documents,
            summary: stats,
        };
        self.to_json(&output, "{}")
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.unwrap_or_else(|_| fallback.to_string())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [DocumentReport],
    summary: &'a SummaryStats,
}
