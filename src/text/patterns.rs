//! Regex patterns used by the markup adapters, compiled once per process.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum PatternId {
    /// Markup that only appears in HTML input
    HtmlSniff,
    /// Line-level syntax that marks Markdown input
    MarkdownSniff,
    HtmlAttribute,
    AtxHeading,
    SetextUnderline,
    ThematicBreak,
    ListMarker,
    BlockquoteMarker,
    FenceMarker,
    /// `[text](href)` and `![alt](src)`
    InlineLink,
    /// Paragraph separator in plain text
    BlankLines,
}

impl PatternId {
    const ALL: [PatternId; 11] = [
        PatternId::HtmlSniff,
        PatternId::MarkdownSniff,
        PatternId::HtmlAttribute,
        PatternId::AtxHeading,
        PatternId::SetextUnderline,
        PatternId::ThematicBreak,
        PatternId::ListMarker,
        PatternId::BlockquoteMarker,
        PatternId::FenceMarker,
        PatternId::InlineLink,
        PatternId::BlankLines,
    ];

    fn source(self) -> &'static str {
        match self {
            PatternId::HtmlSniff => {
                r"(?i)</?(?:p|h[1-6]|div|br|a|img|ul|ol|li|strong|em|b|i|span|blockquote|section|article|table|html|body)\b[^>]*>"
            }
            PatternId::MarkdownSniff => {
                r"(?m)^(?:#{1,6}[ \t]|[-*+][ \t]|\d{1,9}[.)][ \t]|>|```|~~~)|!?\[[^\]]*\]\([^)]*\)"
            }
            PatternId::HtmlAttribute => {
                r#"([a-zA-Z][a-zA-Z0-9_:-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>=`]+))"#
            }
            PatternId::AtxHeading => r"^(#{1,6})(?:[ \t]+(.*?))?(?:[ \t]+#+)?[ \t]*$",
            PatternId::SetextUnderline => r"^(?:=+|-+)[ \t]*$",
            PatternId::ThematicBreak => r"^(?:(?:\*[ \t]*){3,}|(?:-[ \t]*){3,}|(?:_[ \t]*){3,})$",
            PatternId::ListMarker => r"^(?:[-*+]|\d{1,9}[.)])[ \t]+",
            PatternId::BlockquoteMarker => r"^>[ \t]?",
            PatternId::FenceMarker => r"^(?:```|~~~)",
            PatternId::InlineLink => {
                r#"(!?)\[([^\]]*)\]\(\s*<?([^)\s>]*)>?(?:\s+["'][^"']*["'])?\s*\)"#
            }
            PatternId::BlankLines => r"\n[ \t\r]*\n(?:[ \t\r]*\n)*",
        }
    }
}

pub(crate) struct PatternCache {
    compiled: Vec<(PatternId, Regex)>,
}

impl PatternCache {
    fn new() -> Self {
        let compiled = PatternId::ALL
            .iter()
            .map(|&id| (id, Regex::new(id.source()).expect("built-in pattern")))
            .collect();
        Self { compiled }
    }

    pub(crate) fn get(&self, id: PatternId) -> &Regex {
        self.compiled
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, regex)| regex)
            .expect("every pattern is compiled")
    }
}

/// Global pattern cache (compile once per process).
pub(crate) fn pattern(id: PatternId) -> &'static Regex {
    static CACHE: OnceLock<PatternCache> = OnceLock::new();
    CACHE.get_or_init(PatternCache::new).get(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        for id in PatternId::ALL {
            let _ = pattern(id);
        }
    }

    #[test]
    fn atx_heading_captures_content() {
        let caps = pattern(PatternId::AtxHeading).captures("## Hello world ##");
        let caps = caps.expect("heading");
        assert_eq!(&caps[1], "##");
        assert_eq!(caps.get(2).map(|m| m.as_str()), Some("Hello world"));
    }

    #[test]
    fn inline_link_captures_text_and_href() {
        let caps = pattern(PatternId::InlineLink)
            .captures("see [the docs](https://example.com \"Docs\") now")
            .expect("link");
        assert_eq!(&caps[1], "");
        assert_eq!(&caps[2], "the docs");
        assert_eq!(&caps[3], "https://example.com");
    }

    #[test]
    fn sniffs_formats() {
        assert!(pattern(PatternId::HtmlSniff).is_match("<p>Hi</p>"));
        assert!(!pattern(PatternId::HtmlSniff).is_match("a < b and c > d"));
        assert!(pattern(PatternId::MarkdownSniff).is_match("# Title\n\nBody"));
        assert!(!pattern(PatternId::MarkdownSniff).is_match("Just words."));
    }
}
