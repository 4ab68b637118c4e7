//! Document files: front matter metadata plus a body, turned into a [`Paper`]

use crate::{parse_synonyms, ContentType, InputFormat, Paper};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const FRONT_MATTER_FENCE: &str = "---";

/// A document read from disk or from an editor buffer
#[derive(Debug, Clone)]
pub struct Document {
    pub paper: Paper,
    /// Content type named in front matter, if any
    pub content_type: Option<ContentType>,
    /// Byte offset of the body in the file; raw paper offsets are relative to it
    pub body_offset: usize,
}

impl Document {
    /// Byte offset in the file for a raw offset into the paper text
    pub fn file_offset(&self, source_offset: usize) -> usize {
        self.body_offset + source_offset
    }
}

/// Read and parse a document file
pub fn read_document(path: &Path) -> Result<Document> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    Ok(parse_document(&raw, Some(path)))
}

/// Parse document contents. The path, when known, picks the input format.
pub fn parse_document(raw: &str, path: Option<&Path>) -> Document {
    let format = path.map(format_for_path).unwrap_or_default();
    let (fields, body_offset) = split_front_matter(raw);

    let mut paper = Paper::new(&raw[body_offset..]).with_format(format);
    let mut content_type = None;
    for (key, value) in fields {
        match key.as_str() {
            "keyphrase" | "focuskeyphrase" => paper = paper.with_keyphrase(value),
            "synonyms" => paper = paper.with_synonyms(parse_synonyms(&value)),
            "title" => paper = paper.with_title(value),
            "description" | "metadescription" => paper = paper.with_description(value),
            "slug" => paper = paper.with_slug(value),
            "url" | "permalink" => paper = paper.with_url(value),
            "locale" | "lang" | "language" => paper = paper.with_locale(value),
            "contenttype" => {
                content_type = ContentType::parse(&value);
                if content_type.is_none() {
                    tracing::warn!(value = %value, "unknown content type in front matter");
                }
            }
            _ => tracing::debug!(key = %key, "ignoring front matter key"),
        }
    }

    Document {
        paper,
        content_type,
        body_offset,
    }
}

/// Input format from a file extension
pub fn format_for_path(path: &Path) -> InputFormat {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html") | Some("htm") => InputFormat::Html,
        Some("md") | Some("markdown") => InputFormat::Markdown,
        _ => InputFormat::Auto,
    }
}

/// Front matter fields (keys lowercased, `_` and `-` dropped) and the body offset.
/// Without a closed front matter block the whole input is body.
fn split_front_matter(raw: &str) -> (Vec<(String, String)>, usize) {
    let mut lines = raw.split_inclusive('\n');
    match lines.next() {
        Some(first) if first.trim_end() == FRONT_MATTER_FENCE => {}
        _ => return (Vec::new(), 0),
    }

    let mut offset = raw.find('\n').map_or(raw.len(), |i| i + 1);
    let mut fields = Vec::new();
    for line in lines {
        offset += line.len();
        let trimmed = line.trim();
        if trimmed == FRONT_MATTER_FENCE {
            return (fields, offset);
        }
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = trimmed.split_once(':') {
            let key: String = key
                .trim()
                .chars()
                .filter(|c| *c != '_' && *c != '-')
                .collect::<String>()
                .to_ascii_lowercase();
            fields.push((key, unquote(value.trim()).to_string()));
        }
    }
    (Vec::new(), 0)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Zero-based line and UTF-16 column of a byte offset, as editors count them
pub fn position_utf16(text: &str, offset: usize) -> (u32, u32) {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &text[..offset];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column: usize = before[line_start..].chars().map(char::len_utf16).sum();
    (line as u32, column as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const POST: &str = "---\nkeyphrase: cat food\nsynonyms: kibble, wet food\ntitle: \"Cat food: a guide\"\nslug: cat-food-guide\ncontent_type: cornerstone\nauthor: someone\n---\n# Cat food\n\nCats need food.\n";

    #[test]
    fn front_matter_fills_the_paper() {
        let document = parse_document(POST, Some(Path::new("post.md")));
        let paper = &document.paper;
        assert_eq!(paper.keyphrase(), "cat food");
        assert_eq!(paper.synonyms(), &["kibble", "wet food"]);
        assert_eq!(paper.title(), "Cat food: a guide");
        assert_eq!(paper.slug(), "cat-food-guide");
        assert_eq!(paper.format(), InputFormat::Markdown);
        assert_eq!(document.content_type, Some(ContentType::Cornerstone));
        assert_eq!(paper.text(), "# Cat food\n\nCats need food.\n");
        assert_eq!(&POST[document.body_offset..], paper.text());
    }

    #[test]
    fn no_front_matter_means_whole_body() {
        let document = parse_document("Just text.", None);
        assert_eq!(document.body_offset, 0);
        assert_eq!(document.paper.text(), "Just text.");
        assert_eq!(document.paper.format(), InputFormat::Auto);
    }

    #[test]
    fn unclosed_front_matter_is_body() {
        let raw = "---\ntitle: x\nno fence";
        let document = parse_document(raw, None);
        assert_eq!(document.body_offset, 0);
        assert_eq!(document.paper.text(), raw);
        assert_eq!(document.paper.title(), "");
    }

    #[test]
    fn crlf_front_matter() {
        let raw = "---\r\nkeyphrase: cats\r\n---\r\nCats purr.";
        let document = parse_document(raw, None);
        assert_eq!(document.paper.keyphrase(), "cats");
        assert_eq!(document.paper.text(), "Cats purr.");
    }

    #[test]
    fn file_offsets_include_front_matter() {
        let document = parse_document(POST, None);
        let at = document.paper.text().find("Cats").unwrap();
        assert_eq!(&POST[document.file_offset(at)..document.file_offset(at) + 4], "Cats");
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(format_for_path(Path::new("a.HTM")), InputFormat::Html);
        assert_eq!(format_for_path(Path::new("a.markdown")), InputFormat::Markdown);
        assert_eq!(format_for_path(Path::new("a.txt")), InputFormat::Auto);
    }

    #[test]
    fn reads_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<p>Hello there.</p>").unwrap();
        let document = read_document(&path).unwrap();
        assert_eq!(document.paper.format(), InputFormat::Html);
        assert!(read_document(&dir.path().join("missing.md")).is_err());
    }

    #[test]
    fn utf16_positions() {
        let text = "ab\nçé😀x";
        assert_eq!(position_utf16(text, 0), (0, 0));
        assert_eq!(position_utf16(text, 3), (1, 0));
        let x = text.find('x').unwrap();
        assert_eq!(position_utf16(text, x), (1, 4));
        assert_eq!(position_utf16(text, 1000), (1, 5));
    }
}
