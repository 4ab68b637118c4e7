//! Markup adapters: HTML, Markdown and plain text to flat blocks.
//!
//! Every adapter feeds an [`Emitter`], which collapses whitespace, assembles the
//! block texts into the model text and records how plain offsets map back to the
//! raw input.

use super::patterns::{pattern, PatternId};
use super::{Block, BlockKind, Image, Link, OffsetMap, Segment};
use std::ops::Range;

/// Markup the HTML adapter cannot recover from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Malformed;

/// Adapter output before sentence splitting
#[derive(Debug, Default)]
pub(crate) struct Markup {
    pub text: String,
    pub blocks: Vec<Block>,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    pub offsets: OffsetMap,
}

struct OpenLink {
    href: String,
    nofollow: bool,
    start: Option<usize>,
}

/// Incremental builder for [`Markup`]
pub(crate) struct Emitter {
    out: Markup,
    buf: String,
    segments: Vec<Segment>,
    kind: BlockKind,
    pending_space: Option<(usize, usize)>,
    links: Vec<Link>,
    open_link: Option<OpenLink>,
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            out: Markup::default(),
            buf: String::new(),
            segments: Vec::new(),
            kind: BlockKind::Paragraph,
            pending_space: None,
            links: Vec::new(),
            open_link: None,
        }
    }

    pub fn set_kind(&mut self, kind: BlockKind) {
        self.kind = kind;
    }

    pub fn has_content(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Raw text copied verbatim, whitespace runs collapsed to one space
    pub fn text(&mut self, s: &str, source: usize) {
        let mut run_start = None;
        for (i, c) in s.char_indices() {
            if c.is_whitespace() {
                if let Some(rs) = run_start.take() {
                    self.content(&s[rs..i], source + rs, i - rs);
                }
                self.whitespace(source + i, c.len_utf8());
            } else if run_start.is_none() {
                run_start = Some(i);
            }
        }
        if let Some(rs) = run_start {
            self.content(&s[rs..], source + rs, s.len() - rs);
        }
    }

    /// Text that differs from its source span, such as a decoded entity
    pub fn decoded(&mut self, s: &str, source: Range<usize>) {
        if s.chars().all(char::is_whitespace) {
            self.whitespace(source.start, source.len());
        } else {
            self.content(s, source.start, source.len());
        }
    }

    /// A line break or similar element that separates words
    pub fn space(&mut self, source: Range<usize>) {
        self.whitespace(source.start, source.len());
    }

    fn whitespace(&mut self, source: usize, len: usize) {
        if self.buf.is_empty() {
            return;
        }
        match &mut self.pending_space {
            Some((start, pending)) if *start + *pending == source => *pending += len,
            Some(_) => {}
            None => self.pending_space = Some((source, len)),
        }
    }

    fn content(&mut self, s: &str, source: usize, source_len: usize) {
        if let Some((space_at, space_len)) = self.pending_space.take() {
            self.push_segment(" ", space_at, space_len);
        }
        if let Some(link) = &mut self.open_link {
            link.start.get_or_insert(self.buf.len());
        }
        self.push_segment(s, source, source_len);
    }

    fn push_segment(&mut self, plain: &str, source: usize, source_len: usize) {
        self.segments.push(Segment {
            plain: self.buf.len(),
            plain_len: plain.len(),
            source,
            source_len,
        });
        self.buf.push_str(plain);
    }

    pub fn open_link(&mut self, href: String, nofollow: bool) {
        self.close_link();
        self.open_link = Some(OpenLink {
            href,
            nofollow,
            start: None,
        });
    }

    pub fn close_link(&mut self) {
        if let Some(link) = self.open_link.take() {
            let start = link.start.unwrap_or(self.buf.len());
            let end = self.buf.len();
            self.links.push(Link {
                href: link.href,
                text: self.buf[start..end].to_string(),
                nofollow: link.nofollow,
                start,
                end,
            });
        }
    }

    pub fn image(&mut self, src: String, alt: String) {
        self.out.images.push(Image { src, alt });
    }

    /// Commit the current block, if it has any text
    pub fn end_block(&mut self) {
        self.close_link();
        self.pending_space = None;
        let kind = std::mem::replace(&mut self.kind, BlockKind::Paragraph);

        if self.buf.is_empty() {
            // Anchors without text (around an image, say) still count as links
            let at = self.out.text.len();
            for mut link in self.links.drain(..) {
                link.start = at;
                link.end = at;
                self.out.links.push(link);
            }
            self.segments.clear();
            return;
        }

        if !self.out.text.is_empty() {
            self.out.text.push_str("\n\n");
        }
        let base = self.out.text.len();
        let source = match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => first.source..last.source + last.source_len,
            _ => 0..0,
        };
        for mut segment in self.segments.drain(..) {
            segment.plain += base;
            self.out.offsets.push(segment);
        }
        for mut link in self.links.drain(..) {
            link.start += base;
            link.end += base;
            self.out.links.push(link);
        }
        self.out.blocks.push(Block {
            kind,
            range: base..base + self.buf.len(),
            source,
            sentences: 0..0,
        });
        self.out.text.push_str(&self.buf);
        self.buf.clear();
    }

    pub fn finish(mut self) -> Markup {
        self.end_block();
        self.out
    }
}

/// Whole input as a single paragraph; used when HTML cannot be scanned
pub(crate) fn single_paragraph(raw: &str) -> Markup {
    let mut emitter = Emitter::new();
    emitter.text(raw, 0);
    emitter.finish()
}

// ---------------------------------------------------------------------------
// Plain text
// ---------------------------------------------------------------------------

/// Blank lines separate paragraphs; everything else is running text
pub(crate) fn scan_plain(raw: &str) -> Markup {
    let mut emitter = Emitter::new();
    let mut last = 0;
    for separator in pattern(PatternId::BlankLines).find_iter(raw) {
        emitter.text(&raw[last..separator.start()], last);
        emitter.end_block();
        last = separator.end();
    }
    emitter.text(&raw[last..], last);
    emitter.finish()
}

// ---------------------------------------------------------------------------
// HTML
// ---------------------------------------------------------------------------

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "blockquote", "section", "article", "header", "footer",
    "aside", "main", "nav", "figure", "figcaption", "table", "thead", "tbody", "tfoot", "tr",
    "td", "th", "caption", "pre", "dl", "dt", "dd", "hr", "form", "address", "details",
    "summary", "body", "html",
];

/// Elements whose content is never prose
const SKIPPED_TAGS: &[&str] = &["script", "style", "head", "noscript", "template", "svg"];

struct Tag<'a> {
    name: String,
    closing: bool,
    attributes: &'a str,
}

impl Tag<'_> {
    fn attribute(&self, wanted: &str) -> Option<String> {
        pattern(PatternId::HtmlAttribute)
            .captures_iter(self.attributes)
            .find(|caps| caps[1].eq_ignore_ascii_case(wanted))
            .and_then(|caps| caps.get(2).or(caps.get(3)).or(caps.get(4)))
            .map(|m| decode_entities(m.as_str()))
    }

    fn heading_level(&self) -> Option<u8> {
        let bytes = self.name.as_bytes();
        match bytes {
            [b'h', level @ b'1'..=b'6'] => Some(level - b'0'),
            _ => None,
        }
    }
}

/// Byte offset of the `>` closing the tag that opens at `start`, skipping quoted values
fn tag_end(raw: &str, start: usize) -> Option<usize> {
    let mut quote = None;
    for (i, c) in raw[start + 1..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return Some(start + 1 + i),
            (None, _) => {}
        }
    }
    None
}

fn parse_tag(inner: &str) -> Tag<'_> {
    let (closing, rest) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };
    let name_len = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    Tag {
        name: rest[..name_len].to_ascii_lowercase(),
        closing,
        attributes: &rest[name_len..],
    }
}

fn named_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "mdash" => "—",
        "ndash" => "–",
        "hellip" => "…",
        "lsquo" => "‘",
        "rsquo" => "’",
        "ldquo" => "“",
        "rdquo" => "”",
        "laquo" => "«",
        "raquo" => "»",
        "copy" => "©",
        "reg" => "®",
        "trade" => "™",
        "euro" => "€",
        "iexcl" => "¡",
        "iquest" => "¿",
        _ => return None,
    })
}

fn decode_entity(name: &str) -> Option<String> {
    if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse().ok()?,
        };
        let c = char::from_u32(code)?;
        return Some(if c == '\u{a0}' { ' ' } else { c }.to_string());
    }
    named_entity(name).map(str::to_string)
}

/// Entity at `amp` (the `&`), as decoded text and the byte past its `;`
fn entity_at(raw: &str, amp: usize) -> Option<(String, usize)> {
    let after = &raw[amp + 1..];
    let semi = after
        .char_indices()
        .take(12)
        .find(|(_, c)| *c == ';')
        .map(|(i, _)| i)?;
    let decoded = decode_entity(&after[..semi])?;
    Some((decoded, amp + 1 + semi + 1))
}

/// Decode entities in an attribute value
pub(crate) fn decode_entities(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut i = 0;
    while let Some(rel) = value[i..].find('&') {
        let amp = i + rel;
        out.push_str(&value[i..amp]);
        match entity_at(value, amp) {
            Some((decoded, next)) => {
                out.push_str(&decoded);
                i = next;
            }
            None => {
                out.push('&');
                i = amp + 1;
            }
        }
    }
    out.push_str(&value[i..]);
    out
}

/// Byte offset of `needle` at or after `from`, ignoring ASCII case
fn find_ascii_case_insensitive(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let needle = needle.as_bytes();
    if needle.is_empty() {
        return Some(from);
    }
    haystack.as_bytes()[from..]
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|i| from + i)
}

/// Tolerant HTML scanner. Unterminated tags, comments or raw-text elements are
/// reported as [`Malformed`].
pub(crate) fn scan_html(raw: &str) -> Result<Markup, Malformed> {
    let mut emitter = Emitter::new();
    let mut i = 0;

    while i < raw.len() {
        let rest = &raw[i..];
        if rest.starts_with("<!--") {
            let close = raw[i + 4..].find("-->").ok_or(Malformed)?;
            i = i + 4 + close + 3;
            continue;
        }
        if rest.starts_with('<') {
            let opens_tag = rest[1..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'));
            if !opens_tag {
                emitter.text("<", i);
                i += 1;
                continue;
            }
            let end = tag_end(raw, i).ok_or(Malformed)?;
            let tag = parse_tag(raw[i + 1..end].trim_end_matches('/'));
            let next = end + 1;

            if tag.name.is_empty() {
                // <!DOCTYPE ...> and <?xml ...?>
                i = next;
                continue;
            }
            if !tag.closing && SKIPPED_TAGS.contains(&tag.name.as_str()) {
                let close_tag = format!("</{}", tag.name);
                let close = find_ascii_case_insensitive(raw, &close_tag, next).ok_or(Malformed)?;
                i = tag_end(raw, close).ok_or(Malformed)? + 1;
                continue;
            }
            handle_tag(&mut emitter, &tag, i..next);
            i = next;
            continue;
        }
        if rest.starts_with('&') {
            match entity_at(raw, i) {
                Some((decoded, next)) => {
                    emitter.decoded(&decoded, i..next);
                    i = next;
                }
                None => {
                    emitter.text("&", i);
                    i += 1;
                }
            }
            continue;
        }
        let run = rest.find(['<', '&']).unwrap_or(rest.len());
        emitter.text(&rest[..run], i);
        i += run;
    }

    Ok(emitter.finish())
}

fn handle_tag(emitter: &mut Emitter, tag: &Tag<'_>, span: Range<usize>) {
    if let Some(level) = tag.heading_level() {
        emitter.end_block();
        if !tag.closing {
            emitter.set_kind(BlockKind::Heading(level));
        }
        return;
    }
    match tag.name.as_str() {
        "br" => emitter.space(span),
        "a" if tag.closing => emitter.close_link(),
        "a" => {
            let href = tag.attribute("href").unwrap_or_default();
            let nofollow = tag
                .attribute("rel")
                .is_some_and(|rel| rel.split_whitespace().any(|r| r.eq_ignore_ascii_case("nofollow")));
            emitter.open_link(href, nofollow);
        }
        "img" => {
            let src = tag.attribute("src").unwrap_or_default();
            let alt = tag.attribute("alt").unwrap_or_default();
            emitter.image(src, alt);
        }
        "li" => {
            emitter.end_block();
            if !tag.closing {
                emitter.set_kind(BlockKind::ListItem);
            }
        }
        name if BLOCK_TAGS.contains(&name) => emitter.end_block(),
        // Inline formatting separates nothing
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Markdown
// ---------------------------------------------------------------------------

/// Lines of `raw` with their byte offsets, without line terminators
fn lines_with_offsets(raw: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    raw.split('\n').map(move |line| {
        let start = offset;
        offset += line.len() + 1;
        (start, line.strip_suffix('\r').unwrap_or(line))
    })
}

/// Line-oriented Markdown adapter: ATX and setext headings, list items, block
/// quotes and fenced code (skipped). Inline links and images are extracted,
/// emphasis markers dropped.
pub(crate) fn scan_markdown(raw: &str) -> Markup {
    let mut emitter = Emitter::new();
    let mut in_fence = false;
    let mut paragraph_lines = 0;

    for (offset, line) in lines_with_offsets(raw) {
        let indent = line.len() - line.trim_start().len();
        let trimmed = line.trim_start();
        let at = offset + indent;

        if pattern(PatternId::FenceMarker).is_match(trimmed) {
            emitter.end_block();
            paragraph_lines = 0;
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if trimmed.is_empty() {
            emitter.end_block();
            paragraph_lines = 0;
            continue;
        }
        if let Some(caps) = pattern(PatternId::AtxHeading).captures(trimmed) {
            emitter.end_block();
            emitter.set_kind(BlockKind::Heading(caps[1].len() as u8));
            if let Some(content) = caps.get(2) {
                inline(&mut emitter, content.as_str(), at + content.start());
            }
            emitter.end_block();
            paragraph_lines = 0;
            continue;
        }
        if paragraph_lines > 0 && pattern(PatternId::SetextUnderline).is_match(trimmed) {
            let level = if trimmed.starts_with('=') { 1 } else { 2 };
            emitter.set_kind(BlockKind::Heading(level));
            emitter.end_block();
            paragraph_lines = 0;
            continue;
        }
        if pattern(PatternId::ThematicBreak).is_match(trimmed) {
            emitter.end_block();
            paragraph_lines = 0;
            continue;
        }
        if let Some(marker) = pattern(PatternId::ListMarker).find(trimmed) {
            emitter.end_block();
            emitter.set_kind(BlockKind::ListItem);
            inline(&mut emitter, &trimmed[marker.end()..], at + marker.end());
            paragraph_lines = 1;
            continue;
        }
        let (content, content_at) = match pattern(PatternId::BlockquoteMarker).find(trimmed) {
            Some(marker) => (&trimmed[marker.end()..], at + marker.end()),
            None => (trimmed, at),
        };
        if emitter.has_content() {
            emitter.space(offset.saturating_sub(1)..offset);
        }
        inline(&mut emitter, content, content_at);
        paragraph_lines += 1;
    }

    emitter.finish()
}

/// Inline Markdown: links, images, emphasis markers, code spans, escapes
fn inline(emitter: &mut Emitter, line: &str, at: usize) {
    let mut last = 0;
    for caps in pattern(PatternId::InlineLink).captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        plain_inline(emitter, &line[last..whole.start()], at + last);
        let label = caps.get(2).map_or("", |m| m.as_str());
        let target = caps.get(3).map_or("", |m| m.as_str()).to_string();
        if caps[1].is_empty() {
            emitter.open_link(target, false);
            if let Some(text) = caps.get(2) {
                plain_inline(emitter, text.as_str(), at + text.start());
            }
            emitter.close_link();
        } else {
            emitter.image(target, strip_emphasis(label));
        }
        last = whole.end();
    }
    plain_inline(emitter, &line[last..], at + last);
}

fn is_marker(prev: Option<char>, c: char, next: Option<char>) -> bool {
    match c {
        '*' | '`' => true,
        // snake_case stays intact
        '_' => !(prev.is_some_and(char::is_alphanumeric) && next.is_some_and(char::is_alphanumeric)),
        _ => false,
    }
}

/// Emit `text` without emphasis markers, keeping verbatim runs mapped to the source
fn plain_inline(emitter: &mut Emitter, text: &str, at: usize) {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut run_start = 0;
    let mut i = 0;
    while i < chars.len() {
        let (byte, c) = chars[i];
        let prev = i.checked_sub(1).map(|p| chars[p].1);
        let next = chars.get(i + 1).map(|(_, n)| *n);
        if c == '\\' && next.is_some_and(|n| n.is_ascii_punctuation()) {
            emitter.text(&text[run_start..byte], at + run_start);
            run_start = byte + 1;
            i += 2;
            continue;
        }
        if is_marker(prev, c, next) {
            emitter.text(&text[run_start..byte], at + run_start);
            run_start = byte + c.len_utf8();
        }
        i += 1;
    }
    emitter.text(&text[run_start..], at + run_start);
}

fn strip_emphasis(label: &str) -> String {
    label.chars().filter(|c| !matches!(c, '*' | '`')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_texts(markup: &Markup) -> Vec<(&str, BlockKind)> {
        markup
            .blocks
            .iter()
            .map(|b| (&markup.text[b.range.clone()], b.kind))
            .collect()
    }

    #[test]
    fn html_blocks_and_headings() {
        let markup = scan_html("<h1>Title</h1><p>First  para.</p>\n<p>Second <b>bold</b> para.</p>")
            .expect("well formed");
        assert_eq!(
            block_texts(&markup),
            vec![
                ("Title", BlockKind::Heading(1)),
                ("First para.", BlockKind::Paragraph),
                ("Second bold para.", BlockKind::Paragraph),
            ]
        );
        assert_eq!(markup.text, "Title\n\nFirst para.\n\nSecond bold para.");
    }

    #[test]
    fn html_links_and_images() {
        let markup = scan_html(
            r#"<p>Read <a href="/about" rel="nofollow noopener">about us</a> now.<img src="a.png" alt="A &amp; B"></p>"#,
        )
        .expect("well formed");
        assert_eq!(markup.links.len(), 1);
        let link = &markup.links[0];
        assert_eq!(link.href, "/about");
        assert!(link.nofollow);
        assert_eq!(link.text, "about us");
        assert_eq!(&markup.text[link.start..link.end], "about us");
        assert_eq!(markup.images.len(), 1);
        assert_eq!(markup.images[0].alt, "A & B");
    }

    #[test]
    fn html_entities_are_decoded() {
        let markup = scan_html("<p>Fish &amp; chips&nbsp;&#8212; &#x27;yum&#39;</p>").expect("well formed");
        assert_eq!(markup.text, "Fish & chips — 'yum'");
    }

    #[test]
    fn html_skips_scripts_and_comments() {
        let markup = scan_html("<p>Keep<!-- drop --> this</p><script>var x = '<p>';</script>").expect("well formed");
        assert_eq!(markup.text, "Keep this");
    }

    #[test]
    fn unterminated_tag_is_malformed() {
        assert_eq!(scan_html("<p>Broken <a href=\"x").err(), Some(Malformed));
        assert_eq!(scan_html("<p>Open comment <!-- never closed").err(), Some(Malformed));
    }

    #[test]
    fn stray_angle_bracket_is_text() {
        let markup = scan_html("<p>a < b</p>").expect("well formed");
        assert_eq!(markup.text, "a < b");
    }

    #[test]
    fn markdown_structure() {
        let raw = "# Title\n\nIntro line one\nline two.\n\n- item *one*\n- item two\n\nSub\n---\n\n```\ncode here\n```\nAfter.";
        let markup = scan_markdown(raw);
        assert_eq!(
            block_texts(&markup),
            vec![
                ("Title", BlockKind::Heading(1)),
                ("Intro line one line two.", BlockKind::Paragraph),
                ("item one", BlockKind::ListItem),
                ("item two", BlockKind::ListItem),
                ("Sub", BlockKind::Heading(2)),
                ("After.", BlockKind::Paragraph),
            ]
        );
    }

    #[test]
    fn markdown_links_and_images() {
        let markup = scan_markdown("See [the **docs**](https://example.com) and ![a cat](cat.png).");
        assert_eq!(markup.text, "See the docs and .");
        assert_eq!(markup.links[0].href, "https://example.com");
        assert_eq!(markup.links[0].text, "the docs");
        assert_eq!(markup.images[0].src, "cat.png");
        assert_eq!(markup.images[0].alt, "a cat");
    }

    #[test]
    fn markdown_keeps_snake_case() {
        let markup = scan_markdown("Use my_var and _this_.");
        assert_eq!(markup.text, "Use my_var and this.");
    }

    #[test]
    fn plain_paragraphs_split_on_blank_lines() {
        let markup = scan_plain("One\ntwo.\n\n\n  Three.  ");
        assert_eq!(markup.text, "One two.\n\nThree.");
        assert_eq!(markup.blocks.len(), 2);
        assert_eq!(markup.blocks[1].source, 13..19);
    }

    #[test]
    fn finds_closing_tags_in_any_case() {
        let raw = "<SCRIPT>x</ScRiPt><p>é</p></script>";
        assert_eq!(find_ascii_case_insensitive(raw, "</script", 0), Some(9));
        assert_eq!(find_ascii_case_insensitive(raw, "</script", 10), Some(raw.len() - 9));
        assert_eq!(find_ascii_case_insensitive(raw, "</style", 0), None);
        assert_eq!(find_ascii_case_insensitive("ab", "abc", 0), None);
    }

    #[test]
    fn single_paragraph_ignores_structure() {
        let markup = single_paragraph("<p>One\n\nTwo");
        assert_eq!(markup.blocks.len(), 1);
        assert_eq!(markup.text, "<p>One Two");
    }
}
