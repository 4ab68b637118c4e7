//! Word/punctuation/whitespace tokenization

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    Word,
    Punctuation,
    Whitespace,
}

/// A token as a byte range into the model text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Ideographs and kana are words on their own; scripts written without spaces
/// would otherwise produce one giant word per sentence.
pub fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2A6DF}')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() && !is_cjk(c)
}

/// Characters that stay inside a word when letters or digits surround them
fn joins_word(prev: char, c: char, next: char) -> bool {
    match c {
        '\'' | '’' | '-' | '‐' => is_word_char(prev) && is_word_char(next),
        '.' | ',' => prev.is_ascii_digit() && next.is_ascii_digit(),
        _ => false,
    }
}

/// Split `text` into tokens whose offsets are shifted by `base`.
///
/// Tokens tile the input: concatenating them in order reproduces it exactly.
pub fn tokenize(text: &str, base: usize) -> Vec<Token> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map(|(b, _)| *b).unwrap_or(text.len());
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i].1;
        let (kind, j) = if c.is_whitespace() {
            let mut j = i + 1;
            while j < chars.len() && chars[j].1.is_whitespace() {
                j += 1;
            }
            (TokenKind::Whitespace, j)
        } else if is_cjk(c) {
            (TokenKind::Word, i + 1)
        } else if is_word_char(c) {
            let mut j = i + 1;
            loop {
                if j < chars.len() && is_word_char(chars[j].1) {
                    j += 1;
                } else if j + 1 < chars.len()
                    && joins_word(chars[j - 1].1, chars[j].1, chars[j + 1].1)
                {
                    j += 2;
                } else {
                    break;
                }
            }
            (TokenKind::Word, j)
        } else {
            (TokenKind::Punctuation, i + 1)
        };
        tokens.push(Token {
            kind,
            start: base + byte_at(i),
            end: base + byte_at(j),
        });
        i = j;
    }
    tokens
}

/// Lowercase form used for all word comparisons
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase().replace('’', "'")
}

/// Normalized words of a phrase, in order
pub fn words_of(phrase: &str) -> Vec<String> {
    tokenize(phrase, 0)
        .iter()
        .filter(|t| t.is_word())
        .map(|t| normalize_word(t.as_str(phrase)))
        .collect()
}
