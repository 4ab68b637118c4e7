//! Sentence boundary detection within a single block

use crate::language::LanguagePack;
use std::ops::Range;

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…' | '。' | '！' | '？' | '؟' | '।')
}

/// Full-width terminators end a sentence even without following whitespace
fn is_ideographic_terminator(c: char) -> bool {
    matches!(c, '。' | '！' | '？')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | '”' | '’' | '»' | ')' | ']' | '」' | '』')
}

fn is_opening(c: char) -> bool {
    matches!(c, '"' | '\'' | '“' | '‘' | '«' | '(' | '[' | '¿' | '¡' | '「' | '『')
}

/// Whether a character can start a new sentence after a terminator
fn starts_sentence(c: char) -> bool {
    c.is_uppercase() || c.is_numeric() || is_opening(c) || (c.is_alphabetic() && !c.is_lowercase())
}

/// Whether the period at `dot` closes an abbreviation or an initial
fn closes_abbreviation(chars: &[(usize, char)], text: &str, dot: usize, pack: &LanguagePack) -> bool {
    let mut k = dot;
    while k > 0 {
        let prev = chars[k - 1].1;
        let inner_dot = prev == '.' && k >= 2 && chars[k - 2].1.is_alphanumeric();
        if prev.is_alphanumeric() || inner_dot {
            k -= 1;
        } else {
            break;
        }
    }
    if k == dot {
        return false;
    }
    let word = &text[chars[k].0..chars[dot].0];
    let mut letters = word.chars();
    if let (Some(only), None) = (letters.next(), letters.next()) {
        // "J. R. R. Tolkien"
        return only.is_uppercase();
    }
    let lower = word.to_lowercase();
    if pack.is_abbreviation(&lower) {
        return true;
    }
    // Dotted acronyms such as "U.S" or "e.g"
    lower.contains('.') && lower.split('.').all(|part| part.chars().count() == 1)
}

/// Split a block's text into sentence ranges relative to the block.
///
/// The ranges tile `text`: whitespace after a terminator belongs to the sentence
/// it follows.
pub fn split_sentences(text: &str, pack: &LanguagePack) -> Vec<Range<usize>> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map(|(b, _)| *b).unwrap_or(text.len());
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i].1;
        if !is_terminator(c) {
            i += 1;
            continue;
        }
        let mut j = i;
        while j < chars.len() && is_terminator(chars[j].1) {
            j += 1;
        }
        let single_period = c == '.' && j - i == 1;
        let ideographic = is_ideographic_terminator(chars[j - 1].1);
        while j < chars.len() && is_closing(chars[j].1) {
            j += 1;
        }

        let boundary = if ideographic || j == chars.len() {
            true
        } else if !chars[j].1.is_whitespace() {
            false
        } else {
            let mut k = j;
            while k < chars.len() && chars[k].1.is_whitespace() {
                k += 1;
            }
            if k == chars.len() {
                true
            } else {
                starts_sentence(chars[k].1)
                    && !(single_period && closes_abbreviation(&chars, text, i, pack))
            }
        };

        if boundary {
            let mut k = j;
            while k < chars.len() && chars[k].1.is_whitespace() {
                k += 1;
            }
            let end = byte_at(k);
            ranges.push(start..end);
            start = end;
            i = k;
        } else {
            i = j;
        }
    }

    if start < text.len() {
        if text[start..].trim().is_empty() {
            if let Some(last) = ranges.last_mut() {
                last.end = text.len();
            } else {
                ranges.push(start..text.len());
            }
        } else {
            ranges.push(start..text.len());
        }
    }
    ranges
}
