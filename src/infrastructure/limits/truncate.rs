//! Per-post character truncation
//!
//! A unit over the destination cap is cut near the limit, preferring the
//! last sentence terminator or line break inside a trailing window. With
//! no boundary in the window, the cut lands on a word boundary and an
//! ellipsis marks the continuation.

use unicode_segmentation::UnicodeSegmentation;

/// How far back from the limit a sentence boundary is considered.
pub const SENTENCE_WINDOW: usize = 80;

const ELLIPSIS: char = '…';

/// Truncate text to at most `limit` graphemes.
pub fn truncate_post(text: &str, limit: usize) -> String {
    if limit == 0 || grapheme_count(text) <= limit {
        return text.to_string();
    }

    let prefix_end = byte_index_at(text, limit);
    let prefix = &text[..prefix_end];

    if let Some(cut) = last_sentence_boundary(prefix) {
        if within_tail(prefix, cut, SENTENCE_WINDOW) {
            return prefix[..cut].trim_end().to_string();
        }
    }

    // No sensible boundary near the limit; end on a word and mark the cut.
    let word_end = byte_index_at(text, limit.saturating_sub(1));
    let shortened = &text[..word_end];
    let cut = shortened.rfind(' ').unwrap_or(word_end.min(shortened.len()));

    let mut out = shortened[..cut].trim_end().to_string();
    out.push(ELLIPSIS);
    out
}

/// Byte position just after the last `.`, `!`, `?`, or line break.
fn last_sentence_boundary(text: &str) -> Option<usize> {
    text.char_indices()
        .filter(|(_, c)| matches!(c, '.' | '!' | '?' | '\n'))
        .map(|(i, c)| i + c.len_utf8())
        .last()
}

fn within_tail(text: &str, cut: usize, tail: usize) -> bool {
    cut > 0 && grapheme_count(&text[cut..]) <= tail
}

fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

fn byte_index_at(text: &str, chars: usize) -> usize {
    text.grapheme_indices(true)
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
