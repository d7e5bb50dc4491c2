//! Lossless chunking for capped rich-text fields
//!
//! Greedy: take the largest prefix under the cap, preferring to cut at the
//! last paragraph break near the end of the window, then a line break, then
//! a space, then a hard cut. Cuts keep every character, so concatenating
//! the chunks reproduces the input exactly.

use unicode_segmentation::UnicodeSegmentation;

use crate::domain::diagnostics::DiagnosticTrace;
use crate::domain::draft::TextChunk;
use crate::domain::error::PipelineError;

/// How far back from the window end each boundary kind is considered.
pub const PARAGRAPH_WINDOW: usize = 200;
pub const LINE_WINDOW: usize = 100;
pub const WORD_WINDOW: usize = 50;

/// Split text into chunks of at most `max_chars` graphemes, losslessly.
pub fn chunk_text(text: &str, max_chars: usize) -> Result<Vec<TextChunk>, PipelineError> {
    if max_chars == 0 {
        return Err(PipelineError::validation("max_chars must be greater than 0"));
    }

    let mut chunks = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        if grapheme_count(remaining) <= max_chars {
            chunks.push(TextChunk::new(remaining, chunks.len()));
            break;
        }

        let window_end = byte_index_at(remaining, max_chars);
        let window = &remaining[..window_end];
        let cut = find_cut(window);

        chunks.push(TextChunk::new(&remaining[..cut], chunks.len()));
        remaining = &remaining[cut..];
    }

    Ok(chunks)
}

/// Enforce a chunk-count ceiling; discarded content is recorded in the
/// trace since the concatenation property no longer holds past this point.
pub fn enforce_chunk_ceiling(
    mut chunks: Vec<TextChunk>,
    max_chunks: usize,
    trace: &mut DiagnosticTrace,
) -> Vec<TextChunk> {
    if max_chunks == 0 || chunks.len() <= max_chunks {
        return chunks;
    }

    let discarded = chunks.len() - max_chunks;
    chunks.truncate(max_chunks);
    trace.chunks_discarded = discarded;
    trace.warn(format!(
        "Chunk ceiling of {} exceeded; {} trailing chunk(s) discarded",
        max_chunks, discarded
    ));
    chunks
}

/// Pick the cut position (byte index) inside a full-size window.
fn find_cut(window: &str) -> usize {
    if let Some(pos) = window.rfind("\n\n") {
        let cut = pos + 2;
        if cut < window.len() && within_tail(window, cut, PARAGRAPH_WINDOW) {
            return cut;
        }
    }

    if let Some(pos) = window.rfind('\n') {
        let cut = pos + 1;
        if cut < window.len() && within_tail(window, cut, LINE_WINDOW) {
            return cut;
        }
    }

    if let Some(pos) = window.rfind(' ') {
        let cut = pos + 1;
        if cut < window.len() && within_tail(window, cut, WORD_WINDOW) {
            return cut;
        }
    }

    window.len()
}

/// Whether a byte position falls within the last `tail` graphemes of the
/// window and would not produce an empty chunk.
fn within_tail(window: &str, cut: usize, tail: usize) -> bool {
    cut > 0 && grapheme_count(&window[cut..]) <= tail
}

fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Byte index of the boundary after `chars` graphemes.
fn byte_index_at(text: &str, chars: usize) -> usize {
    text.grapheme_indices(true)
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
