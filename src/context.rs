//! Description extraction around a matched year token.
//!
//! Source text is heterogeneous: run-on paragraphs, list items without
//! punctuation, tabular excerpts. A full-sentence match gives the best
//! description when one exists; a fixed-width character window guarantees
//! the extractor never comes back empty-handed.

use crate::scanner::YearHit;

/// Character radius of the fallback window either side of the token.
const WINDOW_RADIUS: usize = 50;

/// Produce a human-readable description for a year hit inside `block`.
///
/// Precedence:
/// 1. the first sentence (naive `.` `!` `?` split) containing the literal
///    token, trimmed, terminal punctuation kept;
/// 2. a 50-character window before the token start and after the token end,
///    clamped to block bounds, trimmed.
pub fn describe(block: &str, hit: &YearHit) -> String {
    let token = &block[hit.start..hit.end];

    if let Some(sentence) = first_sentence_with(block, token) {
        return sentence.trim().to_string();
    }

    window_around(block, hit).trim().to_string()
}

/// Find the first terminated sentence containing the token.
///
/// A segment only counts as a sentence when it ends with terminal
/// punctuation; a trailing unterminated fragment falls through to the
/// window fallback.
fn first_sentence_with<'a>(block: &'a str, token: &str) -> Option<&'a str> {
    block
        .split_inclusive(['.', '!', '?'])
        .filter(|s| s.ends_with(['.', '!', '?']))
        .find(|s| s.contains(token))
}

/// Slice out the fixed-width window around the token, clamped to the block.
fn window_around<'a>(block: &'a str, hit: &YearHit) -> &'a str {
    let start = back_up(block, hit.start, WINDOW_RADIUS);
    let end = advance(block, hit.end, WINDOW_RADIUS);
    &block[start..end]
}

/// Step up to `n` chars backwards from byte offset `pos`.
fn back_up(s: &str, pos: usize, n: usize) -> usize {
    s[..pos]
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(pos)
}

/// Step up to `n` chars forwards from byte offset `pos`.
fn advance(s: &str, pos: usize, n: usize) -> usize {
    s[pos..]
        .char_indices()
        .nth(n)
        .map(|(i, _)| pos + i)
        .unwrap_or(s.len())
}
