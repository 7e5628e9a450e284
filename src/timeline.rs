//! Extraction pipeline: blocks in, reduced timeline out.
//!
//! The single public operation over free text lives here; the chapter and
//! article adapters reuse the same block scanning and feed the same reducer.

use chronos_types::{TimelineEvent, YearRange};

use crate::context;
use crate::error::{ExtractError, Result};
use crate::reduce;
use crate::scanner::YearScanner;

/// Source tag for events extracted from plain text.
pub const SOURCE_TEXT: &str = "text";

/// Location tag applied to unscoped (general) scans.
pub const GENERAL_LOCATION: &str = "General";

/// Fail fast on an inverted range; everything else degrades gracefully.
pub(crate) fn check_range(range: YearRange) -> Result<()> {
    if !range.is_valid() {
        return Err(ExtractError::InvalidRange {
            start: range.start,
            end: range.end,
        });
    }
    Ok(())
}

pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Scan one block and append an event per in-range year token.
pub(crate) fn scan_block(
    scanner: &YearScanner,
    block: &str,
    range: YearRange,
    source: &str,
    location: Option<&str>,
    out: &mut Vec<TimelineEvent>,
) {
    for hit in scanner.scan(block, range) {
        out.push(TimelineEvent {
            year: hit.year,
            description: context::describe(block, &hit),
            source: source.to_string(),
            location: location.map(str::to_string),
        });
    }
}

/// Extract a deduplicated, chronologically sorted timeline from free text.
///
/// Blocks are lines. With a `query`, events are tagged with it as their
/// location when the document contains the query as a case-insensitive
/// substring; otherwise the scan still runs unscoped and events are tagged
/// "General". Zero matches is a successful empty result, never an error.
pub fn extract_timeline(
    text: &str,
    range: YearRange,
    query: Option<&str>,
) -> Result<Vec<TimelineEvent>> {
    check_range(range)?;

    let location = match query {
        Some(q) if contains_ci(text, q) => Some(q),
        Some(_) => Some(GENERAL_LOCATION),
        None => None,
    };

    let scanner = YearScanner::new();
    let mut events = Vec::new();
    for block in text.lines() {
        scan_block(&scanner, block, range, SOURCE_TEXT, location, &mut events);
    }

    Ok(reduce::finalize(events, range))
}
