//! Structured textbook chapter source.
//!
//! Chapter sets are JSON of the shape
//! `{ class: { subject: [ { chapter, title, content } ] } }`, the layout of
//! digitized textbook corpora. Extraction is query-scoped: only chapters
//! mentioning the query are scanned, with an unscoped fallback when the
//! query matches nothing.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use chronos_types::{TimelineEvent, YearRange};

use crate::error::Result;
use crate::reduce;
use crate::scanner::YearScanner;
use crate::timeline::{GENERAL_LOCATION, check_range, contains_ci, scan_block};

/// Source tag for events extracted from chapter sets.
pub const SOURCE_TEXTBOOK: &str = "textbook";

/// One chapter body within a subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter: u32,
    pub title: String,
    pub content: String,
}

/// Full corpus: class name → subject name → chapters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterSet(pub HashMap<String, HashMap<String, Vec<Chapter>>>);

impl ChapterSet {
    /// Parse a chapter set from JSON text.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a chapter set from disk.
    ///
    /// A missing, unreadable, or malformed file is an empty corpus, not an
    /// error: the pipeline then has no blocks to scan and yields an empty
    /// result instead of propagating a lower-level fault.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::parse(&json).unwrap_or_default(),
            Err(_) => ChapterSet::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chapters().next().is_none()
    }

    fn chapters(&self) -> impl Iterator<Item = &Chapter> {
        self.0
            .values()
            .flat_map(|subjects| subjects.values())
            .flatten()
    }
}

/// Query-scoped extraction over a chapter corpus.
///
/// Scans only chapters whose content contains `query` as a case-insensitive
/// substring, tagging events with the query as their location. When that
/// pass produces nothing (no matching chapter, or matching chapters without
/// in-range years), falls back to an unscoped scan of the whole corpus with
/// events tagged "General".
pub fn extract_from_chapters(
    set: &ChapterSet,
    range: YearRange,
    query: Option<&str>,
) -> Result<Vec<TimelineEvent>> {
    check_range(range)?;

    let scanner = YearScanner::new();
    let mut events = Vec::new();

    if let Some(q) = query {
        for chapter in set.chapters().filter(|c| contains_ci(&c.content, q)) {
            scan_chapter(&scanner, chapter, range, Some(q), &mut events);
        }
    }

    if events.is_empty() {
        for chapter in set.chapters() {
            scan_chapter(&scanner, chapter, range, Some(GENERAL_LOCATION), &mut events);
        }
    }

    Ok(reduce::finalize(events, range))
}

/// Chapter blocks are newline-separated paragraphs.
fn scan_chapter(
    scanner: &YearScanner,
    chapter: &Chapter,
    range: YearRange,
    location: Option<&str>,
    out: &mut Vec<TimelineEvent>,
) {
    for block in chapter.content.lines() {
        scan_block(scanner, block, range, SOURCE_TEXTBOOK, location, out);
    }
}
