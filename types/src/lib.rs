use serde::{Deserialize, Serialize};

// ── Year range ───────────────────────────────────────────────────────────

/// Inclusive year bounds applied to every extraction call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: u16,
    pub end: u16,
}

impl YearRange {
    pub fn new(start: u16, end: u16) -> Self {
        YearRange { start, end }
    }

    /// A range is usable only when `start <= end`.
    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    pub fn contains(&self, year: u16) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl Default for YearRange {
    /// The documented fallback window when a caller supplies no bounds.
    fn default() -> Self {
        YearRange {
            start: 1850,
            end: 2025,
        }
    }
}

// ── Timeline event ───────────────────────────────────────────────────────

/// A single dated event extracted from source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub year: u16,
    pub description: String,
    /// Which source shape produced the event ("textbook", "article", "text").
    pub source: String,
    /// Query scope the event was found under, or "General" for unscoped scans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl TimelineEvent {
    /// Duplicate detection key: exact `(year, trimmed description)`.
    pub fn dedup_key(&self) -> (u16, &str) {
        (self.year, self.description.trim())
    }
}
