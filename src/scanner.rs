//! Year token scanning.
//!
//! Finds bare four-digit year tokens inside a text block and filters them
//! against the caller's inclusive year range. Matching is word-bounded so a
//! year is never carved out of a longer digit run, and ASCII-only so the
//! result is locale-independent.

use regex::Regex;

use chronos_types::YearRange;

/// A single year token found in a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearHit {
    pub year: u16,
    /// Byte offset of the token's first digit in the block.
    pub start: usize,
    /// Byte offset one past the token's last digit.
    pub end: usize,
}

/// Scans text blocks for four-digit year tokens.
pub struct YearScanner {
    re_year: Regex,
}

impl YearScanner {
    pub fn new() -> Self {
        // Word-bounded: "19999" must never yield "1999".
        let re_year = Regex::new(r"\b[0-9]{4}\b").expect("year regex");
        YearScanner { re_year }
    }

    /// Scan one block, yielding every token whose value lies in `range`.
    ///
    /// The scanner keeps no per-call state: the same block can be rescanned
    /// any number of times with different ranges, and the input is never
    /// mutated.
    pub fn scan<'a>(
        &'a self,
        block: &'a str,
        range: YearRange,
    ) -> impl Iterator<Item = YearHit> + 'a {
        self.re_year.find_iter(block).filter_map(move |m| {
            let token = m.as_str();
            // A calendar year never carries a leading zero: "0999" is not
            // a year token for any range.
            if token.starts_with('0') {
                return None;
            }
            let year: u16 = token.parse().ok()?;
            if !range.contains(year) {
                return None;
            }
            Some(YearHit {
                year,
                start: m.start(),
                end: m.end(),
            })
        })
    }
}

impl Default for YearScanner {
    fn default() -> Self {
        Self::new()
    }
}
