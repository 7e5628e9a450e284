//! Final event normalization: range filter, dedup, chronological sort.

use std::collections::HashSet;

use chronos_types::{TimelineEvent, YearRange};

/// Reduce candidate events to the final list.
///
/// Drops events outside `range` (the section-scoped list-item path feeds
/// candidates that bypassed the scanner-level filter), keeps the first of
/// each exact `(year, trimmed description)` pair in scan order, then
/// stable-sorts ascending by year so ties preserve input order.
///
/// Never fails; empty input yields empty output.
pub fn finalize(events: Vec<TimelineEvent>, range: YearRange) -> Vec<TimelineEvent> {
    let mut seen: HashSet<(u16, String)> = HashSet::new();
    let mut out: Vec<TimelineEvent> = Vec::with_capacity(events.len());

    for event in events {
        if !range.contains(event.year) {
            continue;
        }
        let (year, desc) = event.dedup_key();
        if seen.insert((year, desc.to_string())) {
            out.push(event);
        }
    }

    // Vec::sort_by_key is stable, so equal years keep scan order.
    out.sort_by_key(|e| e.year);
    out
}
