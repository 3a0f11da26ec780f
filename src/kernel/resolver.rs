//! Range resolver: orders tokenizer output and removes overlaps.

use crate::models::TaggedRange;

/// Sorts by start (longest first on equal start) and greedily keeps every
/// candidate that does not intersect an already accepted range.
pub fn resolve_ranges(mut ranges: Vec<TaggedRange>) -> Vec<TaggedRange> {
    ranges.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.len().cmp(&a.len())));

    let mut accepted: Vec<TaggedRange> = Vec::with_capacity(ranges.len());
    for candidate in ranges {
        if candidate.is_empty() {
            continue;
        }
        if accepted.iter().any(|existing| candidate.overlaps(existing)) {
            continue;
        }
        accepted.push(candidate);
    }
    accepted
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/resolver.rs"]
mod tests;
