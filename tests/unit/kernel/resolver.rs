use super::*;
use crate::models::{MentionChip, MentionEntry};

fn chip() -> MentionChip {
    let entry = MentionEntry::new("507f1f77bcf86cd799439011", "Gala");
    MentionChip::new(entry.clone(), entry.display_text(), entry.token())
}

fn bounds(ranges: &[TaggedRange]) -> Vec<(usize, usize)> {
    ranges.iter().map(|r| (r.start, r.end)).collect()
}

#[test]
fn output_is_sorted_and_disjoint() {
    let ranges = vec![
        TaggedRange::url(20, 30, "c"),
        TaggedRange::url(0, 5, "a"),
        TaggedRange::mention(6, 12, chip()),
    ];
    assert_eq!(bounds(&resolve_ranges(ranges)), vec![(0, 5), (6, 12), (20, 30)]);
}

#[test]
fn longer_range_wins_on_equal_start() {
    let ranges = vec![
        TaggedRange::mention(0, 4, chip()),
        TaggedRange::url(0, 10, "long"),
    ];
    let resolved = resolve_ranges(ranges);
    assert_eq!(bounds(&resolved), vec![(0, 10)]);
    assert_eq!(resolved[0].kind(), crate::models::RangeKind::Url);
}

#[test]
fn earlier_range_wins_overlap() {
    let ranges = vec![
        TaggedRange::url(5, 15, "b"),
        TaggedRange::url(0, 8, "a"),
        TaggedRange::url(15, 16, "c"),
    ];
    assert_eq!(bounds(&resolve_ranges(ranges)), vec![(0, 8), (15, 16)]);
}

#[test]
fn empty_ranges_are_dropped() {
    let ranges = vec![TaggedRange::url(3, 3, ""), TaggedRange::url(1, 2, "x")];
    assert_eq!(bounds(&resolve_ranges(ranges)), vec![(1, 2)]);
}

#[test]
fn non_overlap_holds_for_dense_input() {
    let mut ranges = Vec::new();
    for start in 0..20 {
        for len in 1..6 {
            ranges.push(TaggedRange::url(start, start + len, "x"));
        }
    }
    let resolved = resolve_ranges(ranges);
    for pair in resolved.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }
    assert_eq!(resolved[0].end, 5);
}
