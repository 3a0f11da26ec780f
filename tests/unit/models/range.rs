use super::*;

fn edit(start: usize, removed_len: usize, inserted_len: usize) -> TextEdit {
    TextEdit {
        start,
        removed_len,
        inserted_len,
    }
}

#[test]
fn rebase_keeps_ranges_before_edit() {
    let range = TaggedRange::url(0, 5, "http:");
    assert_eq!(range.rebase(&edit(5, 0, 3)), Some(range.clone()));
    assert_eq!(range.rebase(&edit(7, 2, 0)), Some(range));
}

#[test]
fn rebase_shifts_ranges_after_edit() {
    let range = TaggedRange::url(10, 20, "x");
    let moved = range.rebase(&edit(2, 3, 1)).unwrap();
    assert_eq!((moved.start, moved.end), (8, 18));

    let moved = range.rebase(&edit(10, 0, 4)).unwrap();
    assert_eq!((moved.start, moved.end), (14, 24));
}

#[test]
fn rebase_drops_touched_ranges() {
    let range = TaggedRange::url(10, 20, "x");
    assert_eq!(range.rebase(&edit(15, 0, 1)), None);
    assert_eq!(range.rebase(&edit(8, 3, 0)), None);
    assert_eq!(range.rebase(&edit(19, 5, 0)), None);
}

#[test]
fn overlaps_is_half_open() {
    let a = TaggedRange::url(0, 5, "a");
    let b = TaggedRange::url(5, 9, "b");
    let c = TaggedRange::url(4, 6, "c");
    assert!(!a.overlaps(&b));
    assert!(a.overlaps(&c));
    assert!(b.overlaps(&c));
    assert!(a.contains(4));
    assert!(!a.contains(5));
    assert_eq!(a.kind(), RangeKind::Url);
}
