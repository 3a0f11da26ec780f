//! Offset mapper between canonical and display coordinates.
//!
//! A chip occupies `token` chars in canonical text and `display_text` chars on
//! screen; every other node has equal lengths in both spaces. Offsets strictly
//! inside a chip are not addressable and normalize to the chip's end. Offsets
//! past the document end fall back to the end.

use crate::models::{CursorState, DisplayTree, MentionChip};
use std::ops::Range;

pub fn canonical_to_display(tree: &DisplayTree, canonical: usize) -> usize {
    let Some(idx) = tree.node_at_canonical(canonical) else {
        return tree.display_len();
    };
    let Some((node, span)) = tree.node(idx) else {
        return tree.display_len();
    };
    let within = canonical - span.canonical_start;
    if node.is_chip() && within > 0 {
        return span.display_end();
    }
    span.display_start + within
}

pub fn display_to_canonical(tree: &DisplayTree, display: usize) -> usize {
    let Some(idx) = tree.node_at_display(display) else {
        return tree.canonical_len();
    };
    let Some((node, span)) = tree.node(idx) else {
        return tree.canonical_len();
    };
    let within = display - span.display_start;
    if node.is_chip() && within > 0 {
        // 按 token 长度而不是渲染字符数换算
        return span.canonical_end();
    }
    span.canonical_start + within
}

/// Clamps a canonical offset inside a chip to the chip's end. Idempotent.
pub fn normalize_canonical(tree: &DisplayTree, canonical: usize) -> usize {
    display_to_canonical(tree, canonical_to_display(tree, canonical))
}

/// Display offset for a cursor. While typing over a tree without chips the
/// two coordinate spaces coincide and no walk is needed.
pub fn display_cursor(tree: &DisplayTree, cursor: CursorState) -> usize {
    if cursor.is_typing && tree.is_identity() {
        return cursor.canonical_offset.min(tree.display_len());
    }
    canonical_to_display(tree, cursor.canonical_offset)
}

/// The chip whose canonical span strictly contains `canonical`.
pub fn chip_containing(tree: &DisplayTree, canonical: usize) -> Option<(&MentionChip, Range<usize>)> {
    let idx = tree.node_at_canonical(canonical)?;
    let (node, span) = tree.node(idx)?;
    let chip = node.as_chip()?;
    (canonical > span.canonical_start).then(|| (chip, span.canonical_start..span.canonical_end()))
}

/// The chip that ends exactly at `canonical`.
pub fn chip_before(tree: &DisplayTree, canonical: usize) -> Option<(&MentionChip, Range<usize>)> {
    if canonical == 0 {
        return None;
    }
    let idx = tree.node_at_canonical(canonical - 1)?;
    let (node, span) = tree.node(idx)?;
    let chip = node.as_chip()?;
    (span.canonical_end() == canonical).then(|| (chip, span.canonical_start..span.canonical_end()))
}

/// The chip that starts exactly at `canonical`.
pub fn chip_after(tree: &DisplayTree, canonical: usize) -> Option<(&MentionChip, Range<usize>)> {
    let idx = tree.node_at_canonical(canonical)?;
    let (node, span) = tree.node(idx)?;
    let chip = node.as_chip()?;
    (span.canonical_start == canonical).then(|| (chip, span.canonical_start..span.canonical_end()))
}

/// Chip removed by a backspace at `canonical`: one adjacent to the left of the
/// cursor, or one the cursor sits inside.
pub fn chip_for_backspace(tree: &DisplayTree, canonical: usize) -> Option<Range<usize>> {
    chip_containing(tree, canonical)
        .or_else(|| chip_before(tree, canonical))
        .map(|(_, range)| range)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/offset_map.rs"]
mod tests;
