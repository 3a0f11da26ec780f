//! Display projector: canonical text + resolved ranges → display node tree.

use crate::models::{DisplayNode, DisplayTree, RangePayload, TaggedRange};

/// Walks `text` left to right. At the start of a range the matching link or
/// chip node is emitted and the walk jumps to the range end; every other char
/// extends the current text run.
///
/// `ranges` must be ordered and non-overlapping (see `resolve_ranges`); a range
/// starting behind the walk position is ignored.
pub fn project(text: &str, ranges: &[TaggedRange]) -> DisplayTree {
    let mut tree = DisplayTree::new();
    let mut pending = ranges.iter().peekable();
    let mut run = String::new();
    let mut skip_until = 0usize;

    for (pos, ch) in text.chars().enumerate() {
        if pos < skip_until {
            continue;
        }
        while pending.peek().is_some_and(|r| r.start < pos) {
            pending.next();
        }
        if let Some(range) = pending.next_if(|r| r.start == pos) {
            if !run.is_empty() {
                tree.push(DisplayNode::TextRun(std::mem::take(&mut run)));
            }
            tree.push(range_node(range));
            skip_until = range.end;
            continue;
        }
        run.push(ch);
    }

    if !run.is_empty() {
        tree.push(DisplayNode::TextRun(run));
    }
    tree
}

fn range_node(range: &TaggedRange) -> DisplayNode {
    match &range.payload {
        RangePayload::Url { href } => DisplayNode::LinkNode {
            href: href.clone(),
            text: href.clone(),
        },
        RangePayload::Mention(chip) => DisplayNode::MentionChip(chip.clone()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/projector.rs"]
mod tests;
