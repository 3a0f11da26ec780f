//! 显示节点树
//!
//! 节点按位置存放在数组中，每个节点缓存其规范长度与显示长度以及前缀和，
//! 偏移映射只需在这棵树上查找，不依赖任何编辑表面的 API。
//! 所有长度均以 char 计。

use super::directory::MentionEntry;

/// An atomic inline mention. Displays `display_text`, stands for `token` in canonical text.
#[derive(Debug, Clone, PartialEq)]
pub struct MentionChip {
    pub entry: MentionEntry,
    pub display_text: String,
    /// Exact canonical slice the chip replaces (case preserved).
    pub token: String,
}

impl MentionChip {
    pub fn new(entry: MentionEntry, display_text: String, token: String) -> Self {
        Self {
            entry,
            display_text,
            token,
        }
    }

    pub fn canonical_len(&self) -> usize {
        self.token.chars().count()
    }

    pub fn display_len(&self) -> usize {
        self.display_text.chars().count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayNode {
    TextRun(String),
    LinkNode { href: String, text: String },
    MentionChip(MentionChip),
}

impl DisplayNode {
    /// What this node contributes to canonical text.
    pub fn canonical_text(&self) -> &str {
        match self {
            DisplayNode::TextRun(text) => text,
            DisplayNode::LinkNode { text, .. } => text,
            DisplayNode::MentionChip(chip) => &chip.token,
        }
    }

    /// What this node contributes to display text.
    pub fn display_text(&self) -> &str {
        match self {
            DisplayNode::TextRun(text) => text,
            DisplayNode::LinkNode { text, .. } => text,
            DisplayNode::MentionChip(chip) => &chip.display_text,
        }
    }

    pub fn is_chip(&self) -> bool {
        matches!(self, DisplayNode::MentionChip(_))
    }

    pub fn as_chip(&self) -> Option<&MentionChip> {
        match self {
            DisplayNode::MentionChip(chip) => Some(chip),
            _ => None,
        }
    }
}

/// Cached position of one node in both coordinate spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeSpan {
    pub canonical_start: usize,
    pub canonical_len: usize,
    pub display_start: usize,
    pub display_len: usize,
}

impl NodeSpan {
    pub fn canonical_end(&self) -> usize {
        self.canonical_start + self.canonical_len
    }

    pub fn display_end(&self) -> usize {
        self.display_start + self.display_len
    }
}

/// One piece of a display line, borrowed from the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineSegment<'a> {
    Text(&'a str),
    Link(&'a str),
    Chip(&'a MentionChip),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayTree {
    nodes: Vec<DisplayNode>,
    spans: Vec<NodeSpan>,
    canonical_len: usize,
    display_len: usize,
    chip_count: usize,
}

impl DisplayTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node; adjacent text runs are merged and empty runs dropped.
    pub fn push(&mut self, node: DisplayNode) {
        if let DisplayNode::TextRun(text) = &node {
            if text.is_empty() {
                return;
            }
            if let (Some(DisplayNode::TextRun(last)), Some(span)) =
                (self.nodes.last_mut(), self.spans.last_mut())
            {
                let len = text.chars().count();
                last.push_str(text);
                span.canonical_len += len;
                span.display_len += len;
                self.canonical_len += len;
                self.display_len += len;
                return;
            }
        }

        let (canonical_len, display_len) = match &node {
            DisplayNode::MentionChip(chip) => (chip.canonical_len(), chip.display_len()),
            other => {
                let len = other.canonical_text().chars().count();
                (len, len)
            }
        };
        if node.is_chip() {
            self.chip_count += 1;
        }
        self.spans.push(NodeSpan {
            canonical_start: self.canonical_len,
            canonical_len,
            display_start: self.display_len,
            display_len,
        });
        self.nodes.push(node);
        self.canonical_len += canonical_len;
        self.display_len += display_len;
    }

    pub fn nodes(&self) -> &[DisplayNode] {
        &self.nodes
    }

    pub fn spans(&self) -> &[NodeSpan] {
        &self.spans
    }

    pub fn node(&self, idx: usize) -> Option<(&DisplayNode, NodeSpan)> {
        Some((self.nodes.get(idx)?, *self.spans.get(idx)?))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn canonical_len(&self) -> usize {
        self.canonical_len
    }

    pub fn display_len(&self) -> usize {
        self.display_len
    }

    pub fn has_chips(&self) -> bool {
        self.chip_count > 0
    }

    /// Display offsets equal canonical offsets everywhere.
    pub fn is_identity(&self) -> bool {
        self.chip_count == 0
    }

    /// Rebuilds canonical text: runs verbatim, links by their text, chips by their token.
    pub fn canonical_text(&self) -> String {
        self.nodes.iter().map(DisplayNode::canonical_text).collect()
    }

    pub fn display_text(&self) -> String {
        self.nodes.iter().map(DisplayNode::display_text).collect()
    }

    /// Index of the node covering `canonical` (the first whose end is past it).
    pub fn node_at_canonical(&self, canonical: usize) -> Option<usize> {
        let idx = self
            .spans
            .partition_point(|span| span.canonical_end() <= canonical);
        (idx < self.spans.len()).then_some(idx)
    }

    pub fn node_at_display(&self, display: usize) -> Option<usize> {
        let idx = self.spans.partition_point(|span| span.display_end() <= display);
        (idx < self.spans.len()).then_some(idx)
    }

    /// Splits the tree into display lines; `\n` in text runs becomes a line break.
    pub fn lines(&self) -> Vec<Vec<LineSegment<'_>>> {
        let mut lines = vec![Vec::new()];
        for node in &self.nodes {
            match node {
                DisplayNode::TextRun(text) => {
                    let mut parts = text.split('\n');
                    if let Some(first) = parts.next() {
                        push_text_segment(&mut lines, first);
                    }
                    for part in parts {
                        lines.push(Vec::new());
                        push_text_segment(&mut lines, part);
                    }
                }
                DisplayNode::LinkNode { text, .. } => {
                    if let Some(line) = lines.last_mut() {
                        line.push(LineSegment::Link(text));
                    }
                }
                DisplayNode::MentionChip(chip) => {
                    if let Some(line) = lines.last_mut() {
                        line.push(LineSegment::Chip(chip));
                    }
                }
            }
        }
        lines
    }
}

fn push_text_segment<'a>(lines: &mut [Vec<LineSegment<'a>>], text: &'a str) {
    if text.is_empty() {
        return;
    }
    if let Some(line) = lines.last_mut() {
        line.push(LineSegment::Text(text));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/display.rs"]
mod tests;
