use super::canonical::TextEdit;
use super::display::MentionChip;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    Url,
    Mention,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RangePayload {
    Url { href: String },
    Mention(MentionChip),
}

/// A classified `[start, end)` span of canonical text, in char offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedRange {
    pub start: usize,
    pub end: usize,
    pub payload: RangePayload,
}

impl TaggedRange {
    pub fn url(start: usize, end: usize, href: impl Into<String>) -> Self {
        Self {
            start,
            end,
            payload: RangePayload::Url { href: href.into() },
        }
    }

    pub fn mention(start: usize, end: usize, chip: MentionChip) -> Self {
        Self {
            start,
            end,
            payload: RangePayload::Mention(chip),
        }
    }

    pub fn kind(&self) -> RangeKind {
        match self.payload {
            RangePayload::Url { .. } => RangeKind::Url,
            RangePayload::Mention(_) => RangeKind::Mention,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn overlaps(&self, other: &TaggedRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Carries the range across an edit. A range whose chars the edit touches is
    /// dropped; its text stays plain until the next highlight pass.
    pub fn rebase(&self, edit: &TextEdit) -> Option<TaggedRange> {
        if self.end <= edit.start {
            return Some(self.clone());
        }
        if self.start >= edit.start + edit.removed_len {
            let mut moved = self.clone();
            moved.start = self.start - edit.removed_len + edit.inserted_len;
            moved.end = self.end - edit.removed_len + edit.inserted_len;
            return Some(moved);
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/range.rs"]
mod tests;
