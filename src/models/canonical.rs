//! 规范文本缓冲区
//!
//! 职责：
//! - 文本存储（Rope），唯一会被持久化或发送的文本
//! - 以 char 偏移进行插入/删除
//! - 修订号：每次变更递增，用于判定延迟任务是否过期

use ropey::{Rope, RopeSlice};
use std::borrow::Cow;
use std::ops::Range;

/// 从 RopeSlice 获取字符串，优先零拷贝
pub fn slice_to_cow(slice: RopeSlice<'_>) -> Cow<'_, str> {
    match slice.as_str() {
        Some(s) => Cow::Borrowed(s),
        None => Cow::Owned(slice.to_string()),
    }
}

/// Shape of one mutation, in char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEdit {
    pub start: usize,
    pub removed_len: usize,
    pub inserted_len: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CanonicalText {
    rope: Rope,
    revision: u64,
}

impl CanonicalText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            revision: 0,
        }
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn as_cow(&self) -> Cow<'_, str> {
        slice_to_cow(self.rope.slice(..))
    }

    /// Text in `[0, offset)`; `offset` is clamped to the end.
    pub fn prefix(&self, offset: usize) -> Cow<'_, str> {
        let end = offset.min(self.len_chars());
        slice_to_cow(self.rope.slice(..end))
    }

    pub fn slice(&self, range: Range<usize>) -> Cow<'_, str> {
        let range = self.clamp(range);
        slice_to_cow(self.rope.slice(range))
    }

    pub fn insert(&mut self, offset: usize, text: &str) -> TextEdit {
        self.replace(offset..offset, text)
    }

    pub fn remove(&mut self, range: Range<usize>) -> TextEdit {
        self.replace(range, "")
    }

    pub fn replace(&mut self, range: Range<usize>, text: &str) -> TextEdit {
        let range = self.clamp(range);
        let start = range.start;
        let removed_len = range.len();
        if removed_len > 0 {
            self.rope.remove(range);
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
        }
        self.revision += 1;
        TextEdit {
            start,
            removed_len,
            inserted_len: text.chars().count(),
        }
    }

    /// Replaces the whole text. Returns false when nothing changed.
    pub fn set(&mut self, text: &str) -> bool {
        if self.rope == text {
            return false;
        }
        self.rope = Rope::from_str(text);
        self.revision += 1;
        true
    }

    fn clamp(&self, range: Range<usize>) -> Range<usize> {
        let len = self.len_chars();
        let end = range.end.min(len);
        range.start.min(end)..end
    }
}

impl std::fmt::Display for CanonicalText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/canonical.rs"]
mod tests;
