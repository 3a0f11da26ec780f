//! 提及目录：可被 `@event:<id>` 引用的实体
//!
//! 目录由宿主提供，核心只读。id 大小写不敏感（内部统一存小写）。

use super::display::MentionChip;
use compact_str::CompactString;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::{fmt, io, path::Path};

/// Canonical prefix of every mention token.
pub const MENTION_PREFIX: &str = "@event:";
/// Number of hex characters in a mention id.
pub const MENTION_ID_LEN: usize = 24;
pub const DEFAULT_LINK_BASE: &str = "/event/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionEntry {
    #[serde(alias = "_id")]
    pub id: CompactString,
    #[serde(alias = "name")]
    pub label: String,
    /// 宿主附带的数据（时间、地点、图片等），核心不解释
    #[serde(flatten, default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl MentionEntry {
    pub fn new(id: impl Into<CompactString>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            metadata: serde_json::Map::new(),
        }
    }

    /// The canonical token stored in text, `@event:<id>`.
    pub fn token(&self) -> String {
        format!("{MENTION_PREFIX}{}", self.id)
    }

    /// The label shown in place of the token, `@event:<label>`.
    pub fn display_text(&self) -> String {
        format!("{MENTION_PREFIX}{}", self.label)
    }
}

/// Capability interface a host supplies to resolve and present mentions.
pub trait MentionResolver {
    fn resolve(&self, id: &str) -> Option<&MentionEntry>;

    fn render(&self, entry: &MentionEntry) -> MentionChip {
        MentionChip::new(entry.clone(), entry.display_text(), entry.token())
    }

    /// Href of a mention in static HTML. `None` renders a plain span.
    fn link_target(&self, entry: &MentionEntry) -> Option<String> {
        if entry.id.is_empty() {
            return None;
        }
        Some(format!("{DEFAULT_LINK_BASE}{}", entry.id))
    }
}

#[derive(Debug)]
pub enum DirectoryError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::Io(e) => write!(f, "failed to read directory: {}", e),
            DirectoryError::Parse(e) => write!(f, "invalid directory json: {}", e),
        }
    }
}

impl std::error::Error for DirectoryError {}

impl From<io::Error> for DirectoryError {
    fn from(e: io::Error) -> Self {
        DirectoryError::Io(e)
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(e: serde_json::Error) -> Self {
        DirectoryError::Parse(e)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MentionDirectory {
    entries: Vec<MentionEntry>,
    by_id: FxHashMap<CompactString, usize>,
    link_base: Option<String>,
}

impl MentionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = MentionEntry>) -> Self {
        let mut directory = Self::new();
        for entry in entries {
            directory.insert(entry);
        }
        directory
    }

    /// 从 JSON 数组构建（`[{"_id": "...", "name": "..."}]`）
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        let entries: Vec<MentionEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn with_link_base(mut self, base: impl Into<String>) -> Self {
        self.link_base = Some(base.into());
        self
    }

    /// Inserts or replaces the entry with the same id. Returns the replaced entry.
    pub fn insert(&mut self, entry: MentionEntry) -> Option<MentionEntry> {
        let key = normalize_id(&entry.id);
        match self.by_id.get(&key) {
            Some(&idx) => Some(std::mem::replace(&mut self.entries[idx], entry)),
            None => {
                self.by_id.insert(key, self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&MentionEntry> {
        let idx = *self.by_id.get(&normalize_id(id))?;
        self.entries.get(idx)
    }

    pub fn entries(&self) -> &[MentionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive label filter for the mention picker, in directory order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<MentionEntry> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.label.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect()
    }
}

impl FromIterator<MentionEntry> for MentionDirectory {
    fn from_iter<I: IntoIterator<Item = MentionEntry>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl MentionResolver for MentionDirectory {
    fn resolve(&self, id: &str) -> Option<&MentionEntry> {
        self.get(id)
    }

    fn link_target(&self, entry: &MentionEntry) -> Option<String> {
        if entry.id.is_empty() {
            return None;
        }
        let base = self.link_base.as_deref().unwrap_or(DEFAULT_LINK_BASE);
        Some(format!("{base}{}", entry.id))
    }
}

fn normalize_id(id: &str) -> CompactString {
    CompactString::from(id.to_ascii_lowercase())
}

#[cfg(test)]
#[path = "../../tests/unit/models/directory.rs"]
mod tests;
