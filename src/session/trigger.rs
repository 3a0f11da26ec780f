//! 提及触发检测：光标前是否有正在输入的 `@xxx` / `#xxx`

use crate::models::{MENTION_ID_LEN, MENTION_PREFIX};

pub const TRIGGERS: [char; 2] = ['@', '#'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionTrigger {
    pub trigger: char,
    pub search: String,
    /// Canonical offset of the trigger char.
    pub start_offset: usize,
}

/// Looks for `[@#]` followed by non-whitespace, non-trigger chars up to the end
/// of `before_cursor`. An `@event:` token being typed (up to a complete id)
/// does not open a search.
pub fn detect_trigger(before_cursor: &str) -> Option<MentionTrigger> {
    let mut search_chars = 0usize;
    let mut trigger = None;
    let mut search_start = before_cursor.len();

    for (idx, ch) in before_cursor.char_indices().rev() {
        if TRIGGERS.contains(&ch) {
            trigger = Some(ch);
            search_start = idx + ch.len_utf8();
            break;
        }
        if ch.is_whitespace() {
            return None;
        }
        search_chars += 1;
    }

    let trigger = trigger?;
    let search = &before_cursor[search_start..];
    if trigger == '@' && is_token_in_progress(search) {
        return None;
    }

    let cursor = before_cursor.chars().count();
    Some(MentionTrigger {
        trigger,
        search: search.to_string(),
        start_offset: cursor - search_chars - 1,
    })
}

/// `event:` followed by at most a full id of hex chars.
fn is_token_in_progress(search: &str) -> bool {
    let keyword = &MENTION_PREFIX[1..];
    let Some(head) = search.get(..keyword.len()) else {
        return false;
    };
    if !head.eq_ignore_ascii_case(keyword) {
        return false;
    }
    let id = &search[keyword.len()..];
    id.len() <= MENTION_ID_LEN && id.chars().all(|ch| ch.is_ascii_hexdigit())
}

#[cfg(test)]
#[path = "../../tests/unit/session/trigger.rs"]
mod tests;
