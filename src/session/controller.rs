//! 编辑会话控制器
//!
//! 状态：
//! - Idle：没有待执行的高亮，光标已恢复
//! - Typing：连续输入中，完整高亮被推迟到防抖结束
//! - MentionSearch：光标前有未结束的 `@xxx` / `#xxx`
//! - Reconciling：高亮已重新投影，正在等待若干帧后恢复光标
//!
//! 规范文本在每次按键时立即更新；显示树同步地用上一次高亮的范围重投影，
//! 所以任何时刻光标都能经偏移映射精确换算。

use super::action::{CursorMove, DispatchResult, SessionAction, SessionEffect};
use super::timer::{Debounce, FrameDeferred};
use super::trigger::{detect_trigger, MentionTrigger};
use crate::core::{Key, KeyCode};
use crate::kernel::{self, offset_map};
use crate::models::{
    CanonicalText, CursorState, DisplayTree, MentionEntry, MentionResolver, TaggedRange, TextEdit,
};
use crate::services::{
    paste_text, remaining_chars, validate_content, ComposerConfig, ValidationError,
};
use std::sync::Arc;
use std::time::Instant;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Typing,
    MentionSearch,
    Reconciling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Typing,
    Reconciling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingRestore {
    revision: u64,
    canonical_offset: usize,
}

/// Last full highlight pass, reused when the text comes back unchanged.
#[derive(Debug, Clone)]
struct HighlightSnapshot {
    text: String,
    ranges: Vec<TaggedRange>,
}

pub struct EditSession {
    text: CanonicalText,
    resolver: Arc<dyn MentionResolver>,
    config: ComposerConfig,
    tree: DisplayTree,
    ranges: Vec<TaggedRange>,
    snapshot: Option<HighlightSnapshot>,
    cursor: CursorState,
    display_cursor: usize,
    phase: Phase,
    mention: Option<MentionTrigger>,
    candidates: Vec<MentionEntry>,
    highlight_timer: Debounce,
    restore: FrameDeferred<PendingRestore>,
    disposed: bool,
}

impl EditSession {
    pub fn new(initial: &str, resolver: Arc<dyn MentionResolver>, config: ComposerConfig) -> Self {
        let text = CanonicalText::from_text(initial);
        let end = text.len_chars();
        let mut session = Self {
            text,
            resolver,
            config,
            tree: DisplayTree::new(),
            ranges: Vec::new(),
            snapshot: None,
            cursor: CursorState::at(end),
            display_cursor: 0,
            phase: Phase::Idle,
            mention: None,
            candidates: Vec::new(),
            highlight_timer: Debounce::default(),
            restore: FrameDeferred::default(),
            disposed: false,
        };
        session.rehighlight();
        session.display_cursor = offset_map::display_cursor(&session.tree, session.cursor);
        session
    }

    pub fn text(&self) -> String {
        self.text.to_string()
    }

    pub fn canonical(&self) -> &CanonicalText {
        &self.text
    }

    pub fn tree(&self) -> &DisplayTree {
        &self.tree
    }

    pub fn ranges(&self) -> &[TaggedRange] {
        &self.ranges
    }

    pub fn cursor(&self) -> CursorState {
        self.cursor
    }

    /// Cursor position on the surface, in display coordinates.
    pub fn display_cursor(&self) -> usize {
        self.display_cursor
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn mention_trigger(&self) -> Option<&MentionTrigger> {
        self.mention.as_ref()
    }

    pub fn candidates(&self) -> &[MentionEntry] {
        &self.candidates
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn state(&self) -> SessionState {
        match self.phase {
            Phase::Reconciling => SessionState::Reconciling,
            _ if self.mention.is_some() => SessionState::MentionSearch,
            Phase::Typing => SessionState::Typing,
            Phase::Idle => SessionState::Idle,
        }
    }

    /// When the host loop should call `tick` next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.highlight_timer.deadline()
    }

    /// Whether a cursor restore is waiting for frames.
    pub fn needs_frame(&self) -> bool {
        self.restore.is_pending()
    }

    pub fn remaining(&self) -> i64 {
        remaining_chars(&self.text.as_cow(), &self.config)
    }

    pub fn mentioned_entries(&self) -> Vec<MentionEntry> {
        kernel::mentioned_entries(&self.text.as_cow(), self.resolver.as_ref())
    }

    /// Validates the canonical text, hands it off trimmed and clears the session.
    /// On failure nothing changes.
    pub fn submit(&mut self) -> Result<DispatchResult, ValidationError> {
        let text = self.text.to_string();
        validate_content(&text, &self.config)?;
        let submitted = text.trim().to_string();
        tracing::debug!(chars = submitted.chars().count(), "submitted");

        self.text.set("");
        self.highlight_timer.cancel();
        self.restore.cancel();
        self.rehighlight();
        self.cursor = CursorState::at(0);
        self.display_cursor = 0;
        self.phase = Phase::Idle;

        let mut effects = vec![SessionEffect::Submitted(submitted)];
        self.close_mention(&mut effects);
        effects.push(SessionEffect::Changed(String::new()));
        Ok(DispatchResult::changed(effects))
    }

    pub fn dispatch(&mut self, action: SessionAction, now: Instant) -> DispatchResult {
        if self.disposed {
            tracing::debug!("action on disposed session ignored");
            return DispatchResult::unchanged();
        }
        match action {
            SessionAction::InsertText(text) => self.insert_text(&text, now),
            SessionAction::Key(key) => self.handle_key(key, now),
            SessionAction::Paste(payload) => {
                let text = paste_text(payload, self.config.paste_max_bytes);
                self.insert_text(&text, now)
            }
            SessionAction::SetCandidates(candidates) => {
                self.candidates = candidates;
                DispatchResult::changed(Vec::new())
            }
            SessionAction::SelectMention(entry) => self.select_mention(&entry),
            SessionAction::MoveCursor(movement) => self.move_cursor(movement),
            SessionAction::SetValue(value) => self.set_value(&value),
        }
    }

    /// Runs the debounced highlight pass once its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> DispatchResult {
        if self.disposed {
            return DispatchResult::unchanged();
        }
        let Some(revision) = self.highlight_timer.poll(now) else {
            return DispatchResult::unchanged();
        };
        if revision != self.text.revision() {
            tracing::trace!(revision, "stale highlight pass dropped");
            return DispatchResult::unchanged();
        }

        let same_text = self
            .snapshot
            .as_ref()
            .is_some_and(|snapshot| *snapshot.text == *self.text.as_cow());
        if same_text {
            return self.settle_unchanged();
        }

        self.rehighlight();
        self.schedule_restore(self.cursor.canonical_offset);
        DispatchResult::changed(Vec::new())
    }

    /// Called after the host rendered a frame; completes a pending cursor restore.
    pub fn on_frame(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        match self.restore.on_frame() {
            Some(pending) => self.finish_restore(pending),
            None => false,
        }
    }

    pub fn dispose(&mut self) {
        self.highlight_timer.cancel();
        self.restore.cancel();
        self.mention = None;
        self.candidates.clear();
        self.disposed = true;
    }

    fn handle_key(&mut self, key: Key, now: Instant) -> DispatchResult {
        match key.code {
            KeyCode::Esc => self.escape(),
            KeyCode::Enter => {
                if !key.is_shift() && self.mention.is_some() {
                    if let Some(first) = self.candidates.first().cloned() {
                        return self.select_mention(&first);
                    }
                }
                self.insert_text("\n", now)
            }
            KeyCode::Backspace => self.backspace(now),
            KeyCode::Delete => self.delete_forward(now),
            KeyCode::Left => self.move_cursor(CursorMove::Left),
            KeyCode::Right => self.move_cursor(CursorMove::Right),
            KeyCode::Home => self.move_cursor(CursorMove::Home),
            KeyCode::End => self.move_cursor(CursorMove::End),
            KeyCode::Char(_) => match key.text_char() {
                Some(ch) => {
                    let mut buf = [0u8; 4];
                    self.insert_text(ch.encode_utf8(&mut buf), now)
                }
                None => DispatchResult::unchanged(),
            },
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => DispatchResult::unchanged(),
        }
    }

    fn insert_text(&mut self, text: &str, now: Instant) -> DispatchResult {
        if text.is_empty() {
            return DispatchResult::unchanged();
        }
        let at = self.edit_offset();
        let edit = self.text.insert(at, text);
        self.apply_edit(edit, at + edit.inserted_len, now)
    }

    fn backspace(&mut self, now: Instant) -> DispatchResult {
        if let Some(range) = offset_map::chip_for_backspace(&self.tree, self.cursor.canonical_offset)
        {
            tracing::debug!(start = range.start, end = range.end, "mention removed");
            let start = range.start;
            let edit = self.text.remove(range);
            return self.apply_edit(edit, start, now);
        }

        let at = self.edit_offset();
        let len = prev_grapheme_len(&self.text, at);
        if len == 0 {
            return DispatchResult::unchanged();
        }
        let edit = self.text.remove(at - len..at);
        self.apply_edit(edit, at - len, now)
    }

    fn delete_forward(&mut self, now: Instant) -> DispatchResult {
        let at = self.edit_offset();
        if let Some((_, range)) = offset_map::chip_after(&self.tree, at) {
            tracing::debug!(start = range.start, end = range.end, "mention removed");
            let edit = self.text.remove(range);
            return self.apply_edit(edit, at, now);
        }

        let len = next_grapheme_len(&self.text, at);
        if len == 0 {
            return DispatchResult::unchanged();
        }
        let edit = self.text.remove(at..at + len);
        self.apply_edit(edit, at, now)
    }

    fn escape(&mut self) -> DispatchResult {
        let mut effects = Vec::new();
        self.close_mention(&mut effects);
        if effects.is_empty() {
            return DispatchResult::unchanged();
        }
        if self.phase == Phase::Idle {
            self.phase = Phase::Typing;
        }
        DispatchResult::changed(effects)
    }

    /// Replaces `[trigger start, cursor)` with the mention token and one space.
    fn select_mention(&mut self, entry: &MentionEntry) -> DispatchResult {
        let Some(trigger) = self.mention.clone() else {
            return DispatchResult::unchanged();
        };
        let cursor = self.cursor.canonical_offset;
        let mut effects = Vec::new();
        if trigger.start_offset > cursor {
            self.close_mention(&mut effects);
            return DispatchResult::changed(effects);
        }

        let inserted = format!("{} ", entry.token());
        let edit = self.text.replace(trigger.start_offset..cursor, &inserted);
        let new_cursor = trigger.start_offset + edit.inserted_len;
        tracing::debug!(id = %entry.id, start = trigger.start_offset, "mention inserted");

        self.highlight_timer.cancel();
        self.restore.cancel();
        self.rehighlight();
        self.cursor = CursorState::at(offset_map::normalize_canonical(&self.tree, new_cursor));
        self.display_cursor = offset_map::display_cursor(&self.tree, self.cursor);
        self.phase = Phase::Idle;

        effects.push(SessionEffect::Changed(self.text.to_string()));
        self.close_mention(&mut effects);
        DispatchResult::changed(effects)
    }

    fn move_cursor(&mut self, movement: CursorMove) -> DispatchResult {
        let at = self.cursor.canonical_offset;
        let target = match movement {
            CursorMove::Left => match offset_map::chip_before(&self.tree, at) {
                Some((_, range)) => range.start,
                None => at - prev_grapheme_len(&self.text, at),
            },
            CursorMove::Right => match offset_map::chip_after(&self.tree, at) {
                Some((_, range)) => range.end,
                None => at + next_grapheme_len(&self.text, at),
            },
            CursorMove::Home => 0,
            CursorMove::End => self.text.len_chars(),
            CursorMove::ToDisplay(display) => offset_map::display_to_canonical(&self.tree, display),
        };

        self.supersede_restore();
        self.cursor.canonical_offset = offset_map::normalize_canonical(&self.tree, target);
        self.display_cursor = offset_map::display_cursor(&self.tree, self.cursor);

        let mut effects = Vec::new();
        self.refresh_trigger(&mut effects);
        DispatchResult::changed(effects)
    }

    fn set_value(&mut self, value: &str) -> DispatchResult {
        if !self.text.set(value) {
            return DispatchResult::unchanged();
        }
        self.highlight_timer.cancel();
        self.rehighlight();

        let offset = self.cursor.canonical_offset.min(self.text.len_chars());
        self.cursor = CursorState::at(offset_map::normalize_canonical(&self.tree, offset));
        let mut effects = Vec::new();
        self.close_mention(&mut effects);
        self.schedule_restore(self.cursor.canonical_offset);
        DispatchResult::changed(effects)
    }

    fn apply_edit(&mut self, edit: TextEdit, cursor: usize, now: Instant) -> DispatchResult {
        self.ranges = self
            .ranges
            .iter()
            .filter_map(|range| range.rebase(&edit))
            .collect();
        self.tree = kernel::project(&self.text.as_cow(), &self.ranges);
        self.cursor = CursorState::typing(cursor);
        self.display_cursor = offset_map::display_cursor(&self.tree, self.cursor);
        self.phase = Phase::Typing;
        self.restore.cancel();
        self.highlight_timer
            .schedule(now, self.config.highlight_debounce(), self.text.revision());

        let mut effects = vec![SessionEffect::Changed(self.text.to_string())];
        self.refresh_trigger(&mut effects);
        DispatchResult::changed(effects)
    }

    fn refresh_trigger(&mut self, effects: &mut Vec<SessionEffect>) {
        let detected = detect_trigger(&self.text.prefix(self.cursor.canonical_offset));
        match detected {
            Some(trigger) => {
                if self.mention.as_ref() == Some(&trigger) {
                    return;
                }
                tracing::debug!(
                    trigger = %trigger.trigger,
                    search = %trigger.search,
                    start = trigger.start_offset,
                    "mention search"
                );
                self.mention = Some(trigger.clone());
                effects.push(SessionEffect::MentionTrigger(trigger));
            }
            None => self.close_mention(effects),
        }
    }

    fn close_mention(&mut self, effects: &mut Vec<SessionEffect>) {
        if self.mention.take().is_some() {
            self.candidates.clear();
            effects.push(SessionEffect::MentionClosed);
        }
    }

    /// Full tokenize + resolve + project. Tokenizing is skipped when the text
    /// equals the text of the previous pass.
    fn rehighlight(&mut self) {
        let text = self.text.to_string();
        let reused = match &self.snapshot {
            Some(snapshot) if snapshot.text == text => {
                self.ranges = snapshot.ranges.clone();
                true
            }
            _ => {
                let highlight = kernel::highlight(&text, self.resolver.as_ref());
                self.ranges = highlight.ranges;
                false
            }
        };
        self.tree = kernel::project(&text, &self.ranges);
        tracing::debug!(
            ranges = self.ranges.len(),
            chars = self.text.len_chars(),
            reused,
            "highlight pass"
        );
        if !reused {
            self.snapshot = Some(HighlightSnapshot {
                text,
                ranges: self.ranges.clone(),
            });
        }
    }

    /// The text is back to what the last pass saw: restore its ranges and place
    /// the cursor right away, no reconcile.
    fn settle_unchanged(&mut self) -> DispatchResult {
        let previous = std::mem::take(&mut self.ranges);
        let was_idle = self.phase == Phase::Idle;
        self.rehighlight();

        let offset = offset_map::normalize_canonical(&self.tree, self.cursor.canonical_offset);
        self.cursor = CursorState::at(offset);
        self.display_cursor = offset_map::display_cursor(&self.tree, self.cursor);
        self.phase = Phase::Idle;
        tracing::trace!(canonical = offset, "text unchanged since last highlight");

        if was_idle && previous == self.ranges {
            DispatchResult::unchanged()
        } else {
            DispatchResult::changed(Vec::new())
        }
    }

    fn schedule_restore(&mut self, canonical_offset: usize) {
        self.phase = Phase::Reconciling;
        let pending = PendingRestore {
            revision: self.text.revision(),
            canonical_offset,
        };
        if self.config.restore_frames == 0 {
            self.finish_restore(pending);
        } else {
            self.restore.schedule(self.config.restore_frames, pending);
        }
    }

    fn finish_restore(&mut self, pending: PendingRestore) -> bool {
        if pending.revision != self.text.revision() {
            tracing::trace!("stale cursor restore dropped");
            return false;
        }
        let offset = offset_map::normalize_canonical(&self.tree, pending.canonical_offset);
        self.cursor = CursorState::at(offset);
        self.display_cursor = offset_map::canonical_to_display(&self.tree, offset);
        self.phase = Phase::Idle;
        tracing::trace!(
            canonical = offset,
            display = self.display_cursor,
            "cursor restored"
        );
        true
    }

    /// A cursor placed by the user wins over a restore still waiting for frames.
    fn supersede_restore(&mut self) {
        if self.restore.is_pending() {
            self.restore.cancel();
            if self.phase == Phase::Reconciling {
                self.phase = Phase::Idle;
            }
        }
    }

    /// Canonical offset for the next edit; never inside a chip.
    fn edit_offset(&self) -> usize {
        offset_map::normalize_canonical(&self.tree, self.cursor.canonical_offset)
    }
}

fn prev_grapheme_len(text: &CanonicalText, at: usize) -> usize {
    text.prefix(at)
        .graphemes(true)
        .next_back()
        .map_or(0, |g| g.chars().count())
}

fn next_grapheme_len(text: &CanonicalText, at: usize) -> usize {
    text.slice(at..text.len_chars())
        .graphemes(true)
        .next()
        .map_or(0, |g| g.chars().count())
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;
