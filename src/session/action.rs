use super::trigger::MentionTrigger;
use crate::core::Key;
use crate::models::MentionEntry;
use crate::services::ClipboardError;

#[derive(Debug, Clone)]
pub enum SessionAction {
    /// Text typed at the cursor.
    InsertText(String),
    Key(Key),
    /// Clipboard content as read by the host; a failed read inserts nothing.
    Paste(Result<String, ClipboardError>),
    /// Candidates the host currently shows for the open mention search.
    SetCandidates(Vec<MentionEntry>),
    /// A candidate picked from the mention picker.
    SelectMention(MentionEntry),
    MoveCursor(CursorMove),
    /// Replaces the canonical text from outside the session.
    SetValue(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Home,
    End,
    /// Click or selection on the surface, in display coordinates.
    ToDisplay(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// Canonical text after a user mutation.
    Changed(String),
    /// The mention search opened or its search string changed.
    MentionTrigger(MentionTrigger),
    MentionClosed,
    /// Validated, trimmed text handed off by `submit`.
    Submitted(String),
}

#[derive(Debug, Default)]
pub struct DispatchResult {
    pub effects: Vec<SessionEffect>,
    pub state_changed: bool,
}

impl DispatchResult {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed(effects: Vec<SessionEffect>) -> Self {
        Self {
            effects,
            state_changed: true,
        }
    }
}
