//! 多会话宿主：一个进程里同时挂载多个输入框
//!
//! 每个会话的计时与帧回调各自独立；宿主只负责路由与汇总最近的截止时间。

use super::action::{DispatchResult, SessionAction};
use super::controller::EditSession;
use crate::models::MentionResolver;
use crate::services::ComposerConfig;
use slotmap::{new_key_type, SlotMap};
use std::sync::Arc;
use std::time::Instant;

new_key_type! { pub struct SessionId; }

#[derive(Default)]
pub struct SessionHost {
    sessions: SlotMap<SessionId, EditSession>,
}

impl SessionHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(
        &mut self,
        initial: &str,
        resolver: Arc<dyn MentionResolver>,
        config: ComposerConfig,
    ) -> SessionId {
        let id = self
            .sessions
            .insert(EditSession::new(initial, resolver, config));
        tracing::debug!(session = ?id, "session created");
        id
    }

    pub fn get(&self, id: SessionId) -> Option<&EditSession> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut EditSession> {
        self.sessions.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Unknown or disposed ids are ignored.
    pub fn dispatch(&mut self, id: SessionId, action: SessionAction, now: Instant) -> DispatchResult {
        match self.sessions.get_mut(id) {
            Some(session) => session.dispatch(action, now),
            None => {
                tracing::debug!(session = ?id, "action for unknown session dropped");
                DispatchResult::unchanged()
            }
        }
    }

    /// Polls every session's debounce; returns the ids whose state changed.
    pub fn tick_all(&mut self, now: Instant) -> Vec<SessionId> {
        self.sessions
            .iter_mut()
            .filter_map(|(id, session)| session.tick(now).state_changed.then_some(id))
            .collect()
    }

    /// Forwards one rendered frame to every session.
    pub fn frame_all(&mut self) -> Vec<SessionId> {
        self.sessions
            .iter_mut()
            .filter_map(|(id, session)| session.on_frame().then_some(id))
            .collect()
    }

    /// Disposes the session and removes it. Pending work is cancelled with it.
    pub fn dispose(&mut self, id: SessionId) -> Option<String> {
        let mut session = self.sessions.remove(id)?;
        session.dispose();
        tracing::debug!(session = ?id, "session disposed");
        Some(session.text())
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.sessions
            .values()
            .filter_map(EditSession::next_deadline)
            .min()
    }

    pub fn needs_frame(&self) -> bool {
        self.sessions.values().any(EditSession::needs_frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/host.rs"]
mod tests;
