//! 编辑会话：按键 → 规范文本 → 防抖高亮 → 光标恢复

pub mod action;
pub mod controller;
pub mod host;
pub mod timer;
pub mod trigger;

pub use action::{CursorMove, DispatchResult, SessionAction, SessionEffect};
pub use controller::{EditSession, SessionState};
pub use host::{SessionHost, SessionId};
pub use timer::{Debounce, FrameDeferred};
pub use trigger::{detect_trigger, MentionTrigger, TRIGGERS};
