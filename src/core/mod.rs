//! 与前端无关的输入类型

pub mod event;

pub use event::{InputEvent, Key, KeyCode, KeyModifiers};
