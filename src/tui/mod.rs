//! TUI integration layer (crossterm + ratatui).
//!
//! Kept apart from `kernel`/`session` so the core can be hosted by other frontends
//! without depending on terminal crates.

pub mod crossterm;
pub mod terminal_guard;
pub mod view;

pub use view::{ComposerView, EventResult};
