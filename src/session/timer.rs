//! 单句柄延迟任务
//!
//! 每种延迟只有一个句柄：重新调度会覆盖旧的，不会排队。句柄记录调度时的
//! 文本修订号，触发时由调用方比对，过期的任务不会作用在更新的文本上。

use std::time::{Duration, Instant};

/// Deadline-based debounce, polled from the host loop.
#[derive(Debug, Clone, Default)]
pub struct Debounce {
    deadline: Option<Instant>,
    revision: u64,
}

impl Debounce {
    pub fn schedule(&mut self, now: Instant, delay: Duration, revision: u64) {
        self.deadline = Some(now + delay);
        self.revision = revision;
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fires at most once per schedule; returns the revision it was armed for.
    pub fn poll(&mut self, now: Instant) -> Option<u64> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }

        let overshoot = now.duration_since(deadline);
        if overshoot.as_millis() > 5 {
            tracing::debug!(
                overshoot_ms = overshoot.as_millis() as u64,
                "highlight debounce overshoot"
            );
        }

        self.deadline = None;
        Some(self.revision)
    }
}

/// A value released after a number of rendered frames.
#[derive(Debug, Clone)]
pub struct FrameDeferred<T> {
    pending: Option<(u8, T)>,
}

impl<T> Default for FrameDeferred<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> FrameDeferred<T> {
    /// Replaces any pending value (last writer wins).
    pub fn schedule(&mut self, frames: u8, value: T) {
        self.pending = Some((frames, value));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Counts one frame. Returns the value once its frames have elapsed.
    pub fn on_frame(&mut self) -> Option<T> {
        let (frames, _) = self.pending.as_mut()?;
        if *frames > 1 {
            *frames -= 1;
            return None;
        }
        self.pending.take().map(|(_, value)| value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/timer.rs"]
mod tests;
