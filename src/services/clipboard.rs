//! 粘贴内容处理
//!
//! 粘贴只接受纯文本：换行统一为 `\n`，去掉除制表符外的控制字符。
//! 读取剪贴板失败时视为插入空字符串。

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    NotAvailable,
    GetFailed(String),
    TooLarge(usize),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::NotAvailable => write!(f, "clipboard not available"),
            ClipboardError::GetFailed(e) => write!(f, "failed to read clipboard: {}", e),
            ClipboardError::TooLarge(size) => write!(f, "pasted text too large ({} bytes)", size),
        }
    }
}

impl std::error::Error for ClipboardError {}

pub fn sanitize_paste(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    normalized
        .chars()
        .filter(|&ch| ch == '\n' || ch == '\t' || !ch.is_control())
        .collect()
}

/// Text to insert for a paste. Failures and oversized payloads insert nothing.
pub fn paste_text(payload: Result<String, ClipboardError>, max_bytes: usize) -> String {
    let payload = payload.and_then(|text| {
        if text.len() > max_bytes {
            Err(ClipboardError::TooLarge(text.len()))
        } else {
            Ok(text)
        }
    });
    match payload {
        Ok(text) => sanitize_paste(&text),
        Err(error) => {
            tracing::warn!(error = %error, "paste dropped");
            String::new()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/clipboard.rs"]
mod tests;
