//! 配置服务：管理输入框配置
//!
//! 提供统一的配置管理，支持从 JSON 文件加载与运行时修改

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fmt, io};

const SETTINGS_DIR: &str = "mention-composer";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// 最后一次按键后多久执行完整高亮
    pub highlight_debounce_ms: u64,
    /// 重新投影后等待多少帧再恢复光标
    pub restore_frames: u8,
    pub min_length: usize,
    pub max_length: usize,
    pub paste_max_bytes: usize,
    /// 提及候选列表最多显示多少项
    pub candidate_limit: usize,
    pub link_base: String,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            highlight_debounce_ms: 300,
            restore_frames: 2,
            min_length: 0,
            max_length: 2000,
            paste_max_bytes: 10 * 1024 * 1024,
            candidate_limit: 10,
            link_base: crate::models::DEFAULT_LINK_BASE.to_string(),
        }
    }
}

impl ComposerConfig {
    pub fn highlight_debounce(&self) -> Duration {
        Duration::from_millis(self.highlight_debounce_ms)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read settings: {}", e),
            ConfigError::Parse(e) => write!(f, "invalid settings: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

pub fn load_config(path: &Path) -> Result<ComposerConfig, ConfigError> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

/// 日志目录：缓存目录下的 `mention-composer/logs`，失败时退回临时目录
pub fn ensure_log_dir() -> io::Result<PathBuf> {
    let base = cache_dir().unwrap_or_else(std::env::temp_dir);
    let dir = base.join(SETTINGS_DIR).join("logs");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn config_dir() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg));
        }
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
}

fn cache_dir() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg));
        }
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".cache"))
}

pub struct ConfigService {
    composer: ComposerConfig,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            composer: ComposerConfig::default(),
        }
    }

    /// 读取用户配置；文件不存在或无效时使用默认值
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::new();
        };
        match load_config(path) {
            Ok(composer) => Self { composer },
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Self::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "settings ignored");
                Self::new()
            }
        }
    }

    pub fn composer(&self) -> &ComposerConfig {
        &self.composer
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/services/config.rs"]
mod tests;
