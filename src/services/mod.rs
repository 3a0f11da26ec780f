//! 服务层：配置、校验、粘贴

pub mod clipboard;
pub mod config;
pub mod validate;

pub use clipboard::{paste_text, sanitize_paste, ClipboardError};
pub use config::{load_config, settings_path, ComposerConfig, ConfigError, ConfigService};
pub use validate::{remaining_chars, validate_content, ValidationError};
