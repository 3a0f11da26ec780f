//! mention-composer - 支持提及的富文本输入核心
//!
//! 模块结构：
//! - models: 数据模型（CanonicalText, TaggedRange, DisplayTree, MentionDirectory）
//! - kernel: 分词 → 消解 → 投影 → 偏移映射
//! - session: 编辑会话状态机（防抖高亮、提及搜索、光标恢复）
//! - render: 静态 HTML 渲染
//! - services: 配置、校验、粘贴
//! - core: 与前端无关的输入事件
//! - tui: 终端宿主（feature `tui`）

pub mod core;
pub mod kernel;
pub mod logging;
pub mod models;
pub mod render;
pub mod services;
pub mod session;
#[cfg(feature = "tui")]
pub mod tui;
