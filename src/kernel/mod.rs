//! 核心算法层：分词 → 消解 → 投影 → 偏移映射
//!
//! 编辑会话与静态渲染共用这一套流程。

pub mod extract;
pub mod offset_map;
pub mod projector;
pub mod resolver;
pub mod tokenizer;

use crate::models::{DisplayTree, MentionResolver, TaggedRange};

pub use extract::{extract_links, mention_ids, mentioned_entries};
pub use projector::project;
pub use resolver::resolve_ranges;
pub use tokenizer::{is_mention_boundary, scan_mention_tokens, scan_urls, tokenize, MentionToken};

/// Result of one full highlight pass.
#[derive(Debug, Clone, Default)]
pub struct Highlight {
    pub ranges: Vec<TaggedRange>,
    pub tree: DisplayTree,
}

pub fn highlight<R>(text: &str, resolver: &R) -> Highlight
where
    R: MentionResolver + ?Sized,
{
    let ranges = resolve_ranges(tokenize(text, resolver));
    let tree = project(text, &ranges);
    Highlight { ranges, tree }
}
