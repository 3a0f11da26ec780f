//! 数据模型层

pub mod canonical;
pub mod cursor;
pub mod directory;
pub mod display;
pub mod range;

pub use canonical::{slice_to_cow, CanonicalText, TextEdit};
pub use cursor::CursorState;
pub use directory::{
    DirectoryError, MentionDirectory, MentionEntry, MentionResolver, DEFAULT_LINK_BASE,
    MENTION_ID_LEN, MENTION_PREFIX,
};
pub use display::{DisplayNode, DisplayTree, LineSegment, MentionChip, NodeSpan};
pub use range::{RangeKind, RangePayload, TaggedRange};
