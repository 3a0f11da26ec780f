/// Cursor position kept in canonical coordinates.
///
/// `is_typing` marks a burst of input since the last highlight pass; while the
/// display tree carries no chips the display offset can be taken as identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    pub canonical_offset: usize,
    pub is_typing: bool,
}

impl CursorState {
    pub fn at(canonical_offset: usize) -> Self {
        Self {
            canonical_offset,
            is_typing: false,
        }
    }

    pub fn typing(canonical_offset: usize) -> Self {
        Self {
            canonical_offset,
            is_typing: true,
        }
    }
}
