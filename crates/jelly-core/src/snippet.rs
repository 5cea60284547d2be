//! Snippet model: trigger text, compiled expansion and match results.

/// Trigger text typed by the user.
pub type Lhs = String;

/// Metadata computed while compiling a right-hand side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RhsInfo {
    /// True if `data` contains a line break.
    pub has_newline: bool,
    /// Characters, counted from the end of `data`, the cursor moves left after insertion.
    pub cursor_end: usize,
    /// Cursor-end markers that were overridden by a later one.
    pub extra_cursor_markers: usize,
}

/// A compiled right-hand side, ready for insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rhs {
    pub data: String,
    pub info: RhsInfo,
}

impl Rhs {
    /// Length of the inserted text in characters.
    pub fn char_len(&self) -> usize {
        self.data.chars().count()
    }
}

/// A trigger paired with its expansion, as reported by a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub lhs: Lhs,
    pub rhs: Rhs,
}

impl Snippet {
    pub fn new(lhs: impl Into<Lhs>, rhs: Rhs) -> Self {
        Self {
            lhs: lhs.into(),
            rhs,
        }
    }
}
