//! Classification of matched snippets by where line breaks occur.

use crate::snippet::Snippet;
use std::fmt;

/// Shape of a snippet. Bit 0 is set when the expansion spans lines, bit 1
/// when the trigger does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SnippetType {
    /// Single-line trigger, single-line expansion.
    Slsr = 0b00,
    /// Single-line trigger, multi-line expansion.
    Slmr = 0b01,
    /// Multi-line trigger, single-line expansion.
    Mlsr = 0b10,
    /// Multi-line trigger, multi-line expansion.
    Mlmr = 0b11,
}

impl SnippetType {
    pub fn from_bits(lhs_multiline: bool, rhs_multiline: bool) -> Self {
        match (lhs_multiline, rhs_multiline) {
            (false, false) => SnippetType::Slsr,
            (false, true) => SnippetType::Slmr,
            (true, false) => SnippetType::Mlsr,
            (true, true) => SnippetType::Mlmr,
        }
    }
}

impl fmt::Display for SnippetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SnippetType::Slsr => "SLSR",
            SnippetType::Slmr => "SLMR",
            SnippetType::Mlsr => "MLSR",
            SnippetType::Mlmr => "MLMR",
        };
        f.write_str(name)
    }
}

pub fn classify(snippet: &Snippet) -> SnippetType {
    SnippetType::from_bits(snippet.lhs.contains('\n'), snippet.rhs.info.has_newline)
}
