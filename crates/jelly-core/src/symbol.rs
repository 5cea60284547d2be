//! Escape symbols recognised inside raw snippet expansions.
//!
//! The codec is a single left-to-right scan over a fixed, ordered list of
//! tokens. Data symbols emit a literal replacement; the cursor-end symbol is a
//! zero-width marker that records where the cursor should land after the
//! expansion is inserted.
//!
//! | token | meaning                |
//! |-------|------------------------|
//! | `%\n` | line break             |
//! | `%\t` | tab                    |
//! | `%\e` | cursor position marker |
//!
//! When an expansion holds several cursor markers the last one wins.

use crate::snippet::{Rhs, RhsInfo};
use log::debug;

const NEWLINE_SYMBOL: &str = "%\\n";
const TAB_SYMBOL: &str = "%\\t";
const CURSOR_END_SYMBOL: &str = "%\\e";

/// What a recognised token does to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolKind {
    /// Replaced by the given literal text.
    Data(&'static str),
    /// Consumed without output; marks the cursor position.
    CursorEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Symbol {
    token: &'static str,
    kind: SymbolKind,
}

/// Recognised symbols in priority order: data symbols before the marker.
const SYMBOLS: &[Symbol] = &[
    Symbol {
        token: NEWLINE_SYMBOL,
        kind: SymbolKind::Data("\n"),
    },
    Symbol {
        token: TAB_SYMBOL,
        kind: SymbolKind::Data("\t"),
    },
    Symbol {
        token: CURSOR_END_SYMBOL,
        kind: SymbolKind::CursorEnd,
    },
];

fn symbol_at(rest: &str) -> Option<&'static Symbol> {
    SYMBOLS.iter().find(|symbol| rest.starts_with(symbol.token))
}

/// Compile a raw right-hand side into insertable text plus cursor metadata.
pub fn compile(raw: &str) -> Rhs {
    let mut data = String::with_capacity(raw.len());
    let mut emitted = 0usize;
    let mut end_found: Option<usize> = None;
    let mut extra_cursor_markers = 0usize;
    let mut i = 0usize;

    while i < raw.len() {
        let rest = &raw[i..];

        if let Some(symbol) = symbol_at(rest) {
            match symbol.kind {
                SymbolKind::Data(replacement) => {
                    data.push_str(replacement);
                    emitted += replacement.chars().count();
                }
                SymbolKind::CursorEnd => {
                    if end_found.is_some() {
                        extra_cursor_markers += 1;
                        debug!(
                            "Cursor marker at char {} overrides an earlier one in {:?}",
                            emitted, raw
                        );
                    }
                    end_found = Some(emitted);
                }
            }
            i += symbol.token.len();
            continue;
        }

        // `i` always sits on a char boundary: tokens are ASCII and literal
        // characters advance by their UTF-8 width.
        if let Some(ch) = rest.chars().next() {
            data.push(ch);
            emitted += 1;
            i += ch.len_utf8();
        }
    }

    let cursor_end = match end_found {
        Some(idx) => emitted - idx,
        None => 0,
    };

    Rhs {
        info: RhsInfo {
            has_newline: data.contains('\n'),
            cursor_end,
            extra_cursor_markers,
        },
        data,
    }
}
