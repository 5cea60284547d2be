//! Anchored snippet matching and substitution.
//!
//! A trigger matches only when it ends exactly at the cursor: for a trigger of
//! `n` characters the engine reads the `n` characters before the cursor and
//! compares them verbatim. Triggers are tried in table order and the first
//! match wins.

use crate::classify::{classify, SnippetType};
use crate::editor::EditorOps;
use crate::snippet::{Lhs, Rhs, Snippet};
use crate::table::SnippetTable;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Allow triggers that span lines. When off, look-back stops at the
    /// start of the cursor's line.
    pub multiline_lhs: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            multiline_lhs: true,
        }
    }
}

/// A completed expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub snippet: Snippet,
    pub kind: SnippetType,
    /// Offset where the trigger started and the expansion was inserted.
    pub start: usize,
    /// Offset just past the inserted text.
    pub end: usize,
    /// Cursor after the expansion.
    pub cursor: usize,
}

/// Find the first trigger ending exactly at `cursor`, without editing.
pub fn find_match<'t, E>(
    editor: &E,
    cursor: usize,
    table: &'t SnippetTable,
    options: MatchOptions,
) -> Option<(usize, &'t Lhs, &'t Rhs)>
where
    E: EditorOps + ?Sized,
{
    let floor = if options.multiline_lhs {
        0
    } else {
        editor.line_start(cursor)
    };

    for (lhs, rhs) in table.iter() {
        if lhs.is_empty() || (!options.multiline_lhs && lhs.contains('\n')) {
            continue;
        }

        let len = lhs.chars().count();
        let start = match cursor.checked_sub(len) {
            Some(start) if start >= floor => start,
            _ => continue,
        };

        if editor.read_range(start, cursor) == *lhs {
            return Some((start, lhs, rhs));
        }
    }

    None
}

/// Expand the trigger ending at `cursor`, if any.
///
/// On a match the trigger is replaced by the expansion and the cursor is moved
/// `cursor_end` characters back from the end of the inserted text. Without a
/// match the document is left untouched.
pub fn try_trigger<E>(
    editor: &mut E,
    cursor: usize,
    table: &SnippetTable,
    options: MatchOptions,
) -> Option<Expansion>
where
    E: EditorOps + ?Sized,
{
    let (start, lhs, rhs) = find_match(editor, cursor, table, options)?;

    editor.replace_range(start, cursor, &rhs.data);
    let end = start + rhs.char_len();
    let new_cursor = end - rhs.info.cursor_end;
    editor.set_cursor(new_cursor);

    let snippet = Snippet::new(lhs.clone(), rhs.clone());
    let kind = classify(&snippet);
    debug!(
        "Expanded {:?} at {}..{} ({}), cursor -> {}",
        snippet.lhs, start, cursor, kind, new_cursor
    );

    Some(Expansion {
        snippet,
        kind,
        start,
        end,
        cursor: new_cursor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Buffer;
    use crate::table::{parse, SnippetSource};

    fn table(text: &str) -> SnippetTable {
        parse(&SnippetSource::new(text, "-==-", " |+| ")).table
    }

    #[test]
    fn test_anchored_match_at_cursor() {
        let table = table(":: |+| hi");
        let mut buffer = Buffer::new("a::");
        let expansion = try_trigger(&mut buffer, 3, &table, MatchOptions::default()).unwrap();
        assert_eq!(buffer.text(), "ahi");
        assert_eq!(buffer.cursor(), 3);
        assert_eq!(expansion.snippet.lhs, "::");
        assert_eq!(expansion.kind, SnippetType::Slsr);
    }

    #[test]
    fn test_no_match_when_trigger_does_not_end_at_cursor() {
        let table = table(":: |+| hi");
        let mut buffer = Buffer::new("a::");
        assert!(try_trigger(&mut buffer, 2, &table, MatchOptions::default()).is_none());
        assert_eq!(buffer.text(), "a::");
        assert_eq!(buffer.edit_count(), 0);
    }

    #[test]
    fn test_insufficient_look_back_is_skipped() {
        let table = table("long trigger |+| x-==-ng |+| y");
        let mut buffer = Buffer::new("ng");
        let expansion = try_trigger(&mut buffer, 2, &table, MatchOptions::default()).unwrap();
        assert_eq!(expansion.snippet.lhs, "ng");
        assert_eq!(buffer.text(), "y");
    }

    #[test]
    fn test_first_match_in_table_order_wins() {
        let table = table("b: |+| short-==-ab: |+| long");
        let mut buffer = Buffer::new("ab:");
        try_trigger(&mut buffer, 3, &table, MatchOptions::default()).unwrap();
        assert_eq!(buffer.text(), "ashort");
    }

    #[test]
    fn test_earlier_occurrence_on_line_does_not_match() {
        let table = table(":: |+| hi");
        let mut buffer = Buffer::new(":: x");
        assert!(try_trigger(&mut buffer, 4, &table, MatchOptions::default()).is_none());
        assert_eq!(buffer.edit_count(), 0);
    }

    #[test]
    fn test_cursor_end_moves_cursor_back() {
        let table = table("paren |+| (%\\e)");
        let mut buffer = Buffer::new("x paren");
        let expansion = try_trigger(&mut buffer, 7, &table, MatchOptions::default()).unwrap();
        assert_eq!(buffer.text(), "x ()");
        assert_eq!(buffer.cursor(), 3);
        assert_eq!(expansion.end, 4);
    }

    #[test]
    fn test_multiline_expansion_cursor_uses_absolute_offsets() {
        let table = table("fn |+| fn() {%\\n%\\t%\\e%\\n}");
        let mut buffer = Buffer::new("x\nfn");
        let expansion = try_trigger(&mut buffer, 4, &table, MatchOptions::default()).unwrap();
        assert_eq!(buffer.text(), "x\nfn() {\n\t\n}");
        assert_eq!(expansion.kind, SnippetType::Slmr);
        // Cursor sits after the tab on the middle line.
        assert_eq!(buffer.cursor(), 10);
        assert_eq!(buffer.offset_to_position(10).line, 2);
    }

    #[test]
    fn test_multiline_trigger() {
        let table = table("a\nb |+| joined");
        let mut buffer = Buffer::new("x a\nb");
        let expansion = try_trigger(&mut buffer, 5, &table, MatchOptions::default()).unwrap();
        assert_eq!(buffer.text(), "x joined");
        assert_eq!(expansion.kind, SnippetType::Mlsr);
    }

    #[test]
    fn test_multiline_trigger_disabled() {
        let table = table("a\nb |+| joined-==-b |+| bee");
        let options = MatchOptions {
            multiline_lhs: false,
        };
        let mut buffer = Buffer::new("x a\nb");
        let expansion = try_trigger(&mut buffer, 5, &table, options).unwrap();
        assert_eq!(expansion.snippet.lhs, "b");
        assert_eq!(buffer.text(), "x a\nbee");
    }

    #[test]
    fn test_look_back_stops_at_line_start_when_single_line() {
        let table = table("a b |+| x");
        let options = MatchOptions {
            multiline_lhs: false,
        };
        let buffer = Buffer::new("a\na b");
        assert!(find_match(&buffer, 5, &table, options).is_some());
        let buffer = Buffer::new("a b\nb");
        assert!(find_match(&buffer, 5, &table, options).is_none());
    }

    #[test]
    fn test_non_ascii_trigger() {
        let table = table("café |+| coffee");
        let mut buffer = Buffer::new("un café");
        try_trigger(&mut buffer, 7, &table, MatchOptions::default()).unwrap();
        assert_eq!(buffer.text(), "un coffee");
    }

    #[test]
    fn test_empty_table_never_matches() {
        let mut buffer = Buffer::new("anything");
        assert!(try_trigger(&mut buffer, 8, &SnippetTable::new(), MatchOptions::default()).is_none());
    }
}
