//! Snippet table parsing.
//!
//! A snippet source is one flat string. Records are separated by the snippet
//! divider (or by line breaks when the divider is the `\n` sentinel), and each
//! record is split into trigger and expansion by the part divider:
//!
//! ```text
//! asd |+| snipped ya
//! -==-
//! :: |+| hi
//! ```

use crate::snippet::{Lhs, Rhs};
use crate::symbol::compile;
use indexmap::IndexMap;
use log::warn;

/// Divider value that stands for "one record per line".
pub const NEWLINE_DIVIDER_SENTINEL: &str = "\\n";

/// Raw snippet configuration plus the two dividers used to read it.
#[derive(Debug, Clone, Copy)]
pub struct SnippetSource<'a> {
    pub text: &'a str,
    pub snippet_divider: &'a str,
    pub part_divider: &'a str,
}

impl<'a> SnippetSource<'a> {
    pub fn new(text: &'a str, snippet_divider: &'a str, part_divider: &'a str) -> Self {
        Self {
            text,
            snippet_divider,
            part_divider,
        }
    }

    /// The divider actually used to split records.
    pub fn effective_snippet_divider(&self) -> &'a str {
        if self.snippet_divider == NEWLINE_DIVIDER_SENTINEL {
            "\n"
        } else {
            self.snippet_divider
        }
    }
}

/// Compiled trigger → expansion mapping in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetTable {
    entries: IndexMap<Lhs, Rhs>,
}

impl SnippetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a snippet. A repeated trigger replaces the earlier expansion but
    /// keeps its original position.
    pub fn insert(&mut self, lhs: Lhs, rhs: Rhs) -> Option<Rhs> {
        self.entries.insert(lhs, rhs)
    }

    pub fn get(&self, lhs: &str) -> Option<&Rhs> {
        self.entries.get(lhs)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Lhs, &Rhs)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The part divider never occurs in the record.
    MissingPartDivider,
    /// The record starts with the part divider.
    EmptyLhs,
}

/// A record that could not be turned into a snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub text: String,
    pub reason: SkipReason,
}

/// Result of parsing a snippet source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub table: SnippetTable,
    pub skipped: Vec<SkippedRecord>,
    /// Triggers defined more than once; the last definition is kept.
    pub overwritten: Vec<Lhs>,
}

/// Parse a snippet source into a table. Malformed records are skipped and
/// reported; parsing itself never fails.
pub fn parse(source: &SnippetSource<'_>) -> ParseReport {
    let mut report = ParseReport::default();
    let divider = source.effective_snippet_divider();

    for (index, raw) in source.text.split(divider).enumerate() {
        let record = raw.trim();
        if record.is_empty() {
            continue;
        }

        let mut parts = record.split(source.part_divider);
        let lhs = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();

        let reason = if rest.is_empty() {
            Some(SkipReason::MissingPartDivider)
        } else if lhs.is_empty() {
            Some(SkipReason::EmptyLhs)
        } else {
            None
        };

        if let Some(reason) = reason {
            warn!("Failed to register snippet #{}: {:?} ({:?})", index, record, reason);
            report.skipped.push(SkippedRecord {
                index,
                text: record.to_string(),
                reason,
            });
            continue;
        }

        let raw_rhs = rest.join(source.part_divider);
        if report
            .table
            .insert(lhs.to_string(), compile(&raw_rhs))
            .is_some()
        {
            report.overwritten.push(lhs.to_string());
        }
    }

    report
}
