//! Current compiled snippet table.
//!
//! A reload builds a complete new table and then swaps a single `Arc`, so a
//! reader holding the previous generation keeps a consistent view.

use crate::snippet::Lhs;
use crate::table::{parse, SkippedRecord, SnippetSource, SnippetTable};
use chrono::{DateTime, Local};
use log::debug;
use std::sync::Arc;

/// One generation of the compiled table plus its parse diagnostics.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: SnippetTable,
    pub skipped: Vec<SkippedRecord>,
    pub overwritten: Vec<Lhs>,
    pub generation: u64,
    pub loaded_at: DateTime<Local>,
}

impl LoadedTable {
    fn empty() -> Self {
        Self {
            table: SnippetTable::new(),
            skipped: Vec::new(),
            overwritten: Vec::new(),
            generation: 0,
            loaded_at: Local::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SnippetStore {
    current: Arc<LoadedTable>,
}

impl Default for SnippetStore {
    fn default() -> Self {
        Self {
            current: Arc::new(LoadedTable::empty()),
        }
    }
}

impl SnippetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(source: &SnippetSource<'_>) -> Self {
        let mut store = Self::new();
        store.reload(source);
        store
    }

    /// Rebuild the table from `source` and make it current.
    pub fn reload(&mut self, source: &SnippetSource<'_>) -> Arc<LoadedTable> {
        let report = parse(source);
        let loaded = Arc::new(LoadedTable {
            table: report.table,
            skipped: report.skipped,
            overwritten: report.overwritten,
            generation: self.current.generation + 1,
            loaded_at: Local::now(),
        });

        debug!(
            "Loaded snippet table generation {} ({} snippets, {} skipped)",
            loaded.generation,
            loaded.table.len(),
            loaded.skipped.len()
        );

        self.current = Arc::clone(&loaded);
        loaded
    }

    pub fn current(&self) -> Arc<LoadedTable> {
        Arc::clone(&self.current)
    }

    pub fn table(&self) -> &SnippetTable {
        &self.current.table
    }

    pub fn generation(&self) -> u64 {
        self.current.generation
    }
}
