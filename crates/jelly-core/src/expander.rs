//! Settings plus the current snippet table, wired to the matcher and the key
//! dispatcher.

use crate::config::Settings;
use crate::dispatch::{dispatch, KeyEvent, KeyOutcome, TriggerConfig};
use crate::editor::EditorOps;
use crate::error::Result;
use crate::expansion::{try_trigger, Expansion};
use crate::store::{LoadedTable, SnippetStore};
use crate::table::SnippetTable;
use log::info;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Expander {
    settings: Settings,
    store: SnippetStore,
}

impl Expander {
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let store = SnippetStore::load(&settings.source());
        Ok(Self { settings, store })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn table(&self) -> &SnippetTable {
        self.store.table()
    }

    pub fn current(&self) -> Arc<LoadedTable> {
        self.store.current()
    }

    pub fn generation(&self) -> u64 {
        self.store.generation()
    }

    /// Rebuild the table from the current settings.
    pub fn reload(&mut self) -> Result<Arc<LoadedTable>> {
        self.settings.validate()?;
        Ok(self.store.reload(&self.settings.source()))
    }

    /// Replace the settings. Returns true if the table was rebuilt. Invalid
    /// settings are rejected and the previous settings stay in place.
    pub fn set_settings(&mut self, settings: Settings) -> Result<bool> {
        settings.validate()?;
        let rebuild = self.settings.affects_table(&settings);
        self.settings = settings;
        if rebuild {
            let loaded = self.store.reload(&self.settings.source());
            info!(
                "Snippet settings changed, loaded {} snippets",
                loaded.table.len()
            );
        }
        Ok(rebuild)
    }

    /// Expand the trigger ending at the editor's cursor.
    pub fn trigger<E>(&self, editor: &mut E) -> Option<Expansion>
    where
        E: EditorOps + ?Sized,
    {
        let loaded = self.store.current();
        let cursor = editor.cursor();
        try_trigger(
            editor,
            cursor,
            &loaded.table,
            self.settings.match_options(),
        )
    }

    /// React to a key press according to the trigger settings.
    pub fn handle_key<E>(&self, editor: &mut E, event: KeyEvent) -> KeyOutcome
    where
        E: EditorOps + ?Sized,
    {
        let loaded = self.store.current();
        dispatch(
            editor,
            event,
            &TriggerConfig::from(&self.settings),
            &loaded.table,
            self.settings.match_options(),
        )
    }
}
