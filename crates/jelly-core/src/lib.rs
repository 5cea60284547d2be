//! Jelly - a text snippet expander.
//!
//! Snippets are defined in one flat string, compiled into a table of
//! trigger → expansion pairs, and expanded when a trigger ends exactly at the
//! cursor of a document reached through [`EditorOps`].

pub mod classify;
pub mod config;
pub mod dispatch;
pub mod editor;
pub mod error;
pub mod expander;
pub mod expansion;
pub mod snippet;
pub mod store;
pub mod symbol;
pub mod table;

// Re-export common items for convenience
pub use classify::{classify, SnippetType};
pub use config::{
    get_config_dir, get_settings_file_path, load_settings, save_settings, Settings, TriggerMode,
};
pub use dispatch::{dispatch, Key, KeyEvent, KeyOutcome, TriggerConfig};
pub use editor::{Buffer, EditorOps, Position};
pub use error::{JellyError, Result};
pub use expander::Expander;
pub use expansion::{find_match, try_trigger, Expansion, MatchOptions};
pub use snippet::{Lhs, Rhs, RhsInfo, Snippet};
pub use store::{LoadedTable, SnippetStore};
pub use symbol::compile;
pub use table::{parse, ParseReport, SkipReason, SkippedRecord, SnippetSource, SnippetTable};
