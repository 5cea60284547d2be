//! Automatic triggering from space, tab and enter key presses.
//!
//! The host editor has its own default action for each key. Space is handled
//! before the space is typed. Tab is handled before the host indents, and the
//! dispatcher decides whether that indent happens. Enter is handled after the
//! host has already broken the line, so a successful expansion has to remove
//! that line break again.

use crate::classify::SnippetType;
use crate::config::{Settings, TriggerMode};
use crate::editor::EditorOps;
use crate::expansion::{try_trigger, Expansion, MatchOptions};
use crate::table::SnippetTable;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Tab,
    Enter,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn with_shift(key: Key) -> Self {
        Self { key, shift: true }
    }
}

/// Per-key trigger configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TriggerConfig {
    pub space: TriggerMode,
    pub tab: TriggerMode,
    pub enter: TriggerMode,
}

impl TriggerConfig {
    pub fn mode(&self, key: Key) -> TriggerMode {
        match key {
            Key::Space => self.space,
            Key::Tab => self.tab,
            Key::Enter => self.enter,
            Key::Other => TriggerMode::Disabled,
        }
    }
}

impl From<&Settings> for TriggerConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            space: settings.trigger_on_space,
            tab: settings.trigger_on_tab,
            enter: settings.trigger_on_enter,
        }
    }
}

/// What the host should do after the dispatcher has seen a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a trigger for the current configuration.
    Ignored,
    /// Nothing expanded; the host's default action stands.
    PassThrough,
    /// A snippet was expanded. With `suppress_default` the host must not
    /// perform its own action for the key.
    Expanded {
        expansion: Expansion,
        suppress_default: bool,
    },
}

impl KeyOutcome {
    pub fn expansion(&self) -> Option<&Expansion> {
        match self {
            KeyOutcome::Expanded { expansion, .. } => Some(expansion),
            _ => None,
        }
    }

    pub fn suppresses_default(&self) -> bool {
        matches!(
            self,
            KeyOutcome::Expanded {
                suppress_default: true,
                ..
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    AwaitingEvent,
    Compensating,
    Done,
}

/// State of one key channel while an event is handled.
#[derive(Debug)]
struct Channel {
    key: Key,
    mode: TriggerMode,
    state: ChannelState,
}

impl Channel {
    fn new(key: Key, mode: TriggerMode) -> Self {
        Self {
            key,
            mode,
            state: ChannelState::AwaitingEvent,
        }
    }

    fn advance(&mut self, next: ChannelState) {
        debug!("{:?} channel: {:?} -> {:?}", self.key, self.state, next);
        self.state = next;
    }

    fn finish(&mut self, outcome: KeyOutcome) -> KeyOutcome {
        self.advance(ChannelState::Done);
        outcome
    }
}

/// Handle one key event against `table`.
pub fn dispatch<E>(
    editor: &mut E,
    event: KeyEvent,
    triggers: &TriggerConfig,
    table: &SnippetTable,
    options: MatchOptions,
) -> KeyOutcome
where
    E: EditorOps + ?Sized,
{
    if event.shift {
        return KeyOutcome::Ignored;
    }

    let mode = triggers.mode(event.key);
    if !mode.is_enabled() {
        return KeyOutcome::Ignored;
    }

    let mut channel = Channel::new(event.key, mode);
    match event.key {
        Key::Space => on_space(editor, &mut channel, table, options),
        Key::Tab => on_tab(editor, &mut channel, table, options),
        Key::Enter => on_enter(editor, &mut channel, table, options),
        Key::Other => KeyOutcome::Ignored,
    }
}

/// Space runs before the host types the space, and the space is always typed,
/// so `Enabled` and `EnabledWithWhitespace` behave the same here.
fn on_space<E>(
    editor: &mut E,
    channel: &mut Channel,
    table: &SnippetTable,
    options: MatchOptions,
) -> KeyOutcome
where
    E: EditorOps + ?Sized,
{
    let cursor = editor.cursor();
    let outcome = match try_trigger(editor, cursor, table, options) {
        Some(expansion) => KeyOutcome::Expanded {
            expansion,
            suppress_default: false,
        },
        None => KeyOutcome::PassThrough,
    };
    channel.finish(outcome)
}

fn on_tab<E>(
    editor: &mut E,
    channel: &mut Channel,
    table: &SnippetTable,
    options: MatchOptions,
) -> KeyOutcome
where
    E: EditorOps + ?Sized,
{
    // The host's indent is held back until we know whether anything expanded.
    let cursor = editor.cursor();
    let Some(expansion) = try_trigger(editor, cursor, table, options) else {
        return channel.finish(KeyOutcome::PassThrough);
    };

    channel.advance(ChannelState::Compensating);
    if expansion.kind == SnippetType::Slsr && channel.mode.keeps_whitespace() {
        editor.indent();
    }

    channel.finish(KeyOutcome::Expanded {
        expansion,
        suppress_default: true,
    })
}

fn on_enter<E>(
    editor: &mut E,
    channel: &mut Channel,
    table: &SnippetTable,
    options: MatchOptions,
) -> KeyOutcome
where
    E: EditorOps + ?Sized,
{
    let host_cursor = editor.cursor();
    let line = editor.offset_to_position(host_cursor).line;
    if line == 0 {
        return channel.finish(KeyOutcome::PassThrough);
    }

    let trigger_end = editor.line_end(line - 1);
    let Some(expansion) = try_trigger(editor, trigger_end, table, options) else {
        editor.set_cursor(host_cursor);
        return channel.finish(KeyOutcome::PassThrough);
    };

    channel.advance(ChannelState::Compensating);

    // Everything between the expansion and the host's cursor is the line
    // break plus whatever indentation the host added.
    let lhs_len = expansion.snippet.lhs.chars().count();
    let host_cursor = host_cursor + expansion.end - expansion.start - lhs_len;
    if host_cursor > expansion.end {
        editor.replace_range(expansion.end, host_cursor, "");
    }
    editor.set_cursor(expansion.cursor);

    if channel.mode.keeps_whitespace() {
        let before = editor.cursor();
        editor.insert_line_break();
        let after = editor.cursor();
        if after > before + 1 {
            editor.replace_range(before + 1, after, "");
        }
        editor.set_cursor(before + 1);
    }

    channel.finish(KeyOutcome::Expanded {
        expansion,
        suppress_default: false,
    })
}
