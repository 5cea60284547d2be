//! End-to-end expansion tests: settings → table → trigger/dispatch → document.

use jelly_core::{
    Buffer, EditorOps, Expander, JellyError, Key, KeyEvent, KeyOutcome, Settings, SnippetType,
    TriggerMode,
};

fn settings_with(snippets: &str) -> Settings {
    Settings {
        snippets: snippets.to_string(),
        ..Settings::default()
    }
}

// ========================================================================
// Explicit trigger
// ========================================================================

#[test]
fn test_default_settings_expand_sample_snippets() {
    let expander = Expander::new(Settings::default()).unwrap();
    let mut buffer = Buffer::new("say asd");
    let expansion = expander.trigger(&mut buffer).unwrap();
    assert_eq!(expansion.snippet.lhs, "asd");
    assert_eq!(buffer.text(), "say snipped ya");
}

#[test]
fn test_trigger_without_match_leaves_document_alone() {
    let expander = Expander::new(settings_with(":: |+| hi")).unwrap();
    let mut buffer = Buffer::with_cursor("a::", 2);
    assert!(expander.trigger(&mut buffer).is_none());
    assert_eq!(buffer.text(), "a::");
    assert_eq!(buffer.cursor(), 2);
    assert_eq!(buffer.edit_count(), 0);
}

#[test]
fn test_line_divider_sentinel() {
    let settings = Settings {
        snippets: "brb => be right back\nsig => Regards,%\\nJ".to_string(),
        snippet_divider: "\\n".to_string(),
        part_divider: " => ".to_string(),
        ..Settings::default()
    };
    let expander = Expander::new(settings).unwrap();
    assert_eq!(expander.table().len(), 2);

    let mut buffer = Buffer::new("thanks\nsig");
    let expansion = expander.trigger(&mut buffer).unwrap();
    assert_eq!(expansion.kind, SnippetType::Slmr);
    assert_eq!(buffer.text(), "thanks\nRegards,\nJ");
}

#[test]
fn test_cursor_marker_places_cursor_inside_expansion() {
    let expander = Expander::new(settings_with("bold |+| **%\\e**")).unwrap();
    let mut buffer = Buffer::new("bold");
    expander.trigger(&mut buffer).unwrap();
    assert_eq!(buffer.text(), "****");
    assert_eq!(buffer.cursor(), 2);
    buffer.replace_range(2, 2, "x");
    assert_eq!(buffer.text(), "**x**");
}

// ========================================================================
// Reload and settings
// ========================================================================

#[test]
fn test_reload_twice_gives_identical_tables() {
    let mut expander = Expander::new(Settings::default()).unwrap();
    let first = expander.reload().unwrap();
    let second = expander.reload().unwrap();
    assert_eq!(first.table, second.table);
    assert_eq!(second.generation, first.generation + 1);
}

#[test]
fn test_set_settings_rebuilds_only_on_source_change() {
    let mut expander = Expander::new(settings_with("a |+| 1")).unwrap();
    let generation = expander.generation();

    let mut settings = expander.settings().clone();
    settings.trigger_on_enter = TriggerMode::Enabled;
    assert!(!expander.set_settings(settings.clone()).unwrap());
    assert_eq!(expander.generation(), generation);

    settings.snippets = "b |+| 2".to_string();
    assert!(expander.set_settings(settings).unwrap());
    assert_eq!(expander.generation(), generation + 1);
    assert!(expander.table().get("b").is_some());
    assert!(expander.table().get("a").is_none());
}

#[test]
fn test_invalid_settings_keep_previous_table() {
    let mut expander = Expander::new(settings_with("a |+| 1")).unwrap();
    let mut settings = expander.settings().clone();
    settings.snippets = "b |+| 2".to_string();
    settings.part_divider = String::new();

    let result = expander.set_settings(settings);
    assert!(matches!(result, Err(JellyError::InvalidConfig(_))));
    assert!(expander.table().get("a").is_some());
}

#[test]
fn test_malformed_records_do_not_stop_parsing() {
    let expander = Expander::new(settings_with("a |+| 1-==-junk-==-b |+| 2")).unwrap();
    let loaded = expander.current();
    assert_eq!(loaded.table.len(), 2);
    assert_eq!(loaded.skipped.len(), 1);
}

// ========================================================================
// Key dispatch
// ========================================================================

#[test]
fn test_space_channel() {
    let expander = Expander::new(settings_with(":: |+| hi")).unwrap();
    let mut buffer = Buffer::new("a::");
    let outcome = expander.handle_key(&mut buffer, KeyEvent::new(Key::Space));
    assert!(outcome.expansion().is_some());
    assert_eq!(buffer.text(), "ahi");
}

#[test]
fn test_enter_is_disabled_by_default() {
    let expander = Expander::new(settings_with(":: |+| hi")).unwrap();
    let mut buffer = Buffer::new("a::\n");
    let outcome = expander.handle_key(&mut buffer, KeyEvent::new(Key::Enter));
    assert_eq!(outcome, KeyOutcome::Ignored);
    assert_eq!(buffer.text(), "a::\n");
}

#[test]
fn test_enter_channel_with_whitespace() {
    let settings = Settings {
        trigger_on_enter: TriggerMode::EnabledWithWhitespace,
        ..settings_with("li |+| <li>%\\e</li>")
    };
    let expander = Expander::new(settings).unwrap();
    let mut buffer = Buffer::new("<ul>\n  li\n  ");
    expander.handle_key(&mut buffer, KeyEvent::new(Key::Enter));
    assert_eq!(buffer.text(), "<ul>\n  <li>\n</li>");
    assert_eq!(buffer.cursor(), 12);
}

#[test]
fn test_shift_tab_never_triggers() {
    let expander = Expander::new(settings_with(":: |+| hi")).unwrap();
    let mut buffer = Buffer::new("a::");
    let outcome = expander.handle_key(&mut buffer, KeyEvent::with_shift(Key::Tab));
    assert_eq!(outcome, KeyOutcome::Ignored);
    assert_eq!(buffer.edit_count(), 0);
}

#[test]
fn test_multiline_lhs_setting() {
    let settings = Settings {
        multiline_lhs: false,
        ..settings_with("x\ny |+| joined")
    };
    let expander = Expander::new(settings).unwrap();
    let mut buffer = Buffer::new("x\ny");
    assert!(expander.trigger(&mut buffer).is_none());
}
