use crate::cli::{Commands, Jelly};
use crate::utils::{escape_whitespace, load_or_default, settings_path};
use jelly_core::{
    classify, save_settings, Buffer, EditorOps, Expander, Expansion, JellyError, Key, KeyEvent,
    Result, Settings, Snippet,
};
use std::fs;
use std::path::Path;

pub fn handle_command(args: Jelly) -> Result<()> {
    let path = settings_path(args.config);
    match args.commands {
        Commands::Init { force } => handle_init(&path, force),
        Commands::Config => handle_config(&path),
        Commands::List => handle_list(&path),
        Commands::Check => handle_check(&path),
        Commands::Expand {
            file,
            cursor,
            key,
            shift,
            in_place,
        } => {
            let expander = Expander::new(load_or_default(&path)?)?;
            let text = fs::read_to_string(&file)?;
            let key = key.map(|key| KeyEvent {
                key: key.into(),
                shift,
            });
            let (buffer, expansion) = expand_text(&expander, &text, cursor, key)?;

            match &expansion {
                Some(expansion) => eprintln!(
                    "Expanded {:?} ({}), cursor at {} (offset {})",
                    expansion.snippet.lhs,
                    expansion.kind,
                    buffer.offset_to_position(buffer.cursor()),
                    buffer.cursor()
                ),
                None => eprintln!("No snippet matched"),
            }

            if in_place {
                fs::write(&file, buffer.text())?;
            } else {
                print!("{}", buffer.text());
            }
            Ok(())
        }
    }
}

fn handle_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(JellyError::Other(format!(
            "Settings already exist at {} (use --force to overwrite)",
            path.display()
        )));
    }
    save_settings(path, &Settings::default())?;
    println!("Settings written to {}", path.display());
    Ok(())
}

fn handle_config(path: &Path) -> Result<()> {
    println!("Settings file: {}", path.display());
    if !path.exists() {
        println!("(not created yet, showing defaults)");
    }
    let settings = load_or_default(path)?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

fn handle_list(path: &Path) -> Result<()> {
    let expander = Expander::new(load_or_default(path)?)?;
    let loaded = expander.current();
    if loaded.table.is_empty() {
        println!("No snippets defined.");
        return Ok(());
    }

    for (lhs, rhs) in loaded.table.iter() {
        let kind = classify(&Snippet::new(lhs.clone(), rhs.clone()));
        println!(
            "{:<16} {} -> {} (cursor -{})",
            escape_whitespace(lhs),
            kind,
            escape_whitespace(&rhs.data),
            rhs.info.cursor_end
        );
    }
    println!(
        "{} snippets, generation {} loaded at {}",
        loaded.table.len(),
        loaded.generation,
        loaded.loaded_at.to_rfc3339()
    );
    Ok(())
}

fn handle_check(path: &Path) -> Result<()> {
    let expander = Expander::new(load_or_default(path)?)?;
    let loaded = expander.current();

    for record in &loaded.skipped {
        println!(
            "record #{}: {:?}: {}",
            record.index,
            record.reason,
            escape_whitespace(&record.text)
        );
    }
    for lhs in &loaded.overwritten {
        println!("trigger {:?} is defined more than once, the last one is used", lhs);
    }
    for (lhs, rhs) in loaded.table.iter() {
        if rhs.info.extra_cursor_markers > 0 {
            println!(
                "trigger {:?} has {} cursor markers, the last one is used",
                lhs,
                rhs.info.extra_cursor_markers + 1
            );
        }
    }

    if loaded.skipped.is_empty() {
        println!("{} snippets OK", loaded.table.len());
        Ok(())
    } else {
        Err(JellyError::Other(format!(
            "{} snippet record(s) could not be parsed",
            loaded.skipped.len()
        )))
    }
}

/// Run one expansion over `text`, playing the host's part for key presses:
/// the line break for Enter lands before dispatch, the space or indent for
/// Space and Tab after it unless the dispatcher suppressed it.
pub fn expand_text(
    expander: &Expander,
    text: &str,
    cursor: Option<usize>,
    key: Option<KeyEvent>,
) -> Result<(Buffer, Option<Expansion>)> {
    let mut buffer = Buffer::new(text);
    if let Some(offset) = cursor {
        if offset > buffer.len_chars() {
            return Err(JellyError::InvalidCursor {
                offset,
                len: buffer.len_chars(),
            });
        }
        buffer.set_cursor(offset);
    }

    let Some(event) = key else {
        let expansion = expander.trigger(&mut buffer);
        return Ok((buffer, expansion));
    };

    if event.key == Key::Enter {
        buffer.insert_line_break();
    }

    let outcome = expander.handle_key(&mut buffer, event);

    if !outcome.suppresses_default() {
        match event.key {
            Key::Space => {
                let at = buffer.cursor();
                buffer.replace_range(at, at, " ");
                buffer.set_cursor(at + 1);
            }
            Key::Tab => buffer.indent(),
            Key::Enter | Key::Other => {}
        }
    }

    Ok((buffer, outcome.expansion().cloned()))
}
