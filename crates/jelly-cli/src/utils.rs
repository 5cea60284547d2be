use jelly_core::{get_settings_file_path, load_settings, JellyError, Result, Settings};
use log::info;
use std::path::{Path, PathBuf};

/// Initialise logging. `RUST_LOG` overrides the default level.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

pub fn settings_path(config: Option<PathBuf>) -> PathBuf {
    config.unwrap_or_else(get_settings_file_path)
}

/// Load settings, falling back to the defaults when no file exists yet.
pub fn load_or_default(path: &Path) -> Result<Settings> {
    match load_settings(path) {
        Ok(settings) => Ok(settings),
        Err(JellyError::SettingsNotFound(path)) => {
            info!("No settings at {}, using defaults", path);
            Ok(Settings::default())
        }
        Err(e) => Err(e),
    }
}

/// Make line breaks and tabs visible for one-line display.
pub fn escape_whitespace(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
