use crate::error::{JellyError, Result};
use crate::expansion::MatchOptions;
use crate::table::SnippetSource;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIRNAME: &str = ".jelly";
pub const SETTINGS_FILENAME: &str = "settings.json";

pub const DEFAULT_SNIPPET_DIVIDER: &str = "-==-";
pub const DEFAULT_PART_DIVIDER: &str = " |+| ";
pub const DEFAULT_SNIPPETS: &str = "asd |+| snipped ya
-==-
- |+| #####
-==-
: |+| -
-==-
:: |+| hi
";

/// How a key channel reacts to a keystroke.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerMode {
    #[default]
    Disabled,
    /// Expand, leaving no whitespace behind.
    Enabled,
    /// Expand and keep the whitespace the key would have produced.
    EnabledWithWhitespace,
}

impl TriggerMode {
    pub fn is_enabled(self) -> bool {
        self != TriggerMode::Disabled
    }

    pub fn keeps_whitespace(self) -> bool {
        self == TriggerMode::EnabledWithWhitespace
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub snippets: String,
    pub snippet_divider: String,
    pub part_divider: String,
    pub trigger_on_space: TriggerMode,
    pub trigger_on_tab: TriggerMode,
    pub trigger_on_enter: TriggerMode,
    pub multiline_lhs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snippets: DEFAULT_SNIPPETS.to_string(),
            snippet_divider: DEFAULT_SNIPPET_DIVIDER.to_string(),
            part_divider: DEFAULT_PART_DIVIDER.to_string(),
            trigger_on_space: TriggerMode::Enabled,
            trigger_on_tab: TriggerMode::Enabled,
            trigger_on_enter: TriggerMode::Disabled,
            multiline_lhs: true,
        }
    }
}

impl Settings {
    pub fn source(&self) -> SnippetSource<'_> {
        SnippetSource::new(&self.snippets, &self.snippet_divider, &self.part_divider)
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            multiline_lhs: self.multiline_lhs,
        }
    }

    /// True if the compiled table would differ between `self` and `other`.
    pub fn affects_table(&self, other: &Settings) -> bool {
        self.snippets != other.snippets
            || self.snippet_divider != other.snippet_divider
            || self.part_divider != other.part_divider
    }

    /// Check that both dividers are usable.
    pub fn validate(&self) -> Result<()> {
        if self.snippet_divider.is_empty() {
            return Err(JellyError::InvalidConfig(
                "snippet divider must not be empty".to_string(),
            ));
        }
        if self.part_divider.is_empty() {
            return Err(JellyError::InvalidConfig(
                "part divider must not be empty".to_string(),
            ));
        }
        if self.snippet_divider == self.part_divider
            || self.source().effective_snippet_divider() == self.part_divider
        {
            return Err(JellyError::InvalidConfig(format!(
                "snippet divider and part divider are both {:?}",
                self.part_divider
            )));
        }
        Ok(())
    }
}

/// Get the jelly configuration directory
pub fn get_config_dir() -> PathBuf {
    env::var("HOME")
        .map(|home| PathBuf::from(home).join(CONFIG_DIRNAME))
        .unwrap_or_else(|_| PathBuf::from(CONFIG_DIRNAME))
}

/// Get the path to the settings file
pub fn get_settings_file_path() -> PathBuf {
    get_config_dir().join(SETTINGS_FILENAME)
}

/// Load settings from `path`. Missing fields fall back to their defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(JellyError::SettingsNotFound(
            path.to_string_lossy().to_string(),
        ));
    }

    let content = fs::read_to_string(path)?;

    // Handle empty settings file
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings = serde_json::from_str(&content)?;
    settings.validate()?;
    Ok(settings)
}

/// Save settings to `path`, creating parent directories as needed.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let serialized = serde_json::to_string_pretty(settings)?;
    fs::write(path, serialized)?;
    Ok(())
}
