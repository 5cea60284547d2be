use clap::{Parser, Subcommand, ValueEnum};
use jelly_core::Key;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author = "bahdotsh",
    version = env!("CARGO_PKG_VERSION"),
    about = "jelly - a text snippet expander",
    long_about = "jelly expands abbreviations into snippets when they end at the cursor."
)]
pub struct Jelly {
    #[clap(long, short = 'f', global = true, help = "Path to the settings file")]
    pub config: Option<PathBuf>,

    #[clap(long, short, global = true, help = "Print debug logs")]
    pub verbose: bool,

    #[clap(subcommand)]
    pub commands: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default settings file
    Init {
        #[clap(long, help = "Overwrite an existing settings file")]
        force: bool,
    },
    /// Show the settings file path and contents
    Config,
    /// List the compiled snippets
    List,
    /// Report snippet records that could not be parsed
    Check,
    /// Expand the snippet ending at the cursor of a file
    Expand {
        #[clap(long, help = "File to expand in")]
        file: PathBuf,

        #[clap(long, short, help = "Cursor offset in characters (default: end of file)")]
        cursor: Option<usize>,

        #[clap(long, short, value_enum, help = "Simulate a key press instead of the trigger command")]
        key: Option<KeyArg>,

        #[clap(long, help = "Hold shift while pressing the key")]
        shift: bool,

        #[clap(long, short = 'i', help = "Write the result back to the file")]
        in_place: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KeyArg {
    Space,
    Tab,
    Enter,
}

impl From<KeyArg> for Key {
    fn from(key: KeyArg) -> Self {
        match key {
            KeyArg::Space => Key::Space,
            KeyArg::Tab => Key::Tab,
            KeyArg::Enter => Key::Enter,
        }
    }
}
