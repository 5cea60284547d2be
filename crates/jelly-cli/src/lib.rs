pub mod cli;
pub mod commands;
pub mod utils;

use clap::Parser;
use cli::Jelly;
use commands::handle_command;
use std::process;
use utils::init_logging;

/// Run the jelly CLI application
pub fn run_main() {
    let args = Jelly::parse();
    init_logging(args.verbose);

    if let Err(e) = handle_command(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
