pub mod cli;
pub mod commands;

use clap::Parser;
use cli::Snipdex;
use commands::handle_command;
use snipdex_core::{logging, Config};
use std::process;

/// Run the snipdex CLI application
pub fn run_main() {
    let args = Snipdex::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = logging::init(&config) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    if let Err(e) = handle_command(args.commands, &config) {
        tracing::error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
