//! uimeta CLI - component metadata from Markdown API docs
//!
//! This is the main entry point for the uimeta command-line interface.
//! Each command is implemented in its own module under `commands`.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod logging;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::initialize_logging(&cli)?;

    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = commands::load_config(cli)?;

    match &cli.command {
        Commands::Build { format } => commands::build_corpus(&config, format.resolve()),
        Commands::List { format } => commands::list_components(&config, format.resolve()),
        Commands::Search {
            keyword,
            limit,
            format,
        } => commands::search_components(&config, keyword, *limit, format.resolve()),
        Commands::Get { tag, format } => commands::get_component(&config, tag, format.resolve()),
        Commands::Examples { tag, format } => {
            commands::show_examples(&config, tag, format.resolve())
        },
        Commands::WebTypes { output, name } => {
            commands::write_web_types(&config, output.as_deref(), name.as_deref())
        },
    }
}
