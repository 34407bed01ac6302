//! # CLI Structure and Argument Parsing
//!
//! `uimeta` follows a command-subcommand pattern built with clap derive:
//!
//! ```bash
//! # Extract every document into corpus.json
//! uimeta build
//!
//! # Query the persisted corpus
//! uimeta list
//! uimeta search button --limit 5
//! uimeta get y-button -f json
//! uimeta examples y-button
//!
//! # IDE metadata
//! uimeta web-types --output web-types.json
//! ```
//!
//! Query commands accept `-f/--format text|json`. Without the flag, output is
//! text on a terminal and JSON when piped.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Main CLI structure for the `uimeta` command
#[derive(Parser, Clone, Debug)]
#[command(name = "uimeta")]
#[command(version)]
#[command(about = "uimeta - component metadata from Markdown API docs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to configuration file (overrides the platform default). Also via `UIMETA_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "UIMETA_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Extract metadata from every document and write corpus.json
    Build {
        /// Output format for the build summary
        #[command(flatten)]
        format: FormatArg,
    },

    /// List all components
    List {
        /// Output format
        #[command(flatten)]
        format: FormatArg,
    },

    /// Search components by tag or description
    Search {
        /// Keyword (case-insensitive substring)
        keyword: String,
        /// Maximum number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Output format
        #[command(flatten)]
        format: FormatArg,
    },

    /// Show the full metadata of one component
    Get {
        /// Component tag, e.g. `y-button`
        tag: String,
        /// Output format
        #[command(flatten)]
        format: FormatArg,
    },

    /// Show usage examples of one component
    Examples {
        /// Component tag
        tag: String,
        /// Output format
        #[command(flatten)]
        format: FormatArg,
    },

    /// Generate JetBrains web-types metadata
    #[command(name = "web-types")]
    WebTypes {
        /// Write to FILE instead of stdout
        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Library name (defaults to the manifest `name`)
        #[arg(long)]
        name: Option<String>,
    },
}

impl Commands {
    /// Format flag of commands that print results.
    pub const fn format_arg(&self) -> Option<&FormatArg> {
        match self {
            Self::Build { format }
            | Self::List { format }
            | Self::Search { format, .. }
            | Self::Get { format, .. }
            | Self::Examples { format, .. } => Some(format),
            Self::WebTypes { .. } => None,
        }
    }
}

/// Shared clap argument for commands that accept an output format.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatArg {
    /// Output format (`--format` / `-f`)
    #[arg(short = 'f', long = "format", value_enum, env = "UIMETA_OUTPUT_FORMAT")]
    pub format: Option<OutputFormat>,
}

impl FormatArg {
    /// The explicit format, or text on a terminal and JSON when piped.
    #[must_use]
    pub fn resolve(&self) -> OutputFormat {
        use is_terminal::IsTerminal;

        if let Some(format) = self.format {
            return format;
        }
        if std::io::stdout().is_terminal() {
            OutputFormat::Text
        } else {
            OutputFormat::Json
        }
    }
}
