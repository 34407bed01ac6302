//! Examples command implementation

use anyhow::Result;
use uimeta_core::Config;

use super::open_service;
use crate::output::{OutputFormat, print_json};

/// Execute the examples command
pub fn execute(config: &Config, tag: &str, format: OutputFormat) -> Result<()> {
    let service = open_service(config)?;
    let examples = service.get_examples(tag);

    match format {
        OutputFormat::Json => print_json(&*examples)?,
        OutputFormat::Text => println!("{}", examples.content),
    }
    Ok(())
}
