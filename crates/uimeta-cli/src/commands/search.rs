//! Search command implementation

use anyhow::Result;
use uimeta_core::Config;

use super::list::print_summaries;
use super::open_service;
use crate::output::{OutputFormat, print_json};

/// Execute the search command
pub fn execute(config: &Config, keyword: &str, limit: Option<usize>, format: OutputFormat) -> Result<()> {
    let service = open_service(config)?;
    let found = service.search(keyword, limit);

    match format {
        OutputFormat::Json => print_json(&*found)?,
        OutputFormat::Text => {
            if found.results.is_empty() {
                println!("No components match '{keyword}'");
                return Ok(());
            }
            print_summaries(&found.results);
            if found.total > found.results.len() {
                println!("({} of {} matches shown)", found.results.len(), found.total);
            }
        },
    }
    Ok(())
}
