//! List command implementation

use anyhow::Result;
use colored::Colorize;
use uimeta_core::{ComponentSummary, Config};

use super::open_service;
use crate::output::{OutputFormat, print_json};

/// Execute the list command
pub fn execute(config: &Config, format: OutputFormat) -> Result<()> {
    let service = open_service(config)?;
    let list = service.list();

    match format {
        OutputFormat::Json => print_json(&*list)?,
        OutputFormat::Text => {
            if list.components.is_empty() {
                println!("No components. Run 'uimeta build' first.");
            }
            print_summaries(&list.components);
        },
    }
    Ok(())
}

/// One line per component: tag, then description when present.
pub(crate) fn print_summaries(components: &[ComponentSummary]) {
    let width = components
        .iter()
        .map(|c| c.tag_name.len())
        .max()
        .unwrap_or(0);

    for component in components {
        let description = component.description.as_deref().unwrap_or("");
        let tag = format!("{:<width$}", component.tag_name);
        println!("{}  {}", tag.green(), description.bright_black());
    }
}
