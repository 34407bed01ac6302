//! Get command implementation

use anyhow::Result;
use colored::Colorize;
use uimeta_core::{ComponentDetail, Config, TypeInfo};

use super::open_service;
use crate::output::{OutputFormat, print_json};

/// Execute the get command
pub fn execute(config: &Config, tag: &str, format: OutputFormat) -> Result<()> {
    let service = open_service(config)?;
    let detail = service.get(tag)?;

    match format {
        OutputFormat::Json => print_json(&*detail)?,
        OutputFormat::Text => print_text(&detail),
    }
    Ok(())
}

fn print_text(detail: &ComponentDetail) {
    let model = &detail.component;
    println!("{}", model.tag_name.green().bold());
    if let Some(description) = &model.description {
        println!("{description}");
    }
    if let Some(url) = &model.doc_url {
        println!("{}", url.bright_black());
    }

    section("Props", model.props.len());
    for prop in &model.props {
        let default = prop
            .default
            .as_deref()
            .map(|d| format!(" = {d}"))
            .unwrap_or_default();
        entry(&prop.name, &prop.type_info, &default, prop.description.as_deref());
    }

    section("Events", model.events.len());
    for event in &model.events {
        entry(&event.name, &event.type_info, "", event.description.as_deref());
    }

    section("Slots", model.slots.len());
    for slot in &model.slots {
        entry(&slot.name, &slot.type_info, "", slot.description.as_deref());
    }

    section("Methods", model.methods.len());
    for method in &model.methods {
        entry(&method.name, &method.type_info, "", method.description.as_deref());
    }

    if let Some(types) = &detail.type_definition {
        println!("\n{}", "Type definitions".bold());
        println!("{types}");
    }
}

fn section(title: &str, count: usize) {
    if count > 0 {
        println!("\n{} ({count})", title.bold());
    }
}

fn entry(name: &str, type_info: &TypeInfo, suffix: &str, description: Option<&str>) {
    let ty = type_info.display();
    let ty = if ty.is_empty() { String::new() } else { format!(": {ty}") };
    println!("  {}{}{suffix}", name.cyan(), ty.bright_black());
    if let Some(description) = description {
        println!("      {description}");
    }
}
