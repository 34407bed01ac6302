//! Web-types command implementation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use uimeta_core::{Config, Storage, generate_web_types};

/// Fallback library name when neither `--name` nor the manifest gives one.
const DEFAULT_LIBRARY_NAME: &str = "components";

/// Execute the web-types command
pub fn execute(config: &Config, output: Option<&Path>, name: Option<&str>) -> Result<()> {
    let storage = Storage::with_root(config.paths.data_dir.clone())?;
    let corpus = storage.load_corpus()?;

    let library = name.map_or_else(|| manifest_name(&config.paths.manifest), ToString::to_string);
    let doc = generate_web_types(&corpus, &library);
    let json = serde_json::to_string_pretty(&doc)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), elements = corpus.components.len(), "wrote web-types");
        },
        None => println!("{json}"),
    }
    Ok(())
}

/// `name` field of the package manifest, if readable.
fn manifest_name(path: &Path) -> String {
    fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
        .and_then(|value| value.get("name").and_then(|n| n.as_str()).map(ToString::to_string))
        .unwrap_or_else(|| DEFAULT_LIBRARY_NAME.to_string())
}
