//! Command implementations for the uimeta CLI
//!
//! Each command lives in its own submodule. Query commands share
//! [`open_service`], which loads the persisted corpus and wires it to the
//! manifest version probe.

mod build;
mod examples;
mod get;
mod list;
mod search;
mod web_types;

use std::sync::Arc;

use anyhow::{Context, Result};
use uimeta_core::{Config, ManifestVersion, QueryService, Storage};

use crate::cli::Cli;

pub use build::execute as build_corpus;
pub use examples::execute as show_examples;
pub use get::execute as get_component;
pub use list::execute as list_components;
pub use search::execute as search_components;
pub use web_types::execute as write_web_types;

/// Configuration from `--config` / `UIMETA_CONFIG`, else the platform default.
pub fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load().context("Failed to load config"),
    }
}

/// Query service over the persisted corpus.
pub fn open_service(config: &Config) -> Result<QueryService<ManifestVersion>> {
    let storage = Storage::with_root(config.paths.data_dir.clone())?;
    let corpus = storage.load_corpus()?;
    tracing::debug!(
        components = corpus.components.len(),
        version = %corpus.version,
        "loaded corpus"
    );
    Ok(QueryService::new(
        Arc::new(corpus),
        storage,
        ManifestVersion::new(&config.paths.manifest),
    ))
}
