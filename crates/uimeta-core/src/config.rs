//! Configuration for the extraction pipeline and the query layer.
//!
//! Configuration lives in a TOML file. Every section and key is optional; a
//! missing file means defaults everywhere.
//!
//! ## Lookup Order
//!
//! 1. An explicit path (`uimeta --config FILE` or `UIMETA_CONFIG`)
//! 2. The platform config directory (`directories::ProjectDirs`), `config.toml`
//! 3. Built-in defaults
//!
//! Relative paths inside the file are resolved against the directory that
//! contains the file, so a config checked into a repository works from any
//! working directory.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [paths]
//! docs_dir = "docs/components"
//! data_dir = ".uimeta"
//! manifest = "package.json"
//!
//! [parse]
//! component_prefix = "y"
//! doc_base_url = "https://example.dev/components"
//! api_heading = "API"
//! prose_markers = ["可以", "例如", "用于"]
//! ```

use crate::table::TableOptions;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where documents, the manifest and generated data live.
    pub paths: PathsConfig,
    /// How documents are interpreted.
    pub parse: ParseConfig,
}

/// File system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding one Markdown document per component.
    pub docs_dir: PathBuf,
    /// Directory for `corpus.json` and the supplementary `types/` and `examples/` trees.
    pub data_dir: PathBuf,
    /// Package manifest whose `version` field drives cache invalidation.
    pub manifest: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            data_dir: PathBuf::from(".uimeta"),
            manifest: PathBuf::from("package.json"),
        }
    }
}

/// Document interpretation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Prefix joined to the kebab-cased component name to form the tag.
    pub component_prefix: String,
    /// Base URL for `docUrl`; the document slug is appended.
    pub doc_base_url: Option<String>,
    /// Heading that opens the API block.
    pub api_heading: String,
    /// Words that mark a pipe-bearing line as prose rather than a table row.
    pub prose_markers: Vec<String>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            component_prefix: "y".to_string(),
            doc_base_url: None,
            api_heading: "API".to_string(),
            prose_markers: TableOptions::default().prose_markers,
        }
    }
}

impl ParseConfig {
    /// Table parser options derived from this configuration.
    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            prose_markers: self.prose_markers.clone(),
        }
    }
}

impl Config {
    /// Load from the platform config directory, or defaults if no file exists.
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from an explicit file. Relative paths resolve against its directory.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config {}: {e}", path.display())))?;
        let mut config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config {}: {e}", path.display())))?;

        if let Some(base) = path.parent() {
            config.paths = config.paths.resolved_against(base);
        }
        Ok(config)
    }

    /// Write this configuration as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config: {e}")))?;
        Ok(())
    }

    /// Location of the per-user config file.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("dev", "uimeta", "uimeta")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

impl PathsConfig {
    fn resolved_against(self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        Self {
            docs_dir: resolve(self.docs_dir),
            data_dir: resolve(self.data_dir),
            manifest: resolve(self.manifest),
        }
    }
}
