//! # uimeta-core
//!
//! Core functionality for uimeta - typed component metadata extracted from
//! Markdown API documentation.
//!
//! This crate reads one Markdown document per UI component, pulls the prop,
//! event, slot and exposed-method tables out of its `API` section, normalizes
//! the ad-hoc type annotations found there and assembles a [`Corpus`]. The
//! corpus is then served through [`QueryService`], which caches answers until
//! the library version changes.
//!
//! ## Architecture
//!
//! - **Parsing**: [`parse_table`], [`extract_section`] and [`parse_front_matter`]
//!   locate and split the raw text
//! - **Normalization**: [`normalize_type`] and [`coerce_default`] turn cells into
//!   typed values
//! - **Assembly**: [`assemble_component`] and [`CorpusBuilder`] produce models
//! - **Serving**: [`QueryService`] over a [`VersionedCache`], plus
//!   [`generate_web_types`] for IDEs
//!
//! ## Quick Start
//!
//! ```rust
//! use uimeta_core::{ParseConfig, assemble_component};
//!
//! let doc = "---\ntitle: Button\n---\n\n## API\n\n### Attributes\n\n\
//! | Name | Type | Default |\n|---|---|---|\n| size | ^[string] | 'default' |\n";
//!
//! let model = assemble_component("button", doc, &ParseConfig::default())?;
//! assert_eq!(model.tag_name, "y-button");
//! assert_eq!(model.props[0].default.as_deref(), Some("default"));
//! # Ok::<(), uimeta_core::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Parsing is forgiving: malformed tables become empty lists and broken
//! documents become empty models. Errors surface only for I/O, configuration
//! and lookups of unknown components:
//!
//! ```rust
//! use std::sync::Arc;
//! use uimeta_core::{Corpus, Error, QueryService, StaticVersion, Storage};
//!
//! # let dir = tempfile::tempdir()?;
//! let corpus = Arc::new(Corpus {
//!     version: "1.0.0".into(),
//!     generated_at: chrono::Utc::now(),
//!     components: vec![],
//! });
//! let service = QueryService::new(corpus, Storage::with_root(dir.path().into())?, StaticVersion::new("1.0.0"));
//! match service.get("y-missing") {
//!     Ok(detail) => println!("{}", detail.component.tag_name),
//!     Err(Error::NotFound(msg)) => eprintln!("{msg}"),
//!     Err(e) => eprintln!("Fatal error: {e}"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Component model assembly from one document
pub mod assembler;
/// Version-keyed result cache
pub mod cache;
/// Configuration loading
pub mod config;
/// Batch extraction over a docs directory
pub mod corpus;
/// Default-value coercion
pub mod defaults;
/// Error types and result aliases
pub mod error;
/// Type annotation normalization
pub mod normalize;
/// Query operations over a corpus
pub mod query;
/// Document section and front matter extraction
pub mod section;
/// On-disk data layout
pub mod storage;
/// Markdown table parsing
pub mod table;
/// Core data types
pub mod types;
/// Library version probes
pub mod version;
/// IDE metadata generation
pub mod web_types;

pub use assembler::{assemble_component, kebab_case, tag_name_for};
pub use cache::VersionedCache;
pub use config::{Config, ParseConfig, PathsConfig};
pub use corpus::{BuildReport, CorpusBuilder};
pub use defaults::{DefaultValue, NO_DEFAULT, coerce_default, coerce_default_strict, typed_default};
pub use error::{Error, Result};
pub use normalize::{TYPE_RULES, TypeRule, normalize_type, split_signature};
pub use query::{
    ComponentDetail, ComponentSummary, ExamplesOutput, ListOutput, QueryService, SearchOutput,
    SearchParams,
};
pub use section::{FrontMatter, extract_block, extract_section, intro_text, parse_front_matter};
pub use storage::Storage;
pub use table::{TableOptions, TableRow, parse_table};
pub use types::*;
pub use version::{DEFAULT_VERSION, ManifestVersion, StaticVersion, VersionSource};
pub use web_types::{WebTypes, generate_web_types};
