//! Batch extraction over a documentation directory.
//!
//! A build is all-or-nothing at the directory level and forgiving at the
//! document level: a document that cannot be read or parsed is logged and
//! replaced by an empty model named after its file, so one broken page never
//! hides the rest of the library.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::assembler::{assemble_component, tag_name_for};
use crate::config::ParseConfig;
use crate::storage::Storage;
use crate::types::{ComponentModel, Corpus};
use crate::version::VersionSource;
use crate::{Error, Result};

/// Outcome counters of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Documents visited.
    pub documents: usize,
    /// Documents that fell back to an empty model.
    pub failures: usize,
    /// Models replaced because a later document produced the same tag.
    pub duplicates: usize,
}

/// Walks a docs directory and assembles every `*.md` document.
pub struct CorpusBuilder<S> {
    docs_dir: PathBuf,
    options: ParseConfig,
    version: S,
}

impl<S: VersionSource> CorpusBuilder<S> {
    /// Builder over `docs_dir` with the given parse options and version source.
    pub fn new(docs_dir: impl Into<PathBuf>, options: ParseConfig, version: S) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            options,
            version,
        }
    }

    /// Assemble the whole corpus.
    ///
    /// Errors only when the docs directory itself cannot be walked.
    #[tracing::instrument(skip(self), fields(docs_dir = %self.docs_dir.display()))]
    pub fn build(&self) -> Result<(Corpus, BuildReport)> {
        let start = Instant::now();
        let paths = collect_documents(&self.docs_dir)?;
        let mut report = BuildReport::default();
        let mut components: Vec<ComponentModel> = Vec::with_capacity(paths.len());

        for path in &paths {
            report.documents += 1;
            let slug = slug_of(path);

            let model = match read_and_assemble(path, &slug, &self.options) {
                Ok(model) => model,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "document skipped, using empty model");
                    report.failures += 1;
                    ComponentModel::empty(tag_name_for(&slug, &self.options.component_prefix))
                },
            };

            if let Some(existing) = components.iter_mut().find(|c| c.tag_name == model.tag_name) {
                warn!(tag = %model.tag_name, path = %path.display(), "duplicate tag, replacing earlier model");
                report.duplicates += 1;
                *existing = model;
            } else {
                components.push(model);
            }
        }

        let corpus = Corpus {
            version: self.version.current_version(),
            generated_at: Utc::now(),
            components,
        };

        info!(
            documents = report.documents,
            components = corpus.components.len(),
            failures = report.failures,
            version = %corpus.version,
            elapsed_ms = start.elapsed().as_millis(),
            "corpus built"
        );
        Ok((corpus, report))
    }

    /// Build and write `corpus.json` through `storage`.
    pub fn build_and_persist(&self, storage: &Storage) -> Result<(Corpus, BuildReport)> {
        let (corpus, report) = self.build()?;
        storage.save_corpus(&corpus)?;
        Ok((corpus, report))
    }
}

fn read_and_assemble(path: &Path, slug: &str, options: &ParseConfig) -> Result<ComponentModel> {
    let text = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "assembling document");
    assemble_component(slug, &text, options)
}

/// File stem of a document path.
fn slug_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Every `*.md` file below `root`, sorted by path.
fn collect_documents(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::Storage(format!(
            "docs directory {} does not exist",
            root.display()
        )));
    }

    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("md")) {
                found.push(path);
            }
        }
    }
    found.sort();
    Ok(found)
}
