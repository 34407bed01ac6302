use crate::{Corpus, Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the persisted corpus inside the data directory.
pub const CORPUS_FILE: &str = "corpus.json";

/// Extensions tried, in order, for type-definition files.
pub const TYPE_EXTENSIONS: &[&str] = &[".d.ts", ".ts", ".txt"];

/// Extensions tried, in order, for example files.
pub const EXAMPLE_EXTENSIONS: &[&str] = &[".md", ".vue", ".txt"];

/// On-disk layout of generated and supplementary data
///
/// ```text
/// <root>/corpus.json
/// <root>/types/<tag>.d.ts
/// <root>/examples/<tag>.md
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    root_dir: PathBuf,
}

impl Storage {
    /// Creates a storage rooted at `root_dir`, creating the directory if needed
    pub fn with_root(root_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root_dir)
            .map_err(|e| Error::Storage(format!("Failed to create data directory: {e}")))?;
        Ok(Self { root_dir })
    }

    /// Returns the root data directory path
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Path of the persisted corpus
    #[must_use]
    pub fn corpus_path(&self) -> PathBuf {
        self.root_dir.join(CORPUS_FILE)
    }

    /// Directory of type-definition files
    #[must_use]
    pub fn types_dir(&self) -> PathBuf {
        self.root_dir.join("types")
    }

    /// Directory of example files
    #[must_use]
    pub fn examples_dir(&self) -> PathBuf {
        self.root_dir.join("examples")
    }

    /// Writes the corpus atomically (temp file, then rename)
    pub fn save_corpus(&self, corpus: &Corpus) -> Result<()> {
        let path = self.corpus_path();
        let json = serde_json::to_string_pretty(corpus)
            .map_err(|e| Error::Storage(format!("Failed to serialize corpus: {e}")))?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .map_err(|e| Error::Storage(format!("Failed to write corpus: {e}")))?;

        #[cfg(target_os = "windows")]
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| Error::Storage(format!("Failed to remove existing corpus: {e}")))?;
        }
        fs::rename(&tmp_path, &path)
            .map_err(|e| Error::Storage(format!("Failed to commit corpus: {e}")))?;

        debug!(
            path = %path.display(),
            components = corpus.components.len(),
            "saved corpus"
        );
        Ok(())
    }

    /// Loads the persisted corpus
    pub fn load_corpus(&self) -> Result<Corpus> {
        let path = self.corpus_path();
        if !path.exists() {
            return Err(Error::Storage(format!(
                "{} missing in {}; run `uimeta build` first",
                CORPUS_FILE,
                self.root_dir.display()
            )));
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| Error::Storage(format!("Failed to read corpus: {e}")))?;
        serde_json::from_str(&json)
            .map_err(|e| Error::Storage(format!("Failed to parse corpus: {e}")))
    }

    /// True when a corpus has been persisted
    #[must_use]
    pub fn has_corpus(&self) -> bool {
        self.corpus_path().exists()
    }

    /// Type-definition text for `tag`, trying each of [`TYPE_EXTENSIONS`]
    pub fn type_definition(&self, tag: &str) -> Result<Option<String>> {
        Self::read_first(&self.types_dir(), tag, TYPE_EXTENSIONS)
    }

    /// Example text for `tag`, trying each of [`EXAMPLE_EXTENSIONS`]
    pub fn examples(&self, tag: &str) -> Result<Option<String>> {
        Self::read_first(&self.examples_dir(), tag, EXAMPLE_EXTENSIONS)
    }

    fn read_first(dir: &Path, tag: &str, extensions: &[&str]) -> Result<Option<String>> {
        let stem = Self::sanitize_tag(tag)?;
        for ext in extensions {
            let path = dir.join(format!("{stem}{ext}"));
            if path.is_file() {
                debug!(path = %path.display(), "found supplementary file");
                return fs::read_to_string(&path).map(Some).map_err(|e| {
                    Error::Storage(format!("Failed to read {}: {e}", path.display()))
                });
            }
        }
        Ok(None)
    }

    /// Map a tag onto a safe file stem.
    ///
    /// Only ASCII alphanumerics, `.`, `_` and `-` survive; everything else
    /// becomes `_`, and `..` sequences are collapsed.
    fn sanitize_tag(tag: &str) -> Result<String> {
        let mut sanitized: String = tag
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        while sanitized.contains("..") {
            sanitized = sanitized.replace("..", "_");
        }

        if sanitized.is_empty() {
            return Err(Error::Storage("Tag cannot be empty".into()));
        }
        Ok(sanitized)
    }
}
