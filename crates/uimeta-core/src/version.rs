//! Where the "current library version" comes from.
//!
//! The query cache compares this value on every lookup, so implementations
//! should be cheap and must never fail: a probe that cannot read its source
//! reports [`DEFAULT_VERSION`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

/// Version reported when the manifest cannot be read.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// External oracle for the current library version.
pub trait VersionSource: Send + Sync {
    /// The version right now.
    fn current_version(&self) -> String;
}

impl<T: VersionSource + ?Sized> VersionSource for Arc<T> {
    fn current_version(&self) -> String {
        (**self).current_version()
    }
}

impl<T: VersionSource + ?Sized> VersionSource for &T {
    fn current_version(&self) -> String {
        (**self).current_version()
    }
}

/// Reads the `version` field of a `package.json` on every call.
#[derive(Debug, Clone)]
pub struct ManifestVersion {
    path: PathBuf,
}

#[derive(Deserialize)]
struct Manifest {
    version: Option<String>,
}

impl ManifestVersion {
    /// Probe the manifest at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Manifest location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> crate::Result<String> {
        let content = fs::read_to_string(&self.path)?;
        let manifest: Manifest = serde_json::from_str(&content)?;
        manifest
            .version
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| crate::Error::Parse("manifest has no version field".to_string()))
    }
}

impl VersionSource for ManifestVersion {
    fn current_version(&self) -> String {
        match self.read() {
            Ok(version) => version,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "version probe failed, using {DEFAULT_VERSION}"
                );
                DEFAULT_VERSION.to_string()
            },
        }
    }
}

/// A fixed version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticVersion(pub String);

impl StaticVersion {
    /// Always report `version`.
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }
}

impl VersionSource for StaticVersion {
    fn current_version(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_manifest_version_reads_field() {
        // Given: A package.json with a version
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        fs::write(&path, r#"{"name": "ui", "version": "2.3.1"}"#).unwrap();

        // When: Probing
        let source = ManifestVersion::new(&path);

        // Then: The field is returned
        assert_eq!(source.current_version(), "2.3.1");
    }

    #[test]
    fn test_manifest_version_rereads_each_call() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");
        fs::write(&path, r#"{"version": "1.0.0"}"#).unwrap();
        let source = ManifestVersion::new(&path);
        assert_eq!(source.current_version(), "1.0.0");

        fs::write(&path, r#"{"version": "1.1.0"}"#).unwrap();

        assert_eq!(source.current_version(), "1.1.0");
    }

    #[test]
    fn test_probe_failures_fall_back_to_default() {
        let temp = TempDir::new().unwrap();

        let missing = ManifestVersion::new(temp.path().join("missing.json"));
        assert_eq!(missing.current_version(), DEFAULT_VERSION);

        let invalid_path = temp.path().join("invalid.json");
        fs::write(&invalid_path, "not json").unwrap();
        assert_eq!(ManifestVersion::new(&invalid_path).current_version(), DEFAULT_VERSION);

        let no_field = temp.path().join("nofield.json");
        fs::write(&no_field, r#"{"name": "ui"}"#).unwrap();
        assert_eq!(ManifestVersion::new(&no_field).current_version(), DEFAULT_VERSION);
    }

    #[test]
    fn test_static_and_shared_sources() {
        let source = Arc::new(StaticVersion::new("9.9.9"));
        let dyn_source: Arc<dyn VersionSource> = source.clone();

        assert_eq!(source.current_version(), "9.9.9");
        assert_eq!(dyn_source.current_version(), "9.9.9");
        assert_eq!((&*source).current_version(), "9.9.9");
    }
}
