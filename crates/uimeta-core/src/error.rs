//! Error types and handling for uimeta-core operations.
//!
//! One error enum covers the whole pipeline: reading documents, assembling
//! component models, persisting the corpus and answering queries. Most
//! extraction failures never reach callers; they are recovered locally and
//! logged (see [`Error::MalformedSection`]). The variants that do surface are
//! categorized so callers can log and branch on them uniformly.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: reading documents, supplementary files, the manifest
//! - **Parse Errors**: front matter, missing titles, malformed tables
//! - **Not Found**: unknown component tags
//! - **Storage Errors**: corpus persistence and data directory layout
//! - **Configuration Errors**: invalid or unreadable config files
//! - **Serialization Errors**: JSON/TOML encoding and decoding
//!
//! ```rust
//! use uimeta_core::{Error, Result};
//!
//! fn lookup(tag: &str) -> Result<()> {
//!     Err(Error::NotFound(format!("component '{tag}'")))
//! }
//!
//! match lookup("y-missing") {
//!     Err(e) if e.is_recoverable() => println!("retrying: {e}"),
//!     Err(e) => println!("[{}] {e}", e.category()),
//!     Ok(()) => {},
//! }
//! ```

use thiserror::Error;

/// The main error type for uimeta-core operations.
///
/// All fallible public functions return `Result<T, Error>`. `Display` gives a
/// user-facing message; `Debug` keeps the full source chain.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading documentation files, supplementary type/example files and
    /// writing the persisted corpus. The underlying `std::io::Error` is kept.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing a document failed.
    ///
    /// ## Common Causes
    ///
    /// - Front matter without a `title`
    /// - Unterminated front matter block
    /// - Title that yields no component name
    #[error("Parse error: {0}")]
    Parse(String),

    /// A subsection or table could not be turned into rows.
    ///
    /// The assembler recovers from this locally with an empty list, so it is
    /// only ever observed in logs and in direct calls to the section readers.
    #[error("Malformed section '{section}': {reason}")]
    MalformedSection {
        /// Subsection name, e.g. `Attributes`.
        section: String,
        /// What went wrong.
        reason: String,
    },

    /// Requested component or resource does not exist.
    ///
    /// For unknown tags the message lists the tags that do exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage layout or persisted corpus problem.
    ///
    /// ## Common Causes
    ///
    /// - Data directory cannot be created
    /// - Corpus file missing (run `uimeta build` first)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might go away if the operation is retried.
    ///
    /// Only transient I/O conditions qualify; parse, lookup and configuration
    /// failures are permanent for a given input.
    ///
    /// ```rust
    /// use uimeta_core::Error;
    /// use std::io;
    ///
    /// assert!(Error::Io(io::Error::new(io::ErrorKind::Interrupted, "x")).is_recoverable());
    /// assert!(!Error::NotFound("y-button".into()).is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::Interrupted
                    | std::io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }

    /// Get the error category as a static string identifier.
    ///
    /// - `"io"`, `"parse"`, `"malformed_section"`, `"not_found"`, `"storage"`,
    ///   `"config"`, `"serialization"`, `"other"`
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Parse(_) => "parse",
            Self::MalformedSection { .. } => "malformed_section",
            Self::NotFound(_) => "not_found",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io;

    #[test]
    fn test_error_display_formatting() {
        // Given: Message-carrying variants
        let cases = vec![
            (Error::Parse("no title".to_string()), "Parse error"),
            (Error::NotFound("y-card".to_string()), "Not found"),
            (Error::Storage("disk full".to_string()), "Storage error"),
            (Error::Config("bad path".to_string()), "Configuration error"),
            (
                Error::Serialization("eof".to_string()),
                "Serialization error",
            ),
        ];

        for (error, prefix) in cases {
            // When: Rendering to a string
            let rendered = error.to_string();

            // Then: The prefix identifies the kind
            assert!(rendered.starts_with(prefix), "{rendered}");
        }
    }

    #[test]
    fn test_malformed_section_display() {
        let error = Error::MalformedSection {
            section: "Events".to_string(),
            reason: "no table rows".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Malformed section 'Events': no table rows"
        );
    }

    #[test]
    fn test_error_categories() {
        let categories = vec![
            (Error::Io(io::Error::other("test")), "io"),
            (Error::Parse("test".to_string()), "parse"),
            (
                Error::MalformedSection {
                    section: "Slots".to_string(),
                    reason: "test".to_string(),
                },
                "malformed_section",
            ),
            (Error::NotFound("test".to_string()), "not_found"),
            (Error::Storage("test".to_string()), "storage"),
            (Error::Config("test".to_string()), "config"),
            (Error::Serialization("test".to_string()), "serialization"),
            (Error::Other("test".to_string()), "other"),
        ];

        for (error, expected) in categories {
            assert_eq!(error.category(), expected);
        }
    }

    #[test]
    fn test_error_recoverability() {
        assert!(Error::Io(io::Error::new(io::ErrorKind::TimedOut, "slow")).is_recoverable());
        assert!(!Error::Io(io::Error::new(io::ErrorKind::NotFound, "gone")).is_recoverable());
        assert!(!Error::Parse("x".to_string()).is_recoverable());
        assert!(!Error::NotFound("x".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_from_serde_json() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted: Error = err.into();

        assert_eq!(converted.category(), "serialization");
    }

    proptest! {
        #[test]
        fn test_not_found_keeps_message(msg in r".{0,200}") {
            let error = Error::NotFound(msg.clone());
            prop_assert!(error.to_string().contains(&msg));
        }
    }
}
