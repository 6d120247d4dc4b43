//! Error types for docweave

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the docweave pipeline
#[derive(Debug, Error)]
pub enum DocweaveError {
    #[error("Not a docweave site (no docweave.toml found): {0}")]
    NotDocweaveSite(PathBuf),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    #[error("Malformed frontmatter in {path}: {source}")]
    Frontmatter {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("Unclosed tag '{0}'")]
    UnclosedTag(String),

    #[error("Closing tag '{found}' does not match open tag '{expected}'")]
    MismatchedTag { expected: String, found: String },

    #[error("Closing tag '{0}' has no matching open tag")]
    UnexpectedClose(String),

    #[error("Malformed tag marker: {0}")]
    MalformedTag(String),

    #[error("Tag '{tag}' is missing required attribute '{attribute}'")]
    MissingAttribute { tag: String, attribute: String },

    #[error("Tag '{tag}' attribute '{attribute}': {reason}")]
    InvalidAttribute {
        tag: String,
        attribute: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DocweaveError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DocweaveError::NotDocweaveSite(_) => 2,
            DocweaveError::DocumentNotFound(_) => 3,
            DocweaveError::InvalidSlug(_) => 3,
            DocweaveError::Frontmatter { .. } => 4,
            DocweaveError::UnclosedTag(_)
            | DocweaveError::MismatchedTag { .. }
            | DocweaveError::UnexpectedClose(_)
            | DocweaveError::MalformedTag(_)
            | DocweaveError::MissingAttribute { .. }
            | DocweaveError::InvalidAttribute { .. } => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            DocweaveError::NotDocweaveSite(path) => {
                format!(
                    "Not a docweave site: {}\n\n\
                    Suggestions:\n\
                    • Run 'docweave init' in this directory to scaffold a site\n\
                    • Navigate to a directory containing docweave.toml\n\
                    • Set DOCWEAVE_ROOT environment variable to your site path",
                    path.display()
                )
            }
            DocweaveError::DocumentNotFound(slug) => {
                format!(
                    "Document not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'docweave slugs' to see available documents\n\
                    • A slug maps to <slug>.md, <slug>.mdoc, <slug>/index.md,\n\
                    \x20\x20or <slug>/index.mdoc under the content directory",
                    slug
                )
            }
            DocweaveError::MissingAttribute { tag, attribute } => {
                format!(
                    "Tag '{{% {} %}}' is missing required attribute '{}'\n\n\
                    Example: {{% {} {}=\"...\" %}}",
                    tag, attribute, tag, attribute
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using DocweaveError
pub type Result<T> = std::result::Result<T, DocweaveError>;
