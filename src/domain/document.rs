//! Document model: slugs, frontmatter, and documents

use crate::error::{DocweaveError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort key substituted for documents without an explicit `order`,
/// so they sort after everything that was ordered deliberately.
pub const DEFAULT_ORDER: i64 = 999;

/// Logical document identifier: a non-empty sequence of URL-safe path
/// segments, independent of the on-disk extension or directory layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(Vec<String>);

impl Slug {
    /// Build a slug from path segments. Empty segment lists and empty
    /// segments are rejected.
    pub fn new(segments: Vec<String>) -> Result<Self> {
        if segments.is_empty() {
            return Err(DocweaveError::InvalidSlug("(empty)".to_string()));
        }
        for segment in &segments {
            if !Self::is_valid_segment(segment) {
                return Err(DocweaveError::InvalidSlug(segments.join("/")));
            }
        }
        Ok(Slug(segments))
    }

    /// Parse a slash-separated slug string, e.g. "guides/getting-started".
    pub fn parse(s: &str) -> Result<Self> {
        Self::new(s.split('/').map(String::from).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    fn is_valid_segment(segment: &str) -> bool {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && segment != "."
            && segment != ".."
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

fn untitled() -> String {
    "Untitled".to_string()
}

/// Metadata parsed from the leading YAML block of a content file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    #[serde(default = "untitled")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
}

impl Frontmatter {
    /// Frontmatter for a file with no metadata block.
    pub fn untitled() -> Self {
        Frontmatter {
            title: untitled(),
            description: None,
            category: None,
            order: None,
        }
    }

    /// Effective sort key: explicit `order`, or [`DEFAULT_ORDER`].
    pub fn sort_order(&self) -> i64 {
        self.order.unwrap_or(DEFAULT_ORDER)
    }
}

/// A document read from disk: slug plus parsed frontmatter and raw body.
/// Constructed fresh on every read; immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub slug: Slug,
    pub frontmatter: Frontmatter,
    pub body: String,
}

impl Document {
    pub fn new(slug: Slug, frontmatter: Frontmatter, body: String) -> Self {
        Document {
            slug,
            frontmatter,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_parse() {
        let slug = Slug::parse("guides/getting-started").unwrap();
        assert_eq!(slug.segments(), ["guides", "getting-started"]);
        assert_eq!(slug.to_string(), "guides/getting-started");
    }

    #[test]
    fn test_slug_single_segment() {
        let slug = Slug::parse("overview").unwrap();
        assert_eq!(slug.segments(), ["overview"]);
    }

    #[test]
    fn test_slug_rejects_empty() {
        assert!(Slug::new(vec![]).is_err());
        assert!(Slug::parse("").is_err());
        assert!(Slug::parse("a//b").is_err());
    }

    #[test]
    fn test_slug_rejects_traversal() {
        assert!(Slug::parse("../etc").is_err());
        assert!(Slug::parse("a/..").is_err());
        assert!(Slug::parse("a/b c").is_err());
    }

    #[test]
    fn test_sort_order_default() {
        let fm = Frontmatter::untitled();
        assert_eq!(fm.sort_order(), DEFAULT_ORDER);

        let fm = Frontmatter {
            order: Some(2),
            ..Frontmatter::untitled()
        };
        assert_eq!(fm.sort_order(), 2);
    }
}
