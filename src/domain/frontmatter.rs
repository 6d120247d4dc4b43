//! Frontmatter splitting
//!
//! A content file may open with a metadata block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: Webhooks
//! order: 3
//! ---
//! Body text...
//! ```
//!
//! The block is YAML. Splitting is a pure function over the file text; disk
//! access and path handling belong to the repository.

use crate::domain::document::Frontmatter;
use regex::Regex;
use std::sync::OnceLock;

/// Matches a leading frontmatter block: the opening `---` must be the file's
/// first line; the single newline after the closing `---` is consumed and the
/// rest of the file is captured as the body, byte-for-byte.
fn frontmatter_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?s)\A---\n(.*?)\n---\n(.*)\z").unwrap())
}

/// Split raw file text into parsed frontmatter and body.
///
/// Without a leading delimiter the whole input is the body and the
/// frontmatter is the `Untitled` fallback. A delimited block that is not
/// valid YAML for the recognized keys is an error; it is never coerced to
/// empty frontmatter.
pub fn split_frontmatter(raw: &str) -> Result<(Frontmatter, &str), serde_yaml::Error> {
    match frontmatter_regex().captures(raw) {
        Some(caps) => {
            let metadata = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());
            let frontmatter: Frontmatter = serde_yaml::from_str(metadata)?;
            Ok((frontmatter, body))
        }
        None => Ok((Frontmatter::untitled(), raw)),
    }
}
