//! docweave - Documentation content pipeline
//!
//! Reads markdown/mdoc documentation files from a content directory, splits
//! YAML frontmatter from body text, transforms Markdoc-style custom tags into
//! a renderable node tree, and emits that tree as JSON for a front-end to
//! render.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::DocweaveError;
