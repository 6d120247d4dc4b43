//! Domain layer - Content models and transforms

pub mod document;
pub mod frontmatter;
pub mod tags;

pub use document::{Document, Frontmatter, Slug, DEFAULT_ORDER};
pub use frontmatter::split_frontmatter;
