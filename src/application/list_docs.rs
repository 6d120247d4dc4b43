//! Navigation listing use cases

use crate::domain::{Document, Slug};
use crate::error::Result;
use crate::infrastructure::DocRepository;

/// All documents, sorted for navigation (ascending frontmatter order,
/// unordered documents last).
pub fn list_docs(repository: &DocRepository) -> Result<Vec<Document>> {
    repository.list_all_docs()
}

/// Every document slug in directory walk order, as used for static path
/// generation.
pub fn list_slugs(repository: &DocRepository) -> Result<Vec<Slug>> {
    repository.list_slugs()
}
