//! Render document use case

use crate::domain::tags::{RenderNode, TagRegistry, Transformer};
use crate::domain::{Frontmatter, Slug};
use crate::error::{DocweaveError, Result};
use crate::infrastructure::DocRepository;
use serde::Serialize;

/// What the renderer consumes for one page: frontmatter for the chrome,
/// the transformed tree for the body.
#[derive(Debug, Serialize)]
pub struct RenderedDoc {
    pub slug: Slug,
    pub frontmatter: Frontmatter,
    pub content: RenderNode,
}

/// Resolve a slug and transform its body into a renderable tree.
pub fn render_doc(
    repository: &DocRepository,
    registry: &TagRegistry,
    slug: &Slug,
) -> Result<RenderedDoc> {
    let document = repository
        .get_by_slug(slug)?
        .ok_or_else(|| DocweaveError::DocumentNotFound(slug.to_string()))?;

    let content = Transformer::new(registry).transform(&document.body)?;

    Ok(RenderedDoc {
        slug: document.slug,
        frontmatter: document.frontmatter,
        content,
    })
}
