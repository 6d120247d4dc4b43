//! Site check use case
//!
//! Walks every slug individually so one broken document cannot hide the
//! rest, unlike `list_all_docs` which aborts on the first error.

use crate::domain::tags::{TagRegistry, Transformer};
use crate::error::Result;
use crate::infrastructure::DocRepository;

/// Outcome of checking a whole site.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub checked: usize,
    /// (slug, error message) per broken document.
    pub problems: Vec<(String, String)>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Validate frontmatter and tag transform for every document under the
/// content root.
pub fn check_site(repository: &DocRepository, registry: &TagRegistry) -> Result<CheckReport> {
    let transformer = Transformer::new(registry);
    let mut report = CheckReport::default();

    for slug in repository.list_slugs()? {
        report.checked += 1;
        match repository.get_by_slug(&slug) {
            Ok(Some(document)) => {
                if let Err(e) = transformer.transform(&document.body) {
                    report.problems.push((slug.to_string(), e.to_string()));
                }
            }
            // Deleted between walk and read; nothing to report.
            Ok(None) => {}
            Err(e) => report.problems.push((slug.to_string(), e.to_string())),
        }
    }

    Ok(report)
}
