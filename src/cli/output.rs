//! Output formatting utilities

use crate::application::CheckReport;
use crate::domain::{Document, Slug};

/// Format documents for display, one per line: order, slug, title.
pub fn format_doc_list(docs: &[Document]) -> String {
    if docs.is_empty() {
        return "No documents found".to_string();
    }

    let mut output = String::new();
    for doc in docs {
        let order = match doc.frontmatter.order {
            Some(n) => n.to_string(),
            None => "-".to_string(),
        };
        output.push_str(&format!(
            "{:>5}  {:<32}  {}\n",
            order,
            doc.slug.to_string(),
            doc.frontmatter.title
        ));
    }
    output
}

/// Format slugs for display, one per line.
pub fn format_slug_list(slugs: &[Slug]) -> String {
    if slugs.is_empty() {
        return "No documents found".to_string();
    }

    let mut output = String::new();
    for slug in slugs {
        output.push_str(&format!("{}\n", slug));
    }
    output
}

/// Format a check report: one line per problem, then a summary.
pub fn format_check_report(report: &CheckReport) -> String {
    let mut output = String::new();
    for (slug, message) in &report.problems {
        output.push_str(&format!("{}: {}\n", slug, message));
    }
    if report.is_clean() {
        output.push_str(&format!("{} document(s) checked, no problems\n", report.checked));
    } else {
        output.push_str(&format!(
            "{} document(s) checked, {} problem(s)\n",
            report.checked,
            report.problems.len()
        ));
    }
    output
}
