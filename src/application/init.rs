//! Initialize site use case

use crate::error::{DocweaveError, Result};
use crate::infrastructure::{DocRepository, SiteConfig, SiteRepository};
use std::fs;
use std::path::Path;

const SAMPLE_DOC: &str = "---\n\
title: Getting Started\n\
description: Your first documentation page\n\
order: 1\n\
---\n\
# Getting Started\n\
\n\
{% callout type=\"tip\" %}\n\
Edit this file, then run `docweave render getting-started`.\n\
{% /callout %}\n";

/// Initialize a new docweave site at the specified path.
pub fn init(path: &Path, title: Option<&str>) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    if path.join(crate::infrastructure::config::CONFIG_FILE).exists() {
        return Err(DocweaveError::Config(format!(
            "Directory already initialized: {}",
            path.display()
        )));
    }

    let mut config = SiteConfig::default();
    if let Some(title) = title {
        config.title = title.to_string();
    }

    let repo = DocRepository::with_content_root(path.to_path_buf());
    repo.save_config(&config)?;

    let content_root = path.join(&config.content_dir);
    fs::create_dir_all(&content_root)?;

    let sample = content_root.join("getting-started.md");
    if !sample.exists() {
        fs::write(&sample, SAMPLE_DOC)?;
    }

    println!("Initialized docweave site at {}", path.display());
    println!("Content root: {}", content_root.display());

    Ok(())
}
