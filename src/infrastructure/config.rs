//! Site configuration

use crate::error::{DocweaveError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "docweave.toml";

fn default_title() -> String {
    "Documentation".to_string()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content/docs")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title, used by the renderer for page metadata.
    #[serde(default = "default_title")]
    pub title: String,
    /// Content root, relative to the site root.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            title: default_title(),
            content_dir: default_content_dir(),
        }
    }
}

impl SiteConfig {
    /// Load config from docweave.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DocweaveError::NotDocweaveSite(path.to_path_buf())
            } else {
                DocweaveError::Io(e)
            }
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Save config to docweave.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;

        fs::write(path.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    /// Get a config value by key
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "title" => Ok(self.title.clone()),
            "content_dir" => Ok(self.content_dir.display().to_string()),
            _ => Err(DocweaveError::Config(format!(
                "Unknown config key: {} (valid keys: title, content_dir)",
                key
            ))),
        }
    }

    /// Set a config value by key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "title" => {
                self.title = value.to_string();
                Ok(())
            }
            "content_dir" => {
                self.content_dir = PathBuf::from(value);
                Ok(())
            }
            _ => Err(DocweaveError::Config(format!(
                "Unknown config key: {} (valid keys: title, content_dir)",
                key
            ))),
        }
    }
}
