//! Manage configuration use case

use crate::error::Result;
use crate::infrastructure::{SiteConfig, SiteRepository};

/// Service for reading and writing site configuration.
pub struct ConfigService<R: SiteRepository> {
    repository: R,
}

impl<R: SiteRepository> ConfigService<R> {
    pub fn new(repository: R) -> Self {
        ConfigService { repository }
    }

    pub fn list(&self) -> Result<SiteConfig> {
        self.repository.load_config()
    }

    pub fn get(&self, key: &str) -> Result<String> {
        self.repository.load_config()?.get(key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;
        config.set(key, value)?;
        self.repository.save_config(&config)
    }
}
