//! Infrastructure layer - Filesystem access and site configuration

pub mod config;
pub mod repository;

pub use config::SiteConfig;
pub use repository::{
    sort_for_navigation, DocRepository, SiteRepository, SlugCandidate, SLUG_CANDIDATES,
};
