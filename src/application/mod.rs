//! Application layer - Use cases and orchestration

pub mod check;
pub mod init;
pub mod list_docs;
pub mod manage_config;
pub mod render_doc;

pub use check::{check_site, CheckReport};
pub use list_docs::{list_docs, list_slugs};
pub use manage_config::ConfigService;
pub use render_doc::{render_doc, RenderedDoc};
