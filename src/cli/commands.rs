//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docweave")]
#[command(about = "Documentation content pipeline", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Use this content directory directly instead of discovering a site
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub content_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold a new documentation site
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Site title
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List all documents in navigation order
    List,

    /// List every document slug in walk order
    Slugs,

    /// Transform a document and emit its renderable tree as JSON
    Render {
        /// Document slug, e.g. guides/getting-started
        slug: String,

        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Validate frontmatter and tags for every document
    Check,

    /// View or modify site configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
