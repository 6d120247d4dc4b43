use clap::Parser;
use docweave::application::{self, ConfigService};
use docweave::cli::{format_check_report, format_doc_list, format_slug_list, Cli, Commands};
use docweave::domain::tags::TagRegistry;
use docweave::domain::Slug;
use docweave::error::DocweaveError;
use docweave::infrastructure::DocRepository;
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn open_repository(content_dir: Option<PathBuf>) -> Result<DocRepository, DocweaveError> {
    match content_dir {
        Some(dir) => Ok(DocRepository::with_content_root(dir)),
        None => DocRepository::discover(),
    }
}

fn run(cli: Cli) -> Result<i32, DocweaveError> {
    let content_dir = cli.content_dir;

    match cli.command {
        Commands::Init { path, title } => {
            application::init::init(&path, title.as_deref())?;
            Ok(0)
        }
        Commands::List => {
            let repo = open_repository(content_dir)?;
            let docs = application::list_docs(&repo)?;
            print!("{}", ensure_newline(format_doc_list(&docs)));
            Ok(0)
        }
        Commands::Slugs => {
            let repo = open_repository(content_dir)?;
            let slugs = application::list_slugs(&repo)?;
            print!("{}", ensure_newline(format_slug_list(&slugs)));
            Ok(0)
        }
        Commands::Render { slug, pretty } => {
            let repo = open_repository(content_dir)?;
            let registry = TagRegistry::standard();
            let slug = Slug::parse(&slug)?;
            let rendered = application::render_doc(&repo, &registry, &slug)?;
            let json = if pretty {
                serde_json::to_string_pretty(&rendered)?
            } else {
                serde_json::to_string(&rendered)?
            };
            println!("{}", json);
            Ok(0)
        }
        Commands::Check => {
            let repo = open_repository(content_dir)?;
            let registry = TagRegistry::standard();
            let report = application::check_site(&repo, &registry)?;
            print!("{}", format_check_report(&report));
            Ok(if report.is_clean() { 0 } else { 1 })
        }
        Commands::Config { key, value, list } => {
            let repo = open_repository(content_dir)?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("title = {}", config.title);
                println!("content_dir = {}", config.content_dir.display());
                Ok(0)
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                    Ok(0)
                } else {
                    let val = service.get(&k)?;
                    println!("{}", val);
                    Ok(0)
                }
            } else {
                println!("Usage: docweave config [--list | <key> [<value>]]");
                println!("Valid keys: title, content_dir");
                Ok(0)
            }
        }
    }
}

fn ensure_newline(mut s: String) -> String {
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}
