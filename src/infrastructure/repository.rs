//! Document repository
//!
//! The filesystem is the system of record: a content root recursively holds
//! `.md`/`.mdoc` files, and a slug resolves to one of four candidate layouts
//! in a fixed precedence order. Reads are uncached; every lookup re-reads the
//! file, so the repository never drifts from disk.

use crate::domain::{split_frontmatter, Document, Slug};
use crate::error::{DocweaveError, Result};
use crate::infrastructure::config::SiteConfig;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recognized content file extensions, in precedence order.
pub const CONTENT_EXTENSIONS: [&str; 2] = ["md", "mdoc"];

/// One on-disk layout a slug may resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugCandidate {
    /// `<slug>.<ext>`
    Flat(&'static str),
    /// `<slug>/index.<ext>`
    Index(&'static str),
}

/// Candidate layouts in resolution order; the first existing file wins.
/// A flat file always shadows a directory-index file for the same slug.
pub const SLUG_CANDIDATES: [SlugCandidate; 4] = [
    SlugCandidate::Flat("md"),
    SlugCandidate::Flat("mdoc"),
    SlugCandidate::Index("md"),
    SlugCandidate::Index("mdoc"),
];

impl SlugCandidate {
    /// The path this candidate maps the slug to, under the content root.
    /// The extension is appended, never substituted, so a slug segment
    /// containing a dot stays intact.
    pub fn path_for(&self, content_root: &Path, slug: &Slug) -> PathBuf {
        let mut path = content_root.to_path_buf();
        let (last, parents) = slug
            .segments()
            .split_last()
            .expect("slugs are non-empty by construction");
        for segment in parents {
            path.push(segment);
        }
        match self {
            SlugCandidate::Flat(ext) => path.push(format!("{}.{}", last, ext)),
            SlugCandidate::Index(ext) => {
                path.push(last);
                path.push(format!("index.{}", ext));
            }
        }
        path
    }
}

/// Abstract repository for site-level operations
pub trait SiteRepository {
    /// Get the site root directory
    fn root(&self) -> &Path;

    /// Load configuration from docweave.toml
    fn load_config(&self) -> Result<SiteConfig>;

    /// Save configuration to docweave.toml
    fn save_config(&self, config: &SiteConfig) -> Result<()>;

    /// Check if docweave.toml exists
    fn is_initialized(&self) -> bool;
}

/// File system repository over a docweave site
#[derive(Debug, Clone)]
pub struct DocRepository {
    root: PathBuf,
    content_root: PathBuf,
}

impl DocRepository {
    /// Open a repository at the given site root, resolving the content root
    /// from its configuration.
    pub fn open(root: PathBuf) -> Result<Self> {
        let config = SiteConfig::load_from_dir(&root)?;
        let content_root = root.join(&config.content_dir);
        Ok(DocRepository { root, content_root })
    }

    /// Repository over an explicit content root, bypassing configuration.
    /// Used by tests and the `--content-dir` flag.
    pub fn with_content_root(content_root: PathBuf) -> Self {
        DocRepository {
            root: content_root.clone(),
            content_root,
        }
    }

    /// Discover the site root by walking up from the current directory.
    /// A DOCWEAVE_ROOT environment variable takes precedence.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("DOCWEAVE_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_site_file(&path) {
                return Self::open(path);
            } else {
                return Err(DocweaveError::Config(format!(
                    "DOCWEAVE_ROOT is set to '{}' but no docweave.toml found there. \
                    Run 'docweave init' in that directory or unset DOCWEAVE_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the site root by walking up from a specific directory.
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_site_file(&current) {
                return Self::open(current);
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Err(DocweaveError::NotDocweaveSite(start.to_path_buf()));
                }
            }
        }
    }

    fn has_site_file(path: &Path) -> bool {
        path.join(crate::infrastructure::config::CONFIG_FILE).is_file()
    }

    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    fn is_content_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext))
    }

    /// Enumerate every document slug under the content root, in directory
    /// walk order. `index.<ext>` files contribute their directory's path;
    /// other files contribute directory path plus extension-stripped stem.
    /// A missing content root yields an empty list, not an error.
    pub fn list_slugs(&self) -> Result<Vec<Slug>> {
        if !self.content_root.exists() {
            return Ok(Vec::new());
        }

        let mut slugs = Vec::new();

        let walker = WalkDir::new(&self.content_root)
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .is_none_or(|name| !name.starts_with('.'))
            });

        for entry in walker {
            let entry = entry.map_err(|e| match e.into_io_error() {
                Some(io) => DocweaveError::Io(io),
                None => DocweaveError::Io(std::io::Error::other("walk error")),
            })?;
            if !entry.file_type().is_file() || !Self::is_content_file(entry.path()) {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&self.content_root) else {
                continue;
            };

            let mut segments: Vec<String> = rel
                .iter()
                .filter_map(|part| part.to_str())
                .map(String::from)
                .collect();
            let Some(filename) = segments.pop() else {
                continue;
            };
            let stem = filename
                .rsplit_once('.')
                .map_or(filename.as_str(), |(stem, _)| stem);
            if stem != "index" {
                segments.push(stem.to_string());
            }

            // A root-level index file has no addressable slug (slugs are
            // non-empty) and is skipped.
            if let Ok(slug) = Slug::new(segments) {
                slugs.push(slug);
            }
        }

        Ok(slugs)
    }

    /// Resolve a slug to a document by trying [`SLUG_CANDIDATES`] in order.
    /// Re-reads disk on every call; returns `Ok(None)` when no candidate
    /// file exists.
    pub fn get_by_slug(&self, slug: &Slug) -> Result<Option<Document>> {
        for candidate in SLUG_CANDIDATES {
            let path = candidate.path_for(&self.content_root, slug);
            if !path.is_file() {
                continue;
            }

            let raw = fs::read_to_string(&path)?;
            let (frontmatter, body) =
                split_frontmatter(&raw).map_err(|source| DocweaveError::Frontmatter {
                    path: path.display().to_string(),
                    source,
                })?;
            return Ok(Some(Document::new(
                slug.clone(),
                frontmatter,
                body.to_string(),
            )));
        }

        Ok(None)
    }

    /// Resolve every slug to a document and sort by frontmatter order for
    /// navigation. The sort is stable: ties keep enumeration order, and
    /// documents without an explicit order sort last. A document with
    /// malformed frontmatter aborts the listing; use `check` to report all
    /// broken documents.
    pub fn list_all_docs(&self) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        for slug in self.list_slugs()? {
            // A file deleted mid-walk resolves to None and is dropped.
            if let Some(doc) = self.get_by_slug(&slug)? {
                docs.push(doc);
            }
        }

        sort_for_navigation(&mut docs);
        Ok(docs)
    }
}

/// Navigation order: ascending frontmatter order, stable so ties keep their
/// enumeration order and defaulted entries stay in sequence at the end.
pub fn sort_for_navigation(docs: &mut [Document]) {
    docs.sort_by_key(|doc| doc.frontmatter.sort_order());
}

impl SiteRepository for DocRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<SiteConfig> {
        SiteConfig::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &SiteConfig) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_site_file(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn repo(temp: &TempDir) -> DocRepository {
        DocRepository::with_content_root(temp.path().join("docs"))
    }

    #[test]
    fn test_candidate_paths() {
        let slug = Slug::parse("guides/setup").unwrap();
        let root = Path::new("/site/docs");
        let paths: Vec<PathBuf> = SLUG_CANDIDATES
            .iter()
            .map(|c| c.path_for(root, &slug))
            .collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("/site/docs/guides/setup.md"),
                PathBuf::from("/site/docs/guides/setup.mdoc"),
                PathBuf::from("/site/docs/guides/setup/index.md"),
                PathBuf::from("/site/docs/guides/setup/index.mdoc"),
            ]
        );
    }

    #[test]
    fn test_list_slugs_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let slugs = repo(&temp).list_slugs().unwrap();
        assert!(slugs.is_empty());
    }

    #[test]
    fn test_list_slugs_flat_and_index() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs/overview.md", "x");
        write(temp.path(), "docs/guides/setup.mdoc", "x");
        write(temp.path(), "docs/guides/webhooks/index.md", "x");
        write(temp.path(), "docs/notes.txt", "ignored");

        let mut slugs: Vec<String> = repo(&temp)
            .list_slugs()
            .unwrap()
            .iter()
            .map(Slug::to_string)
            .collect();
        slugs.sort();
        assert_eq!(slugs, ["guides/setup", "guides/webhooks", "overview"]);
    }

    #[test]
    fn test_list_slugs_skips_hidden_dirs() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs/overview.md", "x");
        write(temp.path(), "docs/.drafts/secret.md", "x");

        let slugs = repo(&temp).list_slugs().unwrap();
        assert_eq!(slugs.len(), 1);
        assert_eq!(slugs[0].to_string(), "overview");
    }

    #[test]
    fn test_get_by_slug_flat_beats_index() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs/a.md", "---\ntitle: Flat\n---\nflat body");
        write(
            temp.path(),
            "docs/a/index.md",
            "---\ntitle: Index\n---\nindex body",
        );

        let doc = repo(&temp)
            .get_by_slug(&Slug::parse("a").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(doc.frontmatter.title, "Flat");
        assert_eq!(doc.body, "flat body");
    }

    #[test]
    fn test_get_by_slug_md_beats_mdoc() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs/a.mdoc", "---\ntitle: Mdoc\n---\n");
        write(temp.path(), "docs/a.md", "---\ntitle: Md\n---\n");

        let doc = repo(&temp)
            .get_by_slug(&Slug::parse("a").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(doc.frontmatter.title, "Md");
    }

    #[test]
    fn test_get_by_slug_absent() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs/a.md", "x");
        let doc = repo(&temp)
            .get_by_slug(&Slug::parse("missing").unwrap())
            .unwrap();
        assert!(doc.is_none());
    }

    #[test]
    fn test_get_by_slug_rereads_disk() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs/a.md", "---\ntitle: One\n---\nfirst");
        let repository = repo(&temp);
        let slug = Slug::parse("a").unwrap();

        let doc = repository.get_by_slug(&slug).unwrap().unwrap();
        assert_eq!(doc.frontmatter.title, "One");

        write(temp.path(), "docs/a.md", "---\ntitle: Two\n---\nsecond");
        let doc = repository.get_by_slug(&slug).unwrap().unwrap();
        assert_eq!(doc.frontmatter.title, "Two");
        assert_eq!(doc.body, "second");
    }

    #[test]
    fn test_get_by_slug_malformed_frontmatter() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs/bad.md", "---\ntitle: [oops\n---\nbody");
        let err = repo(&temp)
            .get_by_slug(&Slug::parse("bad").unwrap())
            .unwrap_err();
        assert!(matches!(err, DocweaveError::Frontmatter { .. }));
    }

    #[test]
    fn test_list_all_docs_ordered_before_defaulted() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs/a.md", "---\ntitle: A\n---\n");
        write(temp.path(), "docs/b.md", "---\ntitle: B\norder: 1\n---\n");
        write(temp.path(), "docs/c.md", "---\ntitle: C\norder: 3\n---\n");
        write(temp.path(), "docs/d.md", "---\ntitle: D\n---\n");

        let docs = repo(&temp).list_all_docs().unwrap();
        let titles: Vec<&str> = docs.iter().map(|d| d.frontmatter.title.as_str()).collect();
        // Explicit orders first; defaulted (999) entries after them. Their
        // relative tie order depends on walk order and is covered by
        // test_sort_for_navigation_is_stable.
        assert_eq!(&titles[..2], ["B", "C"]);
        assert!(titles[2..].contains(&"A"));
        assert!(titles[2..].contains(&"D"));
    }

    #[test]
    fn test_sort_for_navigation_is_stable() {
        let fm = |title: &str, order: Option<i64>| crate::domain::Frontmatter {
            title: title.to_string(),
            order,
            ..crate::domain::Frontmatter::untitled()
        };
        let doc = |slug: &str, title: &str, order: Option<i64>| {
            Document::new(Slug::parse(slug).unwrap(), fm(title, order), String::new())
        };

        // Enumerated orders [None, 1, 3, None] must sort to [1, 3, None#0,
        // None#1]: defaulted entries last, keeping their relative order.
        let mut docs = vec![
            doc("w", "first-undefined", None),
            doc("x", "one", Some(1)),
            doc("y", "three", Some(3)),
            doc("z", "second-undefined", None),
        ];
        sort_for_navigation(&mut docs);
        let titles: Vec<&str> = docs.iter().map(|d| d.frontmatter.title.as_str()).collect();
        assert_eq!(
            titles,
            ["one", "three", "first-undefined", "second-undefined"]
        );
    }

    #[test]
    fn test_list_all_docs_propagates_malformed() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "docs/good.md", "---\ntitle: Good\n---\n");
        write(temp.path(), "docs/bad.md", "---\n[broken\n---\n");

        let err = repo(&temp).list_all_docs().unwrap_err();
        assert!(matches!(err, DocweaveError::Frontmatter { .. }));
    }

    #[test]
    fn test_discover_from_walks_up() {
        let temp = TempDir::new().unwrap();
        SiteConfig::default().save_to_dir(temp.path()).unwrap();
        let nested = temp.path().join("content/docs/guides");
        fs::create_dir_all(&nested).unwrap();

        let repository = DocRepository::discover_from(&nested).unwrap();
        assert_eq!(repository.root(), temp.path());
    }

    #[test]
    fn test_discover_from_no_site() {
        let temp = TempDir::new().unwrap();
        let err = DocRepository::discover_from(temp.path()).unwrap_err();
        assert!(matches!(err, DocweaveError::NotDocweaveSite(_)));
    }
}
