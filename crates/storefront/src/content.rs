//! Content management for markdown-based static pages.
//!
//! This module loads markdown files from the `/content` directory at startup,
//! parses frontmatter metadata, and renders markdown to HTML. Pages cover the
//! informational corners of the shop (about, FAQ, shipping policy, legal).

use chrono::NaiveDate;
use comrak::{Options, markdown_to_html};
use gray_matter::{Matter, engine::YAML};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Metadata for static pages (terms, privacy, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
}

/// A rendered page with metadata and HTML content
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub slug: String,
    #[serde(flatten)]
    pub meta: PageMeta,
    pub content_html: String,
}

/// Content store that holds all loaded pages in memory
#[derive(Debug, Clone)]
pub struct ContentStore {
    pages: Arc<HashMap<String, Page>>,
}

impl ContentStore {
    /// Load all content from the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be read.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let pages = Self::load_pages(&content_dir.join("pages"))?;

        Ok(Self {
            pages: Arc::new(pages),
        })
    }

    /// Create an empty store. Used by tests that don't exercise pages.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            pages: Arc::new(HashMap::new()),
        }
    }

    /// Load all pages from the pages directory
    fn load_pages(dir: &Path) -> Result<HashMap<String, Page>, ContentError> {
        let mut pages = HashMap::new();

        if !dir.exists() {
            tracing::warn!("Pages directory does not exist: {:?}", dir);
            return Ok(pages);
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ContentError::Io(e.to_string()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "md") {
                match Self::load_page(&path) {
                    Ok(page) => {
                        tracing::info!("Loaded page: {}", page.slug);
                        pages.insert(page.slug.clone(), page);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load page {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(pages)
    }

    /// Load a single page from a markdown file
    fn load_page(path: &Path) -> Result<Page, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|e| ContentError::Io(e.to_string()))?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ContentError::Parse("Invalid filename".to_string()))?
            .to_string();

        let matter = Matter::<YAML>::new();
        let parsed = matter
            .parse_with_struct::<PageMeta>(&content)
            .ok_or_else(|| ContentError::Parse("Missing or invalid frontmatter".to_string()))?;

        let content_html = render_markdown(&parsed.content);

        Ok(Page {
            slug,
            meta: parsed.data,
            content_html,
        })
    }

    /// Get a page by slug
    #[must_use]
    pub fn get_page(&self, slug: &str) -> Option<&Page> {
        self.pages.get(slug)
    }

    /// Get all pages
    pub fn get_all_pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }
}

/// Render markdown to HTML with GitHub Flavored Markdown support.
fn render_markdown(content: &str) -> String {
    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.superscript = true;
    options.extension.header_ids = Some(String::new());
    options.extension.footnotes = true;

    markdown_to_html(content, &options)
}

/// Content loading errors
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_page(dir: &Path, name: &str, body: &str) {
        std::fs::create_dir_all(dir.join("pages")).unwrap();
        std::fs::write(dir.join("pages").join(name), body).unwrap();
    }

    fn temp_content_dir() -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("belle-content-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_page_with_frontmatter() {
        let dir = temp_content_dir();
        write_page(
            &dir,
            "livraison.md",
            "---\ntitle: Livraison\ndescription: Nos délais de livraison\n---\n\n# Livraison\n\nExpédition sous 48h.\n",
        );

        let store = ContentStore::load(&dir).unwrap();
        let page = store.get_page("livraison").unwrap();
        assert_eq!(page.meta.title, "Livraison");
        assert!(page.content_html.contains("<h1"));
        assert!(page.content_html.contains("Expédition sous 48h."));
    }

    #[test]
    fn test_page_without_frontmatter_is_skipped() {
        let dir = temp_content_dir();
        write_page(&dir, "broken.md", "No frontmatter here at all.\n");

        let store = ContentStore::load(&dir).unwrap();
        assert!(store.get_page("broken").is_none());
    }

    #[test]
    fn test_missing_directory_yields_empty_store() {
        let dir = temp_content_dir().join("does-not-exist");
        let store = ContentStore::load(&dir).unwrap();
        assert_eq!(store.get_all_pages().count(), 0);
    }

    #[test]
    fn test_render_markdown_gfm_table() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }
}
