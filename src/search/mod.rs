//! JSON search index.
//!
//! Scans the whole content tree (index pages included) with the shared
//! [`Scanner`], turns every non-draft document into a [`SearchEntry`] and
//! writes them as one JSON file. Blog posts are indexed under the URL the
//! blog publishes them at; every other page under its relative path.
//!
//! ```json
//! { "version": "2.0", "generated": "...", "totalPages": 2,
//!   "languages": ["en"], "pages": [ { "id": "...", ... } ] }
//! ```

mod extract;

use crate::{
    blog::PostRoutes,
    config::{ConfigError, SiteConfig},
    content::{
        Document, ScanPolicy, Scanner,
        frontmatter::{get_str, is_draft},
    },
    log,
    utils::{markdown, text::truncate_chars},
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Index format version
const INDEX_VERSION: &str = "2.0";

/// Title used when a document has none.
const UNTITLED: &str = "Untitled";

// ============================================================================
// Types
// ============================================================================

/// One indexed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub language: String,
    pub content: String,
    pub headings: Vec<String>,
    pub keywords: Vec<String>,
}

/// Serialized index file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexFile<'a> {
    version: &'static str,
    generated: DateTime<Utc>,
    total_pages: usize,
    languages: Vec<&'a str>,
    pages: &'a [SearchEntry],
}

// ============================================================================
// Index
// ============================================================================

pub struct SearchIndex {
    scanner: Scanner,
    extension: String,
    max_content_length: usize,
    max_headings: usize,
    output: PathBuf,
    routes: Option<PostRoutes>,
    pages: Vec<SearchEntry>,
}

impl SearchIndex {
    pub fn new(config: &SiteConfig) -> Result<Self, ConfigError> {
        let policy = ScanPolicy::search(config.max_file_size(), config.search.max_content_length);
        Ok(Self {
            scanner: Scanner::new(config, policy)?,
            extension: config.build.extension.trim_start_matches('.').to_owned(),
            max_content_length: config.search.max_content_length,
            max_headings: config.search.max_headings,
            output: config.search.output.clone(),
            routes: config.blog.enable.then(|| PostRoutes::from_config(config)),
            pages: Vec::new(),
        })
    }

    /// Index every page under `content_root`, replacing previous results.
    pub fn generate(&mut self, content_root: &Path) -> &[SearchEntry] {
        let pages = self
            .scanner
            .scan(content_root, content_root)
            .into_iter()
            .filter(|doc| {
                let draft = is_draft(&doc.frontmatter);
                if draft {
                    log!(debug "search"; "skipping draft {}", doc.path);
                }
                !draft
            })
            .map(|doc| self.entry(doc))
            .collect();
        self.pages = pages;

        log!("search"; "indexed {} pages", self.pages.len());
        &self.pages
    }

    pub fn pages(&self) -> &[SearchEntry] {
        &self.pages
    }

    /// Sorted distinct languages of the indexed pages.
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.pages.iter().map(|p| p.language.as_str()).collect();
        languages.sort_unstable();
        languages.dedup();
        languages
    }

    /// Write the index into `output_dir`, returning the file path.
    pub fn save(&self, output_dir: &Path) -> Result<PathBuf> {
        let path = output_dir.join(&self.output);
        let file = IndexFile {
            version: INDEX_VERSION,
            generated: Utc::now(),
            total_pages: self.pages.len(),
            languages: self.languages(),
            pages: &self.pages,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write search index to {}", path.display()))?;

        log!("search"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
        Ok(path)
    }

    fn entry(&self, doc: Document) -> SearchEntry {
        let html = markdown::to_html(&doc.body);
        let text = extract::strip_html(&html);
        let content = truncate_chars(&text, self.max_content_length).to_owned();
        let url = self
            .routes
            .as_ref()
            .and_then(|routes| routes.post_url(&doc))
            .unwrap_or_else(|| extract::entry_url(&doc, &self.extension));

        SearchEntry {
            id: extract::entry_id(&doc, &self.extension),
            title: get_str(&doc.frontmatter, "title").unwrap_or(UNTITLED).to_owned(),
            description: extract::description(&doc, &content),
            url,
            headings: extract::headings(&html, self.max_headings),
            keywords: extract::keywords(&doc),
            language: doc.language,
            content,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
