//! RSS 2.0 and Atom 1.0 feeds.
//!
//! Both formats are built from the same [`Feed`]: listed posts, newest
//! first, at most `[feed].limit` items. Multilingual sites get one feed pair
//! per language under `{lang}/`.

pub mod atom;
pub mod rss;

pub use atom::build_atom;
pub use rss::build_rss;

use crate::{
    blog::{PostCollection, pagination::page_url},
    config::SiteConfig,
    log,
};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Types
// ============================================================================

/// Format-independent feed contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub language: String,
    /// Absolute URL of the blog index.
    pub link: String,
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    /// Absolute post URL, also used as the item id.
    pub link: String,
    pub summary: String,
    pub date: NaiveDateTime,
    pub author: Option<String>,
    pub categories: Vec<String>,
}

impl Feed {
    /// Feed for one language of the collection.
    pub fn for_language(config: &SiteConfig, posts: &PostCollection, language: &str) -> Self {
        let base_url = config.base.base_url();
        let urls = &posts.settings().urls;

        let items = posts
            .listed(language)
            .into_iter()
            .filter_map(|post| {
                Some(FeedItem {
                    title: post.title.clone(),
                    link: format!("{base_url}{}", posts.post_url(post)),
                    summary: post.excerpt.clone(),
                    date: post.date?,
                    author: post.author.clone(),
                    categories: post.categories.clone(),
                })
            })
            .take(config.feed.limit)
            .collect();

        Self {
            language: language.to_owned(),
            link: format!("{base_url}{}", page_url(&urls.index_base(language), 1)),
            items,
        }
    }

    /// Most recent item date.
    pub fn updated(&self) -> Option<NaiveDateTime> {
        self.items.iter().map(|item| item.date).max()
    }
}

// ============================================================================
// Writing
// ============================================================================

/// Write every enabled feed into `output_dir`, returning the written paths.
pub fn write_feeds(config: &SiteConfig, posts: &PostCollection, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    if !config.feed.any_enabled() {
        return Ok(written);
    }
    if config.base.url.is_none() {
        log!(warn "feed"; "[base.url] is not set, skipping feeds");
        return Ok(written);
    }

    let multilingual = config.base.is_multilingual();
    for language in posts.languages() {
        if !multilingual && *language != config.base.language {
            continue;
        }

        let feed = Feed::for_language(config, posts, language);
        let dir = if multilingual {
            output_dir.join(language)
        } else {
            output_dir.to_path_buf()
        };

        if config.feed.rss {
            let path = dir.join(&config.feed.rss_path);
            write_file(&path, &build_rss(config, &feed)?)?;
            written.push(path);
        }
        if config.feed.atom {
            let path = dir.join(&config.feed.atom_path);
            write_file(&path, &build_atom(config, &feed))?;
            written.push(path);
        }
    }

    Ok(written)
}

fn write_file(path: &Path, xml: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, xml).with_context(|| format!("Failed to write feed to {}", path.display()))?;

    log!("feed"; "{}", path.display());
    Ok(())
}

/// Escape special XML characters.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ============================================================================
// Tests
// ============================================================================
