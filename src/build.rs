//! Build orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── before_build ──► every plugin (blog: discover posts, assign IDs)
//!     │
//!     ├── virtual pages ──► before_render per page ──► pages.json
//!     │
//!     └── after_build ──► every plugin (feeds, post IDs, search index)
//! ```
//!
//! `scan_site` runs discovery only and writes nothing.

use crate::{
    blog::{BlogSettings, PageDescriptor, PageEnrichment, PageRequest, PostCollection, PostRepository},
    config::SiteConfig,
    log,
    plugin::{BuildContext, Plugin, plugins},
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::{fs, path::PathBuf};

/// Page manifest file name, relative to the output directory
const MANIFEST: &str = "pages.json";

/// One rendered-page entry in `pages.json`.
#[derive(Debug, Serialize)]
pub struct ManifestEntry {
    pub url: String,
    pub request: PageRequest,
    pub enrichment: Option<PageEnrichment>,
}

/// Outcome of a full build.
#[derive(Debug)]
pub struct BuildReport {
    pub pages: Vec<ManifestEntry>,
    pub manifest: PathBuf,
}

/// Run every enabled plugin through the build lifecycle.
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let ctx = BuildContext::new(config);
    let mut plugins = plugins(config);
    let output = ctx.output_dir();

    fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    for plugin in plugins.iter_mut() {
        log!(debug "build"; "before_build: {}", plugin.name());
        plugin
            .before_build(&ctx)
            .with_context(|| format!("{} plugin failed before build", plugin.name()))?;
    }

    let pages = render_pages(&plugins);
    let manifest = output.join(MANIFEST);
    let json = serde_json::to_string_pretty(&pages)?;
    fs::write(&manifest, json)
        .with_context(|| format!("Failed to write page manifest to {}", manifest.display()))?;
    log!("build"; "{} virtual pages", pages.len());

    for plugin in plugins.iter_mut() {
        log!(debug "build"; "after_build: {}", plugin.name());
        plugin
            .after_build(&ctx)
            .with_context(|| format!("{} plugin failed after build", plugin.name()))?;
    }

    log!("build"; "done");
    Ok(BuildReport { pages, manifest })
}

/// Collect every plugin's virtual pages and ask the plugins to enrich them.
///
/// The first plugin returning data for a page wins.
fn render_pages(plugins: &[Box<dyn Plugin>]) -> Vec<ManifestEntry> {
    plugins
        .iter()
        .flat_map(|plugin| plugin.virtual_pages())
        .map(|PageDescriptor { url, request }| {
            let enrichment = plugins.iter().find_map(|p| p.before_render(&request));
            if enrichment.is_none() {
                log!(warn "build"; "no data for {url}");
            }
            ManifestEntry {
                url,
                request,
                enrichment,
            }
        })
        .collect()
}

/// Discover posts and log what a build would produce, without writing.
pub fn scan_site(config: &SiteConfig) -> Result<PostCollection> {
    let languages = config.base.available_languages();
    let posts = PostRepository::new(config)?.discover(&config.content_dir(), &languages);
    let collection = PostCollection::new(posts, &languages, BlogSettings::from_config(config));

    for post in collection.posts() {
        let state = if post.is_listed() { "listed" } else { "unlisted" };
        log!("scan"; "{} [{}] {} ({state})", post.path, post.language, collection.post_url(post));
    }
    for page in collection.virtual_pages() {
        log!(debug "scan"; "page {}", page.url);
    }

    log!(
        "scan";
        "{} posts, {} listed, {} virtual pages",
        collection.posts().len(),
        collection.all_listed().len(),
        collection.virtual_pages().len()
    );
    Ok(collection)
}

// ============================================================================
// Tests
// ============================================================================
