//! Build lifecycle plugins.
//!
//! # Hook Order
//!
//! ```text
//! before_build ──► virtual_pages / before_render (per page) ──► after_build
//! ```
//!
//! Every hook runs once per build, for every plugin in registration order,
//! except `before_render` which runs once per rendered page.

use crate::{
    blog::{
        BlogSettings, IdStore, JsonFileStore, PageDescriptor, PageEnrichment, PageRequest,
        PostCollection, PostIdCounter, PostRepository, assign_ids,
    },
    config::SiteConfig,
    generator::write_feeds,
    log,
    search::SearchIndex,
};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// What every hook gets to see.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub config: &'a SiteConfig,
}

impl<'a> BuildContext<'a> {
    pub const fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    pub fn content_dir(&self) -> PathBuf {
        self.config.content_dir()
    }

    pub fn output_dir(&self) -> PathBuf {
        self.config.output_dir()
    }
}

/// A participant in the build.
pub trait Plugin {
    /// Plugin name, used in log messages.
    fn name(&self) -> &str;

    fn before_build(&mut self, _ctx: &BuildContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Listing pages this plugin wants rendered.
    fn virtual_pages(&self) -> Vec<PageDescriptor> {
        Vec::new()
    }

    /// Data for one page; `None` when the plugin has nothing for it.
    fn before_render(&self, _request: &PageRequest) -> Option<PageEnrichment> {
        None
    }

    fn after_build(&mut self, _ctx: &BuildContext<'_>) -> Result<()> {
        Ok(())
    }
}

/// Plugins enabled by `config`, in hook order.
pub fn plugins(config: &SiteConfig) -> Vec<Box<dyn Plugin>> {
    let mut plugins: Vec<Box<dyn Plugin>> = Vec::new();
    if config.blog.enable {
        plugins.push(Box::new(BlogPlugin::from_config(config)));
    }
    if config.search.enable {
        plugins.push(Box::new(SearchPlugin::default()));
    }
    plugins
}

// ============================================================================
// Blog
// ============================================================================

/// Discovers posts and assigns IDs before the build; writes feeds and the
/// ID store after it.
pub struct BlogPlugin {
    store: Box<dyn IdStore>,
    counter: PostIdCounter,
    posts: Option<PostCollection>,
}

impl BlogPlugin {
    pub fn new(store: Box<dyn IdStore>) -> Self {
        Self {
            store,
            counter: PostIdCounter::default(),
            posts: None,
        }
    }

    /// Blog plugin backed by the configured JSON ID store.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(Box::new(JsonFileStore::new(config.post_id_store())))
    }

    /// Posts of the current build, once `before_build` has run.
    pub fn posts(&self) -> Option<&PostCollection> {
        self.posts.as_ref()
    }
}

impl Plugin for BlogPlugin {
    fn name(&self) -> &str {
        "blog"
    }

    fn before_build(&mut self, ctx: &BuildContext<'_>) -> Result<()> {
        let config = ctx.config;
        let languages = config.base.available_languages();

        let mut posts = PostRepository::new(config)?.discover(&ctx.content_dir(), &languages);

        self.counter = PostIdCounter::load(self.store.as_ref()).context("Failed to load post IDs")?;
        assign_ids(&mut posts, &mut self.counter);

        let collection = PostCollection::new(posts, &languages, BlogSettings::from_config(config));
        for language in collection.languages() {
            let archives = collection.archives(language);
            log!(debug "blog";
                "{language}: {} listed, {} categories, {} tags, {} authors",
                collection.listed(language).len(),
                archives.categories.len(),
                archives.tags.len(),
                archives.authors.len()
            );
        }

        self.posts = Some(collection);
        Ok(())
    }

    fn virtual_pages(&self) -> Vec<PageDescriptor> {
        self.posts
            .as_ref()
            .map(PostCollection::virtual_pages)
            .unwrap_or_default()
    }

    fn before_render(&self, request: &PageRequest) -> Option<PageEnrichment> {
        self.posts.as_ref()?.enrich(request)
    }

    fn after_build(&mut self, ctx: &BuildContext<'_>) -> Result<()> {
        let Some(posts) = &self.posts else {
            return Ok(());
        };

        write_feeds(ctx.config, posts, &ctx.output_dir())?;
        self.counter
            .persist(self.store.as_ref())
            .context("Failed to save post IDs")?;
        log!(debug "blog"; "next post ID is {}", self.counter.next_id());
        Ok(())
    }
}

// ============================================================================
// Search
// ============================================================================

/// Builds and writes the search index after the build.
#[derive(Default)]
pub struct SearchPlugin {
    index: Option<SearchIndex>,
}

impl SearchPlugin {
    pub fn index(&self) -> Option<&SearchIndex> {
        self.index.as_ref()
    }
}

impl Plugin for SearchPlugin {
    fn name(&self) -> &str {
        "search"
    }

    fn after_build(&mut self, ctx: &BuildContext<'_>) -> Result<()> {
        let mut index = SearchIndex::new(ctx.config)?;
        index.generate(&ctx.content_dir());
        index.save(&ctx.output_dir())?;
        self.index = Some(index);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
