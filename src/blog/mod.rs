//! Blog subsystem.
//!
//! - **post**: post model, validation, listing order
//! - **repository**: post discovery on top of the content scanner
//! - **post_id**: persistent post ID counter
//! - **archive**: category / tag / author aggregation
//! - **pagination**: page math, URLs and page links
//! - **collection**: the discovered posts of one build
//! - **enrich**: typed per-page data for the template layer
//!
//! # Flow
//!
//! ```text
//! PostRepository::discover ──► assign_ids ──► PostCollection
//!                                                  │
//!                      ┌───────────────────────────┼──────────────────────┐
//!                      ▼                           ▼                      ▼
//!              ArchiveAggregator            paginate / plan          feeds
//!                      │                           │
//!                      └──────────► PageEnrichment ◄┘
//! ```

pub mod archive;
pub mod collection;
pub mod enrich;
pub mod pagination;
pub mod post;
pub mod post_id;
pub mod repository;

pub use archive::{Archive, ArchiveAggregator, ArchiveIndex, ArchiveKind, ArchivePages};
pub use collection::PostCollection;
pub use enrich::{PageDescriptor, PageEnrichment, PageRequest};
pub use pagination::{PageTarget, PaginationPlan, UrlScheme};
pub use post::{Post, PostKind, PostStatus, resolve_slug};
pub use post_id::{IdStore, JsonFileStore, MemoryStore, PostIdCounter, assign_ids};
pub use repository::PostRepository;

use crate::{
    config::SiteConfig,
    content::{Document, classify},
};

/// Listing settings resolved from `[blog]` and `[base]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogSettings {
    pub per_page: usize,
    pub max_archive_pages: usize,
    pub urls: UrlScheme,
}

impl BlogSettings {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            per_page: config.blog.posts_per_page,
            max_archive_pages: config.blog.max_archive_pages,
            urls: UrlScheme::new(&config.blog.path, &config.base.language),
        }
    }
}

/// Post page URLs for documents scanned outside the blog.
///
/// The search index scans the whole content tree; this maps a
/// content-relative document onto the page the blog publishes for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRoutes {
    blog_path: String,
    extension: String,
    languages: Vec<String>,
    urls: UrlScheme,
}

impl PostRoutes {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            blog_path: config.blog.path.trim_matches('/').to_owned(),
            extension: config.build.extension.trim_start_matches('.').to_owned(),
            languages: config.base.available_languages(),
            urls: UrlScheme::new(&config.blog.path, &config.base.language),
        }
    }

    /// URL of the post page for `doc`; `None` when the blog does not list it
    /// as a post.
    pub fn post_url(&self, doc: &Document) -> Option<String> {
        classify::post_path(&doc.path, &self.blog_path, &self.extension, &self.languages)?;
        let slug = resolve_slug(&doc.frontmatter, &doc.slug);
        Some(self.urls.post_url(&doc.language, &slug))
    }
}
