//! `[blog]`, `[search]` and `[feed]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[blog]` section - post discovery, archives and pagination.
///
/// # Example
/// ```toml
/// [blog]
/// path = "blog"
/// posts_per_page = 10
/// max_tags_per_post = 20
/// max_categories_per_post = 10
/// max_archive_pages = 500
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BlogConfig {
    /// Enable the blog subsystem.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Blog directory under the content root, also the URL base.
    #[serde(default = "defaults::blog::path")]
    #[educe(Default = defaults::blog::path())]
    pub path: String,

    #[serde(default = "defaults::blog::posts_per_page")]
    #[educe(Default = defaults::blog::posts_per_page())]
    pub posts_per_page: usize,

    /// Tags beyond this count are dropped (first N kept).
    #[serde(default = "defaults::blog::max_tags_per_post")]
    #[educe(Default = defaults::blog::max_tags_per_post())]
    pub max_tags_per_post: usize,

    /// Categories beyond this count are dropped (first N kept).
    #[serde(default = "defaults::blog::max_categories_per_post")]
    #[educe(Default = defaults::blog::max_categories_per_post())]
    pub max_categories_per_post: usize,

    /// Archive page generation is skipped above this many archives.
    #[serde(default = "defaults::blog::max_archive_pages")]
    #[educe(Default = defaults::blog::max_archive_pages())]
    pub max_archive_pages: usize,

    /// Length of excerpts derived from the post body.
    #[serde(default = "defaults::blog::excerpt_length")]
    #[educe(Default = defaults::blog::excerpt_length())]
    pub excerpt_length: usize,
}

/// `[search]` section - JSON search index.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Enable search index generation.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Indexed plain-text content is cut to this many characters.
    #[serde(default = "defaults::search::max_content_length")]
    #[educe(Default = defaults::search::max_content_length())]
    pub max_content_length: usize,

    /// Maximum headings kept per page.
    #[serde(default = "defaults::search::max_headings")]
    #[educe(Default = defaults::search::max_headings())]
    pub max_headings: usize,

    /// Index file name, relative to the output directory.
    #[serde(default = "defaults::search::output")]
    #[educe(Default = defaults::search::output())]
    pub output: PathBuf,
}

/// `[feed]` section - RSS 2.0 and Atom 1.0 feeds.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub rss: bool,

    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub atom: bool,

    /// Maximum items per feed.
    #[serde(default = "defaults::feed::limit")]
    #[educe(Default = defaults::feed::limit())]
    pub limit: usize,

    #[serde(default = "defaults::feed::rss_path")]
    #[educe(Default = defaults::feed::rss_path())]
    pub rss_path: PathBuf,

    #[serde(default = "defaults::feed::atom_path")]
    #[educe(Default = defaults::feed::atom_path())]
    pub atom_path: PathBuf,
}

impl FeedConfig {
    pub const fn any_enabled(&self) -> bool {
        self.rss || self.atom
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_blog_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();

        assert!(config.blog.enable);
        assert_eq!(config.blog.path, "blog");
        assert_eq!(config.blog.posts_per_page, 10);
        assert_eq!(config.blog.max_tags_per_post, 20);
        assert_eq!(config.blog.max_categories_per_post, 10);
        assert_eq!(config.blog.max_archive_pages, 500);
        assert_eq!(config.search.max_content_length, 5000);
        assert_eq!(config.search.max_headings, 10);
        assert!(config.feed.rss && config.feed.atom);
        assert_eq!(config.feed.limit, 20);
    }

    #[test]
    fn test_blog_custom() {
        let config = r#"
            [blog]
            posts_per_page = 2
            max_archive_pages = 3

            [search]
            enable = false

            [feed]
            atom = false
            limit = 5
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.blog.posts_per_page, 2);
        assert_eq!(config.blog.max_archive_pages, 3);
        assert!(!config.search.enable);
        assert!(config.feed.rss);
        assert!(!config.feed.atom);
        assert!(config.feed.any_enabled());
        assert_eq!(config.feed.limit, 5);
    }
}
