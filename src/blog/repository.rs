//! Post discovery.
//!
//! Scans `{content}/{blog.path}/` (or one `{lang}/` subdirectory per language
//! on multilingual sites), validates each document into a [`Post`] and returns
//! them in listing order.
//!
//! The scan is based at the content directory, so exclusion globs match the
//! same paths the search index sees. Post paths are then rebased onto the
//! blog directory.

use super::post::{Post, PostLimits, sort_posts};
use crate::{
    config::{ConfigError, SiteConfig},
    content::{ScanPolicy, Scanner, classify::blog_relative},
    log,
};
use std::{collections::HashSet, path::Path};

pub struct PostRepository {
    scanner: Scanner,
    blog_path: String,
    limits: PostLimits,
}

impl PostRepository {
    pub fn new(config: &SiteConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            scanner: Scanner::new(config, ScanPolicy::blog())?,
            blog_path: config.blog.path.trim_matches('/').to_owned(),
            limits: PostLimits {
                extension: config.build.extension.trim_start_matches('.').to_owned(),
                max_categories: config.blog.max_categories_per_post,
                max_tags: config.blog.max_tags_per_post,
                excerpt_length: config.blog.excerpt_length,
            },
        })
    }

    /// Discover every valid post under `content_root`.
    ///
    /// Invalid documents are logged and left out. When two posts of the same
    /// language share a slug, the one earlier in listing order wins.
    pub fn discover(&self, content_root: &Path, languages: &[String]) -> Vec<Post> {
        let blog_root = content_root.join(&self.blog_path);

        let documents = if languages.len() > 1 {
            languages
                .iter()
                .flat_map(|lang| self.scanner.scan(&blog_root.join(lang), content_root))
                .collect()
        } else {
            self.scanner.scan(&blog_root, content_root)
        };

        let mut posts: Vec<Post> = documents
            .into_iter()
            .filter_map(|mut doc| {
                if let Some(rel) = blog_relative(&doc.path, &self.blog_path).map(str::to_owned) {
                    doc.path = rel;
                }
                let path = doc.path.clone();
                Post::from_document(doc, &self.limits)
                    .inspect_err(|err| log!(warn "blog"; "skipping {path}: {err}"))
                    .ok()
            })
            .collect();

        sort_posts(&mut posts);
        dedup_slugs(&mut posts);

        log!("blog"; "found {} posts", posts.len());
        posts
    }
}

/// Drop later posts whose `(language, slug)` is already taken.
fn dedup_slugs(posts: &mut Vec<Post>) {
    let mut seen = HashSet::new();
    posts.retain(|post| {
        let fresh = seen.insert((post.language.clone(), post.slug.clone()));
        if !fresh {
            log!(warn "blog"; "skipping {}: slug `{}` is already used", post.path, post.slug);
        }
        fresh
    });
}

// ============================================================================
// Tests
// ============================================================================
