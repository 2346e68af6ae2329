//! The posts discovered in one build.

use super::{
    BlogSettings,
    archive::{ArchiveAggregator, ArchiveIndex},
    post::Post,
};

/// Posts in listing order plus the settings needed to list them.
///
/// Read-only once built; archives are recomputed from the posts on demand.
#[derive(Debug, Clone)]
pub struct PostCollection {
    posts: Vec<Post>,
    languages: Vec<String>,
    settings: BlogSettings,
}

impl PostCollection {
    /// `posts` must already be in listing order. Languages used by posts but
    /// missing from `languages` are appended in sorted order.
    pub fn new(posts: Vec<Post>, languages: &[String], settings: BlogSettings) -> Self {
        let mut languages = languages.to_vec();
        let mut extra: Vec<String> = posts
            .iter()
            .map(|p| p.language.clone())
            .filter(|l| !languages.contains(l))
            .collect();
        extra.sort();
        extra.dedup();
        languages.extend(extra);

        Self {
            posts,
            languages,
            settings,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn settings(&self) -> &BlogSettings {
        &self.settings
    }

    /// Listed posts of one language, in listing order.
    pub fn listed(&self, language: &str) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.is_listed() && p.language == language)
            .collect()
    }

    /// Listed posts of every language, in listing order.
    pub fn all_listed(&self) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.is_listed()).collect()
    }

    /// Archives of one language.
    pub fn archives(&self, language: &str) -> ArchiveIndex<'_> {
        ArchiveAggregator::generate(&self.listed(language))
    }

    /// Archive count summed over every language.
    pub fn total_archives(&self) -> usize {
        self.languages
            .iter()
            .map(|l| self.archives(l).archives.len())
            .sum()
    }

    pub fn find_post(&self, path: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.path == path)
    }

    /// URL of a post page.
    pub fn post_url(&self, post: &Post) -> String {
        self.settings.urls.post_url(&post.language, &post.slug)
    }
}
