//! Category, tag and author archives.
//!
//! Counting and filtering are separate passes: term counts are accumulated
//! per occurrence, then each archive recomputes its posts by matching slugs.
//! Only listed posts participate.

use super::{
    BlogSettings,
    pagination::{PageTarget, VirtualPage, paginate},
    post::Post,
};
use crate::{log, utils::slug::slugify};
use serde::Serialize;
use std::collections::HashMap;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveKind {
    Category,
    Tag,
    Author,
}

impl ArchiveKind {
    pub const ALL: [Self; 3] = [Self::Category, Self::Tag, Self::Author];

    /// URL segment
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Tag => "tag",
            Self::Author => "author",
        }
    }

    /// Display names a post carries for this taxonomy.
    fn names(self, post: &Post) -> Vec<&str> {
        match self {
            Self::Category => post.categories.iter().map(String::as_str).collect(),
            Self::Tag => post.tags.iter().map(String::as_str).collect(),
            Self::Author => post.author.as_deref().into_iter().collect(),
        }
    }

    /// Whether `post` belongs to the archive with this slug.
    fn matches(self, post: &Post, slug: &str) -> bool {
        match self {
            Self::Category => post.category_slugs().any(|s| s == slug),
            Self::Tag => post.tag_slugs().any(|s| s == slug),
            Self::Author => post.author_slug().is_some_and(|s| s == slug),
        }
    }
}

/// Slug, display name and number of occurrences of one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub slug: String,
    pub name: String,
    pub count: usize,
}

/// One archive: a view over the posts carrying a term.
#[derive(Debug, Clone, Serialize)]
pub struct Archive<'a> {
    pub kind: ArchiveKind,
    pub slug: String,
    pub name: String,
    pub count: usize,
    #[serde(skip)]
    pub posts: Vec<&'a Post>,
}

#[derive(Debug, Clone, Default)]
pub struct ArchiveIndex<'a> {
    pub categories: Vec<TermCount>,
    pub tags: Vec<TermCount>,
    pub authors: Vec<TermCount>,
    pub archives: Vec<Archive<'a>>,
}

impl<'a> ArchiveIndex<'a> {
    pub fn find(&self, kind: ArchiveKind, slug: &str) -> Option<&Archive<'a>> {
        self.archives.iter().find(|a| a.kind == kind && a.slug == slug)
    }
}

/// Result of archive page generation.
#[derive(Debug, Clone, PartialEq)]
pub enum ArchivePages<'a> {
    /// More archives than `max_archive_pages`; nothing generated.
    Skipped { total: usize, limit: usize },
    Generated(Vec<VirtualPage<'a, &'a Post>>),
}

// ============================================================================
// Aggregation
// ============================================================================

pub struct ArchiveAggregator;

impl ArchiveAggregator {
    /// Group listed posts by category, tag and author.
    ///
    /// Terms keep the first spelling seen in post order and are sorted by
    /// count (descending) then slug. Archives are sorted by kind then slug.
    pub fn generate<'a>(posts: &[&'a Post]) -> ArchiveIndex<'a> {
        let listed: Vec<&'a Post> = posts.iter().copied().filter(|p| p.is_listed()).collect();

        let mut index = ArchiveIndex::default();
        for kind in ArchiveKind::ALL {
            let terms = count_terms(&listed, kind);

            index.archives.extend(terms.iter().map(|term| Archive {
                kind,
                slug: term.slug.clone(),
                name: term.name.clone(),
                count: term.count,
                posts: listed
                    .iter()
                    .copied()
                    .filter(|p| kind.matches(p, &term.slug))
                    .collect(),
            }));

            let mut sorted = terms;
            sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.slug.cmp(&b.slug)));
            match kind {
                ArchiveKind::Category => index.categories = sorted,
                ArchiveKind::Tag => index.tags = sorted,
                ArchiveKind::Author => index.authors = sorted,
            }
        }

        index
            .archives
            .sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.slug.cmp(&b.slug)));
        index
    }
}

/// slug → {name, count}, one increment per occurrence.
fn count_terms(posts: &[&Post], kind: ArchiveKind) -> Vec<TermCount> {
    let mut terms: Vec<TermCount> = Vec::new();
    let mut by_slug: HashMap<String, usize> = HashMap::new();

    for name in posts.iter().flat_map(|p| kind.names(p)) {
        let slug = slugify(name);
        if slug.is_empty() {
            continue;
        }
        match by_slug.get(&slug) {
            Some(&i) => terms[i].count += 1,
            None => {
                by_slug.insert(slug.clone(), terms.len());
                terms.push(TermCount {
                    slug,
                    name: name.to_owned(),
                    count: 1,
                });
            }
        }
    }
    terms
}

/// Paginate every archive of one language.
///
/// `total` is the archive count across every language; when it is over
/// `max_archive_pages` nothing is generated.
pub fn archive_pages<'a>(
    index: &'a ArchiveIndex<'a>,
    language: &str,
    total: usize,
    settings: &BlogSettings,
) -> ArchivePages<'a> {
    if total > settings.max_archive_pages {
        log!(warn "blog";
            "{total} archives exceed max_archive_pages ({}), skipping {language} archive pages",
            settings.max_archive_pages
        );
        return ArchivePages::Skipped {
            total,
            limit: settings.max_archive_pages,
        };
    }

    let pages = index
        .archives
        .iter()
        .flat_map(|archive| {
            let target = PageTarget::Archive {
                language: language.to_owned(),
                kind: archive.kind,
                slug: archive.slug.clone(),
            };
            paginate(&archive.posts, settings.per_page, &target, &settings.urls)
        })
        .collect();
    ArchivePages::Generated(pages)
}

// ============================================================================
// Tests
// ============================================================================
