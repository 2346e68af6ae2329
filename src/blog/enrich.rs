//! Per-page data for the template layer.
//!
//! For every page the renderer asks about, the blog returns an immutable
//! [`PageEnrichment`]. The renderer owns merging it into its own context.
//!
//! | Request     | Posts           | Pagination | Archive heading | Prev / next |
//! |-------------|-----------------|------------|-----------------|-------------|
//! | `BlogIndex` | page slice      | yes        | -               | -           |
//! | `Archive`   | page slice      | yes        | yes             | -           |
//! | `Post`      | the post itself | -          | -               | yes         |
//! | `Other`     | -               | -          | -               | -           |

use super::{
    archive::{ArchiveIndex, ArchiveKind, ArchivePages, TermCount, archive_pages},
    collection::PostCollection,
    pagination::{PageTarget, PaginationPlan, page_url, paginate, plan},
    post::Post,
};
use chrono::NaiveDateTime;
use serde::Serialize;

// ============================================================================
// Types
// ============================================================================

/// A page the renderer is about to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageRequest {
    BlogIndex {
        language: String,
        page: usize,
    },
    Archive {
        language: String,
        kind: ArchiveKind,
        slug: String,
        page: usize,
    },
    Post {
        path: String,
    },
    Other,
}

impl PageRequest {
    /// Request for page `page` of a paginated target.
    pub fn for_target(target: &PageTarget, page: usize) -> Self {
        match target {
            PageTarget::BlogIndex { language } => Self::BlogIndex {
                language: language.clone(),
                page,
            },
            PageTarget::Archive {
                language,
                kind,
                slug,
            } => Self::Archive {
                language: language.clone(),
                kind: *kind,
                slug: slug.clone(),
                page,
            },
        }
    }
}

/// Link to a taxonomy term's archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermLink {
    pub name: String,
    pub slug: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    #[serde(rename = "postId")]
    pub id: Option<u64>,
    pub title: String,
    pub url: String,
    pub date: Option<NaiveDateTime>,
    pub language: String,
    pub excerpt: String,
    pub author: Option<TermLink>,
    pub featured_image: Option<String>,
    pub categories: Vec<TermLink>,
    pub tags: Vec<TermLink>,
    pub reading_time: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostLink {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveHeading {
    pub kind: ArchiveKind,
    pub slug: String,
    pub name: String,
    pub count: usize,
    pub url: String,
}

/// Everything the blog contributes to one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnrichment {
    pub language: String,
    pub posts: Vec<PostSummary>,
    pub pagination: Option<PaginationPlan>,
    pub archive: Option<ArchiveHeading>,
    pub categories: Vec<TermCount>,
    pub tags: Vec<TermCount>,
    pub authors: Vec<TermCount>,
    pub post: Option<PostSummary>,
    /// Older neighbour
    pub prev_post: Option<PostLink>,
    /// Newer neighbour
    pub next_post: Option<PostLink>,
}

/// A generated listing page: where it lives and how to ask about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDescriptor {
    pub url: String,
    pub request: PageRequest,
}

// ============================================================================
// Enrichment
// ============================================================================

impl PostCollection {
    /// Enrichment for `request`, or `None` when the blog has nothing for it
    /// (unknown post or archive, page out of range, skipped archives).
    pub fn enrich(&self, request: &PageRequest) -> Option<PageEnrichment> {
        match request {
            PageRequest::BlogIndex { language, page } => self.enrich_index(language, *page),
            PageRequest::Archive {
                language,
                kind,
                slug,
                page,
            } => self.enrich_archive(language, *kind, slug, *page),
            PageRequest::Post { path } => self.enrich_post(path),
            PageRequest::Other => None,
        }
    }

    fn enrich_index(&self, language: &str, page: usize) -> Option<PageEnrichment> {
        let listed = self.listed(language);
        let base = self.settings().urls.index_base(language);
        let (plan, items) = page_slice(&listed, self.settings().per_page, page, &base)?;

        let index = self.archives(language);
        Some(PageEnrichment {
            posts: items.iter().map(|p| self.summary(p)).collect(),
            pagination: Some(plan),
            ..self.base_enrichment(language, &index)
        })
    }

    fn enrich_archive(
        &self,
        language: &str,
        kind: ArchiveKind,
        slug: &str,
        page: usize,
    ) -> Option<PageEnrichment> {
        if self.total_archives() > self.settings().max_archive_pages {
            return None;
        }
        let index = self.archives(language);

        let archive = index.find(kind, slug)?;
        let base = self.settings().urls.archive_base(language, kind, slug);
        let (plan, items) = page_slice(&archive.posts, self.settings().per_page, page, &base)?;

        Some(PageEnrichment {
            posts: items.iter().map(|p| self.summary(p)).collect(),
            pagination: Some(plan),
            archive: Some(ArchiveHeading {
                kind,
                slug: archive.slug.clone(),
                name: archive.name.clone(),
                count: archive.count,
                url: page_url(&base, 1),
            }),
            ..self.base_enrichment(language, &index)
        })
    }

    fn enrich_post(&self, path: &str) -> Option<PageEnrichment> {
        let post = self.find_post(path)?;
        let listed = self.listed(&post.language);
        let position = listed.iter().position(|p| p.path == post.path);

        let link = |p: &Post| PostLink {
            title: p.title.clone(),
            url: self.post_url(p),
        };
        let prev_post = position.and_then(|i| listed.get(i + 1)).map(|p| link(p));
        let next_post = position
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| listed.get(i))
            .map(|p| link(p));

        let index = self.archives(&post.language);
        Some(PageEnrichment {
            post: Some(self.summary(post)),
            prev_post,
            next_post,
            ..self.base_enrichment(&post.language, &index)
        })
    }

    /// Language and taxonomy lists shared by every blog page.
    fn base_enrichment(&self, language: &str, index: &ArchiveIndex<'_>) -> PageEnrichment {
        PageEnrichment {
            language: language.to_owned(),
            posts: Vec::new(),
            pagination: None,
            archive: None,
            categories: index.categories.clone(),
            tags: index.tags.clone(),
            authors: index.authors.clone(),
            post: None,
            prev_post: None,
            next_post: None,
        }
    }

    fn summary(&self, post: &Post) -> PostSummary {
        let term = |kind: ArchiveKind, name: &str| {
            let slug = crate::utils::slug::slugify(name);
            TermLink {
                name: name.to_owned(),
                url: page_url(
                    &self.settings().urls.archive_base(&post.language, kind, &slug),
                    1,
                ),
                slug,
            }
        };

        PostSummary {
            id: post.id,
            title: post.title.clone(),
            url: self.post_url(post),
            date: post.date,
            language: post.language.clone(),
            excerpt: post.excerpt.clone(),
            author: post.author.as_deref().map(|a| term(ArchiveKind::Author, a)),
            featured_image: post.featured_image.clone(),
            categories: post
                .categories
                .iter()
                .map(|c| term(ArchiveKind::Category, c))
                .collect(),
            tags: post.tags.iter().map(|t| term(ArchiveKind::Tag, t)).collect(),
            reading_time: post.reading_time,
        }
    }

    // ========================================================================
    // Virtual pages
    // ========================================================================

    /// Every blog index page and archive page, per language.
    ///
    /// Archive pages are left out when the archives of all languages
    /// together are over `max_archive_pages`.
    pub fn virtual_pages(&self) -> Vec<PageDescriptor> {
        let urls = &self.settings().urls;
        let total_archives = self.total_archives();
        let mut pages = Vec::new();

        for language in self.languages() {
            let listed = self.listed(language);
            let target = PageTarget::BlogIndex {
                language: language.clone(),
            };
            pages.extend(
                paginate(&listed, self.settings().per_page, &target, urls)
                    .iter()
                    .map(|page| PageDescriptor {
                        url: page.url(urls),
                        request: PageRequest::for_target(&page.target, page.plan.current_page),
                    }),
            );

            let index = self.archives(language);
            if let ArchivePages::Generated(archive) =
                archive_pages(&index, language, total_archives, self.settings())
            {
                pages.extend(archive.iter().map(|page| PageDescriptor {
                    url: page.url(urls),
                    request: PageRequest::for_target(&page.target, page.plan.current_page),
                }));
            }
        }

        pages
    }
}

/// Plan and item slice for one page; `None` when the page does not exist.
///
/// Page 1 of an empty collection exists (with zero total pages).
fn page_slice<'a, T>(
    items: &'a [T],
    per_page: usize,
    page: usize,
    base: &str,
) -> Option<(PaginationPlan, &'a [T])> {
    let per_page = per_page.max(1);
    let plan = plan(items.len(), per_page, page, base);
    if page == 0 || (page > plan.total_pages && !(page == 1 && items.is_empty())) {
        return None;
    }

    let start = (plan.current_page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    Some((plan, &items[start.min(end)..end]))
}

// ============================================================================
// Tests
// ============================================================================
