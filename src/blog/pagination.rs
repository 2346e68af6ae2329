//! Pagination math, page URLs and windowed page links.
//!
//! The blog index and every archive share the same math; a [`PageTarget`]
//! only decides the base URL.
//!
//! | Page | URL                    |
//! |------|------------------------|
//! | 1    | `{base}/`              |
//! | N≥2  | `{base}-page-{N}/`     |
//!
//! Page links always include the first and last page plus a ±1 window around
//! the current page, with an ellipsis wherever numbers are skipped:
//!
//! ```text
//! current = 6 of 12:  1 … 5 [6] 7 … 12
//! current = 2 of 4:   1 [2] 3 4
//! ```

use super::archive::ArchiveKind;
use serde::Serialize;

// ============================================================================
// URLs
// ============================================================================

/// URL layout for blog pages.
///
/// Non-default languages are prefixed with `/{lang}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlScheme {
    blog_path: String,
    default_language: String,
}

impl UrlScheme {
    pub fn new(blog_path: &str, default_language: &str) -> Self {
        Self {
            blog_path: blog_path.trim_matches('/').to_owned(),
            default_language: default_language.to_owned(),
        }
    }

    fn prefix(&self, language: &str) -> String {
        if language == self.default_language {
            String::new()
        } else {
            format!("/{language}")
        }
    }

    /// `/{blog_path}`
    pub fn index_base(&self, language: &str) -> String {
        format!("{}/{}", self.prefix(language), self.blog_path)
    }

    /// `/{blog_path}/{kind}/{slug}`
    pub fn archive_base(&self, language: &str, kind: ArchiveKind, slug: &str) -> String {
        format!("{}/{}/{}/{slug}", self.prefix(language), self.blog_path, kind.as_str())
    }

    /// `/{blog_path}/{slug}/`
    pub fn post_url(&self, language: &str, slug: &str) -> String {
        format!("{}/{}/{slug}/", self.prefix(language), self.blog_path)
    }
}

/// URL of page `page` under `base`.
pub fn page_url(base: &str, page: usize) -> String {
    if page <= 1 {
        format!("{base}/")
    } else {
        format!("{base}-page-{page}/")
    }
}

// ============================================================================
// Targets
// ============================================================================

/// What is being paginated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageTarget {
    BlogIndex {
        language: String,
    },
    Archive {
        language: String,
        kind: ArchiveKind,
        slug: String,
    },
}

impl PageTarget {
    pub fn language(&self) -> &str {
        match self {
            Self::BlogIndex { language } | Self::Archive { language, .. } => language,
        }
    }

    pub fn base_url(&self, urls: &UrlScheme) -> String {
        match self {
            Self::BlogIndex { language } => urls.index_base(language),
            Self::Archive {
                language,
                kind,
                slug,
            } => urls.archive_base(language, *kind, slug),
        }
    }
}

// ============================================================================
// Plans
// ============================================================================

/// One entry in the page-number list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageLink {
    Page {
        number: usize,
        url: String,
        current: bool,
    },
    Ellipsis,
}

/// Navigation for one page of a paginated collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationPlan {
    pub current_page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
    pub links: Vec<PageLink>,
}

/// Plan page `current_page` of `total_items` split into pages of `page_size`.
///
/// `current_page` is clamped into range. An empty collection has zero pages,
/// no neighbours and no links.
pub fn plan(total_items: usize, page_size: usize, current_page: usize, base: &str) -> PaginationPlan {
    let total_pages = total_items.div_ceil(page_size.max(1));
    let current_page = current_page.clamp(1, total_pages.max(1));

    let has_prev = current_page > 1 && total_pages > 0;
    let has_next = current_page < total_pages;

    PaginationPlan {
        current_page,
        total_pages,
        has_prev,
        has_next,
        prev_url: has_prev.then(|| page_url(base, current_page - 1)),
        next_url: has_next.then(|| page_url(base, current_page + 1)),
        links: window(current_page, total_pages)
            .into_iter()
            .map(|n| match n {
                Some(number) => PageLink::Page {
                    number,
                    url: page_url(base, number),
                    current: number == current_page,
                },
                None => PageLink::Ellipsis,
            })
            .collect(),
    }
}

/// Page numbers to show; `None` marks an ellipsis.
fn window(current: usize, total: usize) -> Vec<Option<usize>> {
    if total == 0 {
        return Vec::new();
    }

    let mut pages = vec![1, total];
    pages.extend(current.saturating_sub(1).max(1)..=(current + 1).min(total));
    pages.sort_unstable();
    pages.dedup();

    let mut out = Vec::with_capacity(pages.len() * 2);
    let mut prev = 0;
    for page in pages {
        if prev != 0 && page - prev > 1 {
            out.push(None);
        }
        out.push(Some(page));
        prev = page;
    }
    out
}

// ============================================================================
// Virtual Pages
// ============================================================================

/// One generated listing page with its slice of items.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualPage<'a, T> {
    pub target: PageTarget,
    pub plan: PaginationPlan,
    pub items: &'a [T],
}

impl<T> VirtualPage<'_, T> {
    /// URL of this page.
    pub fn url(&self, urls: &UrlScheme) -> String {
        page_url(&self.target.base_url(urls), self.plan.current_page)
    }
}

/// Split `items` into pages. Item counts across pages sum to `items.len()`;
/// an empty slice produces no pages.
pub fn paginate<'a, T>(
    items: &'a [T],
    page_size: usize,
    target: &PageTarget,
    urls: &UrlScheme,
) -> Vec<VirtualPage<'a, T>> {
    let base = target.base_url(urls);
    items
        .chunks(page_size.max(1))
        .enumerate()
        .map(|(i, chunk)| VirtualPage {
            target: target.clone(),
            plan: plan(items.len(), page_size, i + 1, &base),
            items: chunk,
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
