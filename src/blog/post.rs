//! Blog post model and validation.

use crate::{
    content::{
        Document, Frontmatter,
        classify::{is_archive_path, is_index_file},
        frontmatter::{get_bool, get_list, get_str, get_string, is_draft},
    },
    log,
    utils::{
        date::parse_date,
        markdown,
        slug::slugify,
        text::{excerpt, word_count},
    },
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// Reading speed used for `reading_time`
const WORDS_PER_MINUTE: usize = 200;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Publish,
    Draft,
}

/// What a blog document is, decided from its path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    #[default]
    Post,
    /// `index.<ext>`
    Index,
    /// Lives under a `category/`, `tag/` or `author/` directory.
    Archive,
}

/// Per-post limits taken from `[blog]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostLimits {
    pub extension: String,
    pub max_categories: usize,
    pub max_tags: usize,
    pub excerpt_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    #[error("missing title")]
    MissingTitle,

    #[error("missing date")]
    MissingDate,

    #[error("invalid date `{0}`")]
    InvalidDate(String),
}

/// A validated blog post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Persistent numeric ID, set by the ID assignment pass.
    #[serde(rename = "postId")]
    pub id: Option<u64>,
    pub title: String,
    /// Always `Some` for `PostKind::Post`.
    pub date: Option<NaiveDateTime>,
    pub slug: String,
    /// Relative to the blog directory, forward slashes.
    pub path: String,
    pub language: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub featured_image: Option<String>,
    pub excerpt: String,
    pub status: PostStatus,
    pub published: bool,
    pub kind: PostKind,
    /// Minutes
    pub reading_time: usize,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(skip)]
    pub body: String,
    #[serde(skip)]
    pub frontmatter: Frontmatter,
}

// ============================================================================
// Construction
// ============================================================================

impl Post {
    /// Validate a scanned document and turn it into a post.
    ///
    /// Title is always required. Date is required unless the document is an
    /// index page or an archive-type page; a date that is present must parse.
    /// Categories and tags beyond the limits are dropped (first N kept).
    pub fn from_document(doc: Document, limits: &PostLimits) -> Result<Self, PostError> {
        let fm = &doc.frontmatter;

        let title = get_str(fm, "title").ok_or(PostError::MissingTitle)?.to_owned();

        let kind = if is_index_file(&doc.path, &limits.extension) {
            PostKind::Index
        } else if is_archive_path(&doc.path) {
            PostKind::Archive
        } else {
            PostKind::Post
        };

        let date = match get_string(fm, "date") {
            Some(raw) => Some(parse_date(&raw).ok_or(PostError::InvalidDate(raw))?),
            None if kind == PostKind::Post => return Err(PostError::MissingDate),
            None => None,
        };

        let categories = truncate_terms(
            get_list(fm, "categories"),
            limits.max_categories,
            "categories",
            &title,
        );
        let tags = truncate_terms(get_list(fm, "tags"), limits.max_tags, "tags", &title);

        let status = if is_draft(fm) {
            PostStatus::Draft
        } else {
            PostStatus::Publish
        };

        let text = markdown::to_text(&doc.body);
        let excerpt = get_str(fm, "excerpt")
            .map(str::to_owned)
            .unwrap_or_else(|| excerpt(&text, limits.excerpt_length));
        let reading_time = word_count(&text).div_ceil(WORDS_PER_MINUTE).max(1);

        let slug = resolve_slug(fm, &doc.slug);

        let featured_image = ["featuredImage", "featured_image", "image"]
            .iter()
            .find_map(|key| get_str(fm, key))
            .map(str::to_owned);

        Ok(Self {
            id: None,
            title,
            date,
            slug,
            path: doc.path,
            language: doc.language,
            categories,
            tags,
            author: get_string(fm, "author"),
            featured_image,
            excerpt,
            status,
            published: get_bool(fm, "published").unwrap_or(true),
            kind,
            reading_time,
            created: doc.created,
            modified: doc.modified,
            body: doc.body,
            frontmatter: doc.frontmatter,
        })
    }
}

/// Frontmatter `slug` when it slugifies to something, else the file slug.
pub fn resolve_slug(fm: &Frontmatter, file_slug: &str) -> String {
    get_str(fm, "slug")
        .map(slugify)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| file_slug.to_owned())
}

/// Keep the first `max` terms, warning when anything is dropped.
fn truncate_terms(mut terms: Vec<String>, max: usize, field: &str, title: &str) -> Vec<String> {
    if terms.len() > max {
        log!(warn "blog"; "\"{title}\" has {} {field}, keeping the first {max}", terms.len());
        terms.truncate(max);
    }
    terms
}

// ============================================================================
// Queries
// ============================================================================

impl Post {
    /// Whether the post appears in listings, archives and feeds.
    ///
    /// Only published `PostKind::Post` entries are listed.
    pub fn is_listed(&self) -> bool {
        self.kind == PostKind::Post && self.status == PostStatus::Publish && self.published
    }

    pub fn category_slugs(&self) -> impl Iterator<Item = String> + '_ {
        self.categories.iter().map(|c| slugify(c))
    }

    pub fn tag_slugs(&self) -> impl Iterator<Item = String> + '_ {
        self.tags.iter().map(|t| slugify(t))
    }

    pub fn author_slug(&self) -> Option<String> {
        self.author.as_deref().map(slugify)
    }
}

/// Listing order: date descending, then creation time descending, then path.
pub fn listing_order(a: &Post, b: &Post) -> Ordering {
    b.date
        .cmp(&a.date)
        .then_with(|| b.created.cmp(&a.created))
        .then_with(|| a.path.cmp(&b.path))
}

/// Sort posts into listing order.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(listing_order);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::content::frontmatter;
    use chrono::{NaiveDate, TimeZone};
    use proptest::prelude::*;

    pub(crate) fn limits() -> PostLimits {
        PostLimits {
            extension: "md".into(),
            max_categories: 10,
            max_tags: 20,
            excerpt_length: 160,
        }
    }

    pub(crate) fn document(path: &str, raw: &str) -> Document {
        let parsed = frontmatter::parse(raw).unwrap();
        Document {
            path: path.into(),
            slug: crate::utils::slug::file_slug(path.rsplit('/').next().unwrap(), "md"),
            language: "en".into(),
            frontmatter: parsed.frontmatter,
            body: parsed.body,
            created: DateTime::UNIX_EPOCH,
            modified: DateTime::UNIX_EPOCH,
        }
    }

    /// Minimal listed post for ordering and aggregation tests.
    pub(crate) fn post(path: &str, date: &str, created_secs: i64) -> Post {
        let raw = format!("---\ntitle: {path}\ndate: {date}\n---\nbody");
        let mut post = Post::from_document(document(path, &raw), &limits()).unwrap();
        post.created = Utc.timestamp_opt(created_secs, 0).unwrap();
        post
    }

    #[test]
    fn test_from_document_full() {
        let raw = "---\n\
            title: Hello World\n\
            date: 2025-01-15\n\
            categories: [Rust, Web Dev]\n\
            tags: rust, async\n\
            author: Alice\n\
            featuredImage: /img/hero.png\n\
            ---\n\
            Some **text** here.";
        let post = Post::from_document(document("hello.md", raw), &limits()).unwrap();

        assert_eq!(post.title, "Hello World");
        assert_eq!(
            post.date,
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(post.slug, "hello");
        assert_eq!(post.categories, vec!["Rust", "Web Dev"]);
        assert_eq!(post.tags, vec!["rust", "async"]);
        assert_eq!(post.author.as_deref(), Some("Alice"));
        assert_eq!(post.featured_image.as_deref(), Some("/img/hero.png"));
        assert_eq!(post.excerpt, "Some text here.");
        assert_eq!(post.reading_time, 1);
        assert_eq!(post.kind, PostKind::Post);
        assert!(post.is_listed());
        assert_eq!(post.category_slugs().collect::<Vec<_>>(), vec!["rust", "web-dev"]);
    }

    #[test]
    fn test_missing_title_rejected() {
        let doc = document("a.md", "---\ndate: 2025-01-01\n---\n");
        assert_eq!(Post::from_document(doc, &limits()), Err(PostError::MissingTitle));
    }

    #[test]
    fn test_missing_date_rejected_for_posts() {
        let doc = document("a.md", "---\ntitle: A\n---\n");
        assert_eq!(Post::from_document(doc, &limits()), Err(PostError::MissingDate));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let doc = document("a.md", "---\ntitle: A\ndate: someday\n---\n");
        assert_eq!(
            Post::from_document(doc, &limits()),
            Err(PostError::InvalidDate("someday".into()))
        );
    }

    #[test]
    fn test_index_and_archive_pages_exempt_from_date() {
        let index = document("en/index.md", "---\ntitle: Home\n---\n");
        let post = Post::from_document(index, &limits()).unwrap();
        assert_eq!(post.kind, PostKind::Index);
        assert_eq!(post.date, None);

        let archive = document("tag/rust.md", "---\ntitle: Rust\n---\n");
        let post = Post::from_document(archive, &limits()).unwrap();
        assert_eq!(post.kind, PostKind::Archive);
    }

    #[test]
    fn test_truncation_keeps_prefix() {
        let tags: Vec<String> = (0..25).map(|i| format!("t{i}")).collect();
        let raw = format!(
            "---\ntitle: Many\ndate: 2025-01-01\ntags: [{}]\n---\n",
            tags.join(", ")
        );
        let post = Post::from_document(document("many.md", &raw), &limits()).unwrap();
        assert_eq!(post.tags.len(), 20);
        assert_eq!(post.tags, tags[..20]);
    }

    #[test]
    fn test_draft_handling() {
        let draft = document("d.md", "---\ntitle: D\ndate: 2025-01-01\ndraft: true\n---\n");
        let post = Post::from_document(draft, &limits()).unwrap();
        assert_eq!(post.status, PostStatus::Draft);
        assert!(!post.is_listed());

        let status = document("s.md", "---\ntitle: S\ndate: 2025-01-01\nstatus: Draft\n---\n");
        assert_eq!(Post::from_document(status, &limits()).unwrap().status, PostStatus::Draft);

        let hidden = document("h.md", "---\ntitle: H\ndate: 2025-01-01\npublished: false\n---\n");
        let post = Post::from_document(hidden, &limits()).unwrap();
        assert_eq!(post.status, PostStatus::Publish);
        assert!(!post.is_listed());
    }

    #[test]
    fn test_explicit_excerpt_and_slug() {
        let raw = "---\ntitle: T\ndate: 2025-01-01\nexcerpt: Short.\nslug: Custom Slug\n---\nLong body";
        let post = Post::from_document(document("file.md", raw), &limits()).unwrap();
        assert_eq!(post.excerpt, "Short.");
        assert_eq!(post.slug, "custom-slug");
    }

    #[test]
    fn test_derived_excerpt_is_cut() {
        let body = "word ".repeat(100);
        let raw = format!("---\ntitle: T\ndate: 2025-01-01\n---\n{body}");
        let mut limits = limits();
        limits.excerpt_length = 12;
        let post = Post::from_document(document("file.md", &raw), &limits).unwrap();
        assert_eq!(post.excerpt, "word word wo…");
    }

    #[test]
    fn test_reading_time_rounds_up() {
        let body = "word ".repeat(401);
        let raw = format!("---\ntitle: T\ndate: 2025-01-01\n---\n{body}");
        let post = Post::from_document(document("file.md", &raw), &limits()).unwrap();
        assert_eq!(post.reading_time, 3);
    }

    #[test]
    fn test_same_day_ordering_by_creation_time() {
        let mut posts = vec![
            post("jan10.md", "2025-01-10", 300),
            post("jan15-early.md", "2025-01-15", 100),
            post("jan15-late.md", "2025-01-15", 200),
        ];
        sort_posts(&mut posts);

        let order: Vec<_> = posts.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(order, vec!["jan15-late.md", "jan15-early.md", "jan10.md"]);
    }

    #[test]
    fn test_path_breaks_full_ties() {
        let mut posts = vec![post("b.md", "2025-01-01", 1), post("a.md", "2025-01-01", 1)];
        sort_posts(&mut posts);
        assert_eq!(posts[0].path, "a.md");
    }

    proptest! {
        #[test]
        fn prop_sort_is_total_and_consistent(
            entries in prop::collection::vec((1u32..28, 0i64..5), 1..12)
        ) {
            let mut posts: Vec<Post> = entries
                .iter()
                .enumerate()
                .map(|(i, (day, created))| post(&format!("p{i}.md"), &format!("2025-01-{day:02}"), *created))
                .collect();
            sort_posts(&mut posts);

            for pair in posts.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(listing_order(a, b) == Ordering::Less);
                if a.date != b.date {
                    prop_assert!(a.date > b.date);
                } else {
                    prop_assert!(a.created >= b.created);
                }
            }
        }

        #[test]
        fn prop_truncation_bounds_and_prefix(n in 0usize..40, max in 0usize..25) {
            let terms: Vec<String> = (0..n).map(|i| format!("c{i}")).collect();
            let kept = truncate_terms(terms.clone(), max, "categories", "T");
            prop_assert!(kept.len() <= max);
            prop_assert!(terms.starts_with(&kept));
        }
    }
}
