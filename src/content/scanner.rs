//! Bounded-concurrency content scanner.
//!
//! # Scan Flow
//!
//! ```text
//! walk root_dir (sequential) ──► candidate files ──► load (rayon pool) ──► sort by path
//!      │                              │                    │
//!      ▼                              ▼                    ▼
//!  prune excluded dirs        drop excluded / index   stat, size check, read,
//!                                                     parse, classify
//! ```
//!
//! Relative paths, and so exclusion globs, are taken against `base_path`.
//! Both consumers pass the content directory there. Language detection looks
//! past a leading `{blog.path}/` segment, so a post resolves to the same
//! language whichever consumer scanned it.
//!
//! Directory traversal is sequential. File loading runs on a dedicated rayon
//! pool of exactly `concurrency_limit` workers, so no more than that many
//! files are read at once. Every per-file failure is logged and dropped.

use super::{
    classify::{self, ExcludeSet},
    document::Document,
    frontmatter::{self, FrontmatterError},
};
use crate::{
    config::{ConfigError, SiteConfig},
    log,
    utils::{slug::file_slug, text::truncate_bytes},
};
use chrono::{DateTime, Utc};
use rayon::{ThreadPoolBuilder, prelude::*};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

// ============================================================================
// Policy
// ============================================================================

/// Per-consumer scanning rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanPolicy {
    /// Drop `index.<ext>` files before loading them.
    pub skip_index_files: bool,
    /// Cut the body to this many bytes (on a char boundary) after the
    /// frontmatter is split off.
    pub truncate_at: Option<u64>,
}

impl ScanPolicy {
    /// Blog posts: index pages are not posts, content is never cut.
    pub const fn blog() -> Self {
        Self {
            skip_index_files: true,
            truncate_at: None,
        }
    }

    /// Search index: every page, body cut at
    /// `min(max_file_size, max_content_length * 3)`.
    pub fn search(max_file_size: u64, max_content_length: usize) -> Self {
        let budget = (max_content_length as u64).saturating_mul(3);
        Self {
            skip_index_files: false,
            truncate_at: Some(max_file_size.min(budget)),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Why a single file was dropped from a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("file is {size} bytes, over the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("failed to read file")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
}

// ============================================================================
// Scanner
// ============================================================================

/// Directory scanner, configured once per consumer.
#[derive(Debug, Clone)]
pub struct Scanner {
    extension: String,
    scan_subfolders: bool,
    excludes: ExcludeSet,
    max_file_size: u64,
    concurrency_limit: usize,
    languages: Vec<String>,
    default_locale: String,
    blog_path: String,
    policy: ScanPolicy,
}

impl Scanner {
    pub fn new(config: &SiteConfig, policy: ScanPolicy) -> Result<Self, ConfigError> {
        Ok(Self {
            extension: config.build.extension.trim_start_matches('.').to_owned(),
            scan_subfolders: config.build.scan.scan_subfolders,
            excludes: config.exclude_set()?,
            max_file_size: config.max_file_size(),
            concurrency_limit: config.build.scan.concurrency_limit.max(1),
            languages: config.base.languages.clone(),
            default_locale: config.base.language.clone(),
            blog_path: config.blog.path.trim_matches('/').to_owned(),
            policy,
        })
    }

    /// Scan `root_dir`, reporting paths relative to `base_path`.
    ///
    /// A missing root yields an empty result. Output is sorted by relative path.
    pub fn scan(&self, root_dir: &Path, base_path: &Path) -> Vec<Document> {
        if !root_dir.is_dir() {
            log!("scan"; "{} not found, nothing to scan", root_dir.display());
            return Vec::new();
        }

        let candidates = self.collect_candidates(root_dir, base_path);
        let load = |(path, rel): &(PathBuf, String)| match self.load(path, rel) {
            Ok(doc) => Some(doc),
            Err(ScanError::TooLarge { size, limit }) => {
                log!(warn "scan"; "skipping {rel}: {size} bytes exceeds max_file_size ({limit})");
                None
            }
            Err(err) => {
                log!(error "scan"; "skipping {rel}: {}", error_chain(&err));
                None
            }
        };

        let mut documents: Vec<Document> = match ThreadPoolBuilder::new()
            .num_threads(self.concurrency_limit)
            .build()
        {
            Ok(pool) => pool.install(|| candidates.par_iter().filter_map(load).collect()),
            Err(err) => {
                log!(warn "scan"; "thread pool unavailable ({err}), reading files sequentially");
                candidates.iter().filter_map(load).collect()
            }
        };

        documents.sort_by(|a, b| a.path.cmp(&b.path));
        log!(debug "scan"; "{}: {} documents", root_dir.display(), documents.len());
        documents
    }

    /// Walk the tree and keep the files worth loading.
    fn collect_candidates(&self, root_dir: &Path, base_path: &Path) -> Vec<(PathBuf, String)> {
        let mut walker = WalkDir::new(root_dir).follow_links(false);
        if !self.scan_subfolders {
            walker = walker.max_depth(1);
        }

        let entries = walker.into_iter().filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let rel = relative_path(entry.path(), base_path, root_dir);
            let excluded = self.excludes.is_dir_excluded(&rel);
            if excluded {
                log!(debug "scan"; "excluded directory {rel}");
            }
            !excluded
        });

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let at = err.path().map(|p| p.display().to_string()).unwrap_or_default();
                    log!(error "scan"; "cannot read {at}: {err}");
                    continue;
                }
            };

            // Symlinks, sockets and friends are skipped silently
            if !entry.file_type().is_file() || !self.has_extension(entry.path()) {
                continue;
            }

            let rel = relative_path(entry.path(), base_path, root_dir);
            if self.excludes.is_excluded(&rel) {
                log!(debug "scan"; "excluded {rel}");
                continue;
            }
            if self.policy.skip_index_files && classify::is_index_file(&rel, &self.extension) {
                log!(debug "scan"; "skipping index page {rel}");
                continue;
            }

            candidates.push((entry.into_path(), rel));
        }
        candidates
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    /// Stat, read, parse and classify one file.
    fn load(&self, path: &Path, rel: &str) -> Result<Document, ScanError> {
        let meta = fs::metadata(path)?;
        if meta.len() > self.max_file_size {
            return Err(ScanError::TooLarge {
                size: meta.len(),
                limit: self.max_file_size,
            });
        }

        let raw = fs::read_to_string(path)?;
        let mut parsed = frontmatter::parse(&raw)?;
        if let Some(limit) = self.policy.truncate_at {
            let limit = usize::try_from(limit).unwrap_or(usize::MAX);
            if parsed.body.len() > limit {
                parsed.body = truncate_bytes(&parsed.body, limit).to_owned();
            }
        }

        let modified: DateTime<Utc> = meta
            .modified()
            .map(DateTime::from)
            .unwrap_or(DateTime::UNIX_EPOCH);
        let created = meta.created().map(DateTime::from).unwrap_or(modified);

        let file_name = rel.rsplit('/').next().unwrap_or(rel);
        let language_path = classify::blog_relative(rel, &self.blog_path).unwrap_or(rel);
        let language = classify::detect_language(
            &parsed.frontmatter,
            language_path,
            &self.languages,
            &self.default_locale,
        );

        Ok(Document {
            path: rel.to_owned(),
            slug: file_slug(file_name, &self.extension),
            language,
            frontmatter: parsed.frontmatter,
            body: parsed.body,
            created,
            modified,
        })
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Path of `path` relative to `base_path`, falling back to `root_dir`.
fn relative_path(path: &Path, base_path: &Path, root_dir: &Path) -> String {
    let rel = path
        .strip_prefix(base_path)
        .or_else(|_| path.strip_prefix(root_dir))
        .unwrap_or(path);
    classify::normalize_path(rel)
}

/// Flatten an error and its sources into one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.languages = vec!["en".into(), "fr".into()];
        config
    }

    fn scanner(config: &SiteConfig, policy: ScanPolicy) -> Scanner {
        Scanner::new(config, policy).unwrap()
    }

    fn paths(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.path.as_str()).collect()
    }

    #[test]
    fn test_scan_missing_root_is_empty() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let docs = scanner(&config(), ScanPolicy::blog()).scan(&missing, &missing);
        assert!(docs.is_empty());
    }

    #[test]
    fn test_scan_nested_sorted_and_classified() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "fr/Deux Mots.md", "---\ntitle: Deux\n---\nbonjour");
        write(dir.path(), "en/a/deep.md", "---\ntitle: Deep\n---\nhi");
        write(dir.path(), "top.md", "no frontmatter");
        write(dir.path(), "notes.txt", "ignored");

        let docs = scanner(&config(), ScanPolicy::blog()).scan(dir.path(), dir.path());

        assert_eq!(paths(&docs), vec!["en/a/deep.md", "fr/Deux Mots.md", "top.md"]);
        assert_eq!(docs[0].language, "en");
        assert_eq!(docs[1].language, "fr");
        assert_eq!(docs[1].slug, "deux-mots");
        assert_eq!(docs[1].body, "bonjour");
        assert_eq!(docs[2].language, "en");
        assert!(docs[0].created <= Utc::now());
    }

    #[test]
    fn test_scan_paths_relative_to_base() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "fr/post.md", "---\ntitle: P\n---\n");

        let root = dir.path().join("fr");
        let docs = scanner(&config(), ScanPolicy::blog()).scan(&root, dir.path());

        assert_eq!(paths(&docs), vec!["fr/post.md"]);
        assert_eq!(docs[0].language, "fr");
    }

    #[test]
    fn test_scan_oversized_file_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "one.md", "---\ntitle: One\n---\nok");
        write(dir.path(), "two.md", "---\ntitle: Two\n---\nok");
        write(dir.path(), "huge.md", &"x".repeat(4096));

        let mut config = config();
        config.build.scan.max_file_size = "1KB".into();

        let docs = scanner(&config, ScanPolicy::blog()).scan(dir.path(), dir.path());
        assert_eq!(paths(&docs), vec!["one.md", "two.md"]);

        let search = ScanPolicy::search(config.max_file_size(), 5000);
        let docs = scanner(&config, search).scan(dir.path(), dir.path());
        assert_eq!(paths(&docs), vec!["one.md", "two.md"]);
    }

    #[test]
    fn test_scan_exclusions() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "drafts/wip.md", "wip");
        write(dir.path(), "posts/keep.md", "keep");
        write(dir.path(), "posts/skip.draft.md", "skip");

        let mut config = config();
        config.build.scan.exclude_paths = vec!["drafts/**".into(), "**/*.draft.md".into()];

        let docs = scanner(&config, ScanPolicy::blog()).scan(dir.path(), dir.path());
        assert_eq!(paths(&docs), vec!["posts/keep.md"]);
    }

    #[test]
    fn test_scan_without_subfolders() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "top.md", "top");
        write(dir.path(), "sub/nested.md", "nested");

        let mut config = config();
        config.build.scan.scan_subfolders = false;

        let docs = scanner(&config, ScanPolicy::blog()).scan(dir.path(), dir.path());
        assert_eq!(paths(&docs), vec!["top.md"]);
    }

    #[test]
    fn test_scan_index_policy() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "index.md", "---\ntitle: Home\n---\n");
        write(dir.path(), "post.md", "---\ntitle: Post\n---\n");

        let config = config();
        let blog = scanner(&config, ScanPolicy::blog()).scan(dir.path(), dir.path());
        assert_eq!(paths(&blog), vec!["post.md"]);

        let search = ScanPolicy::search(config.max_file_size(), 5000);
        let all = scanner(&config, search).scan(dir.path(), dir.path());
        assert_eq!(paths(&all), vec!["index.md", "post.md"]);
    }

    #[test]
    fn test_scan_malformed_frontmatter_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "bad.md", "---\ntitle: [oops\n---\n");
        write(dir.path(), "open.md", "---\ntitle: never closed\n");
        write(dir.path(), "good.md", "---\ntitle: Good\n---\n");

        let docs = scanner(&config(), ScanPolicy::blog()).scan(dir.path(), dir.path());
        assert_eq!(paths(&docs), vec!["good.md"]);
    }

    #[test]
    fn test_scan_search_policy_truncates_raw_content() {
        let dir = TempDir::new().unwrap();
        let body = "é".repeat(100);
        write(dir.path(), "long.md", &format!("---\ntitle: Long\n---\n{body}"));

        let policy = ScanPolicy::search(10 * 1024 * 1024, 20);
        assert_eq!(policy.truncate_at, Some(60));

        let docs = scanner(&config(), policy).scan(dir.path(), dir.path());
        assert_eq!(docs.len(), 1);
        assert!(docs[0].body.len() < body.len());
        assert!(body.starts_with(&docs[0].body));
    }

    #[test]
    fn test_scan_search_policy_keeps_long_frontmatter() {
        let dir = TempDir::new().unwrap();
        let summary = "x".repeat(100);
        write(
            dir.path(),
            "long.md",
            &format!("---\ntitle: Long\nsummary: {summary}\n---\nbody text that runs on"),
        );

        let policy = ScanPolicy::search(10 * 1024 * 1024, 20);
        let docs = scanner(&config(), policy).scan(dir.path(), dir.path());

        assert_eq!(docs.len(), 1);
        assert_eq!(frontmatter::get_str(&docs[0].frontmatter, "title"), Some("Long"));
        assert_eq!(docs[0].body, "body text that runs on");

        let policy = ScanPolicy::search(10 * 1024 * 1024, 2);
        let docs = scanner(&config(), policy).scan(dir.path(), dir.path());
        assert_eq!(docs[0].body, "body t");
    }

    #[test]
    fn test_scan_language_under_blog_path() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "blog/fr/post.md", "---\ntitle: P\n---\n");
        write(dir.path(), "fr/about.md", "---\ntitle: A\n---\n");
        write(dir.path(), "blog/post.md", "---\ntitle: P\n---\n");

        let search = ScanPolicy::search(config().max_file_size(), 5000);
        let docs = scanner(&config(), search).scan(dir.path(), dir.path());

        assert_eq!(paths(&docs), vec!["blog/fr/post.md", "blog/post.md", "fr/about.md"]);
        assert_eq!(docs[0].language, "fr");
        assert_eq!(docs[1].language, "en");
        assert_eq!(docs[2].language, "fr");
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_unreadable_directory_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.md", "---\ntitle: A\n---\n");
        write(dir.path(), "locked/hidden.md", "---\ntitle: Hidden\n---\n");
        write(dir.path(), "open/b.md", "---\ntitle: B\n---\n");
        write(dir.path(), "z.md", "---\ntitle: Z\n---\n");

        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // root ignores permission bits
        let unreadable = fs::read_dir(&locked).is_err();

        let docs = scanner(&config(), ScanPolicy::blog()).scan(dir.path(), dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let found = paths(&docs);
        for sibling in ["a.md", "open/b.md", "z.md"] {
            assert!(found.contains(&sibling), "{sibling} missing from {found:?}");
        }
        if unreadable {
            assert_eq!(found, vec!["a.md", "open/b.md", "z.md"]);
        }
    }

    #[test]
    fn test_scan_with_single_worker() {
        let dir = TempDir::new().unwrap();
        for i in 0..8 {
            write(dir.path(), &format!("p{i}.md"), "---\ntitle: P\n---\n");
        }
        let mut config = config();
        config.build.scan.concurrency_limit = 1;

        let docs = scanner(&config, ScanPolicy::blog()).scan(dir.path(), dir.path());
        assert_eq!(docs.len(), 8);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_symlinks() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "real.md", "real");
        std::os::unix::fs::symlink(dir.path().join("real.md"), dir.path().join("link.md")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();

        let docs = scanner(&config(), ScanPolicy::blog()).scan(dir.path(), dir.path());
        assert_eq!(paths(&docs), vec!["real.md"]);
    }

    #[test]
    fn test_error_chain() {
        let err = ScanError::Frontmatter(FrontmatterError::Unterminated);
        assert_eq!(error_chain(&err), "frontmatter block is never closed");

        let err = ScanError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(error_chain(&err), "failed to read file: gone");
    }

    /// One synthetic file: directory depth, name, and what makes it (un)qualified.
    #[derive(Debug, Clone)]
    enum Kind {
        Valid,
        Excluded,
        Oversized,
        OtherExtension,
    }

    fn kind() -> impl Strategy<Value = Kind> {
        prop_oneof![
            4 => Just(Kind::Valid),
            1 => Just(Kind::Excluded),
            1 => Just(Kind::Oversized),
            1 => Just(Kind::OtherExtension),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_scan_returns_exactly_qualifying_files(
            files in prop::collection::vec((0usize..4, kind()), 0..20)
        ) {
            let dir = TempDir::new().unwrap();
            let mut expected = 0;

            for (i, (depth, kind)) in files.iter().enumerate() {
                let dirs: String = (0..*depth).map(|d| format!("d{d}/")).collect();
                let (name, content) = match kind {
                    Kind::Valid => (format!("f{i}.md"), "ok".to_string()),
                    Kind::Excluded => (format!("f{i}.skip.md"), "ok".to_string()),
                    Kind::Oversized => (format!("f{i}.md"), "x".repeat(2048)),
                    Kind::OtherExtension => (format!("f{i}.txt"), "ok".to_string()),
                };
                if matches!(kind, Kind::Valid) {
                    expected += 1;
                }
                write(dir.path(), &format!("{dirs}{name}"), &content);
            }

            let mut config = config();
            config.build.scan.max_file_size = "1KB".into();
            config.build.scan.exclude_paths = vec!["**/*.skip.md".into()];

            let docs = scanner(&config, ScanPolicy::blog()).scan(dir.path(), dir.path());
            prop_assert_eq!(docs.len(), expected);
        }
    }
}
