//! Path classification: language detection, path normalization, exclusions.
//!
//! Pure functions shared by the blog scanner and the search indexer.

use super::frontmatter::{self, Frontmatter};
use crate::config::ConfigError;
use glob::{MatchOptions, Pattern};
use std::path::{Component, Path};

/// Path segments that mark archive-type pages
const ARCHIVE_SEGMENTS: [&str; 3] = ["category", "tag", "author"];

// ============================================================================
// Paths
// ============================================================================

/// Forward-slash form of a relative path, with `.` components dropped.
pub fn normalize_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().replace('\\', "/")),
            Component::ParentDir => Some("..".to_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether `rel_path` names an `index.<ext>` page.
pub fn is_index_file(rel_path: &str, extension: &str) -> bool {
    let name = rel_path.rsplit('/').next().unwrap_or(rel_path);
    name.eq_ignore_ascii_case(&format!("index.{}", extension.trim_start_matches('.')))
}

/// Whether any directory segment of `rel_path` is `category`, `tag` or `author`.
pub fn is_archive_path(rel_path: &str) -> bool {
    let mut segments: Vec<&str> = rel_path.split('/').collect();
    segments.pop();
    segments.iter().any(|s| ARCHIVE_SEGMENTS.contains(s))
}

/// `rel_path` with its leading `{blog_path}/` removed; `None` outside the blog.
pub fn blog_relative<'a>(rel_path: &'a str, blog_path: &str) -> Option<&'a str> {
    let blog_path = blog_path.trim_matches('/');
    if blog_path.is_empty() {
        return None;
    }
    rel_path.strip_prefix(blog_path)?.strip_prefix('/')
}

/// Blog-relative path of a content file the blog publishes as a post page.
///
/// Index pages are not posts. On multilingual sites posts live in one
/// `{lang}/` directory per language; files beside them are not discovered.
pub fn post_path<'a>(
    rel_path: &'a str,
    blog_path: &str,
    extension: &str,
    languages: &[String],
) -> Option<&'a str> {
    let rel = blog_relative(rel_path, blog_path)?;
    if is_index_file(rel, extension) {
        return None;
    }
    if languages.len() > 1 {
        let (first, _) = rel.split_once('/')?;
        if !languages.iter().any(|l| l == first) {
            return None;
        }
    }
    Some(rel)
}

// ============================================================================
// Language Detection
// ============================================================================

/// Resolve a document's language.
///
/// Priority:
/// 1. frontmatter `language`
/// 2. first path segment, when it is one of `languages`
/// 3. `default_locale`
pub fn detect_language(
    fm: &Frontmatter,
    rel_path: &str,
    languages: &[String],
    default_locale: &str,
) -> String {
    if let Some(lang) = frontmatter::get_str(fm, "language") {
        return lang.to_owned();
    }

    let first = rel_path.split('/').next().unwrap_or_default();
    if rel_path.contains('/') && languages.iter().any(|l| l == first) {
        return first.to_owned();
    }

    default_locale.to_owned()
}

// ============================================================================
// Exclusions
// ============================================================================

/// Compiled `exclude_paths` globs.
///
/// Patterns support `**` (any number of directories) and `*` (anything but `/`).
/// Both patterns and candidate paths are normalized to forward slashes.
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    patterns: Vec<Pattern>,
}

impl ExcludeSet {
    const OPTIONS: MatchOptions = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    /// Compile patterns; the first invalid one is a configuration error.
    pub fn new(patterns: &[String]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|raw| {
                let normalized = raw.replace('\\', "/");
                let normalized = normalized.trim_start_matches("./");
                Pattern::new(normalized).map_err(|err| ConfigError::Pattern(raw.clone(), err))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Whether a file at `rel_path` is excluded.
    pub fn is_excluded(&self, rel_path: &str) -> bool {
        let rel_path = rel_path.replace('\\', "/");
        self.patterns
            .iter()
            .any(|p| p.matches_with(&rel_path, Self::OPTIONS))
    }

    /// Whether the directory at `rel_path` is excluded.
    ///
    /// Also tries `rel_path/`, so `drafts/**` prunes `drafts` itself.
    pub fn is_dir_excluded(&self, rel_path: &str) -> bool {
        self.is_excluded(rel_path) || self.is_excluded(&format!("{rel_path}/"))
    }
}

// ============================================================================
// Tests
// ============================================================================
