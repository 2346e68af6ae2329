//! URL slug generation.
//!
//! Two flavours share the same output alphabet:
//!
//! | Function    | Used for                                   | Example                          |
//! |-------------|--------------------------------------------|----------------------------------|
//! | `file_slug` | post files, search entry ids               | `My Post!.md` → `my-post`        |
//! | `slugify`   | category / tag / author display names      | `Rust & Tokio` → `rust-tokio`    |
//!
//! Archive URLs are built and looked up through these two functions only, so
//! a name always maps to the same slug at every call site.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of characters outside the file slug alphabet
static RE_NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]+").unwrap());

/// Runs of whitespace
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Anything that is neither an ASCII word character nor a hyphen
static RE_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9_-]+").unwrap());

/// Two or more consecutive hyphens
static RE_HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

// ============================================================================
// Public API
// ============================================================================

/// Slug for a content file name (or any relative path).
///
/// Lowercases, strips `.{extension}`, replaces runs of characters outside
/// `[a-z0-9-]` with `-`, collapses repeated `-` and trims `-` from both ends.
/// Path separators fall outside the alphabet, so `blog/Hello.md` → `blog-hello`.
pub fn file_slug(file_name: &str, extension: &str) -> String {
    let lower = file_name.to_lowercase();
    let ext = format!(".{}", extension.trim_start_matches('.').to_lowercase());
    let stem = lower.strip_suffix(ext.as_str()).unwrap_or(&lower);

    let replaced = RE_NON_SLUG.replace_all(stem, "-");
    collapse_hyphens(&replaced)
}

/// General-purpose slug for display names.
///
/// Lowercases, trims, turns whitespace runs into `-`, strips everything that is
/// not an ASCII word character or `-`, collapses repeated `-` and trims `-`.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let hyphenated = RE_WHITESPACE.replace_all(lower.trim(), "-");
    let stripped = RE_NON_WORD.replace_all(&hyphenated, "");
    collapse_hyphens(&stripped)
}

#[inline]
fn collapse_hyphens(s: &str) -> String {
    RE_HYPHENS.replace_all(s, "-").trim_matches('-').to_owned()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_file_slug_basic() {
        assert_eq!(file_slug("hello-world.md", "md"), "hello-world");
        assert_eq!(file_slug("Hello World.md", "md"), "hello-world");
        assert_eq!(file_slug("My Post!!.md", "md"), "my-post");
    }

    #[test]
    fn test_file_slug_extension_with_dot() {
        assert_eq!(file_slug("Notes.MD", ".md"), "notes");
    }

    #[test]
    fn test_file_slug_keeps_other_extensions() {
        assert_eq!(file_slug("archive.tar.gz", "md"), "archive-tar-gz");
    }

    #[test]
    fn test_file_slug_collapses_and_trims() {
        assert_eq!(file_slug("--a___b--.md", "md"), "a-b");
        assert_eq!(file_slug("2025-01-15 -- recap.md", "md"), "2025-01-15-recap");
    }

    #[test]
    fn test_file_slug_path_separators() {
        assert_eq!(file_slug("blog/en/First Post", "md"), "blog-en-first-post");
    }

    #[test]
    fn test_file_slug_non_ascii() {
        assert_eq!(file_slug("café crème.md", "md"), "caf-cr-me");
        assert_eq!(file_slug("你好.md", "md"), "");
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Rust"), "rust");
        assert_eq!(slugify("  Web Development  "), "web-development");
        assert_eq!(slugify("Rust & Tokio"), "rust-tokio");
    }

    #[test]
    fn test_slugify_keeps_underscore() {
        assert_eq!(slugify("snake_case tag"), "snake_case-tag");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("C++ / C#"), "c-c");
        assert_eq!(slugify("What's new?"), "whats-new");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_slugify_and_file_slug_agree_on_simple_names() {
        for name in ["rust", "web-dev", "2025"] {
            assert_eq!(slugify(name), file_slug(name, "md"));
        }
    }

    proptest! {
        #[test]
        fn prop_file_slug_idempotent(s in "\\PC{0,40}") {
            let once = file_slug(&s, "md");
            prop_assert_eq!(file_slug(&once, "md"), once);
        }

        #[test]
        fn prop_slugify_idempotent(s in "\\PC{0,40}") {
            let once = slugify(&s);
            prop_assert_eq!(slugify(&once), once);
        }

        #[test]
        fn prop_slugs_use_url_safe_alphabet(s in "\\PC{0,40}") {
            let slug = slugify(&s);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'));
            prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }
    }
}
