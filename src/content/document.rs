//! Classified content file produced by the scanner.

use super::frontmatter::Frontmatter;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One scanned file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Path relative to the scan base, forward slashes.
    pub path: String,
    pub frontmatter: Frontmatter,
    pub body: String,
    pub language: String,
    /// Slug of the file name.
    pub slug: String,
    /// Birth time, or `modified` where the filesystem has none.
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Document {
    /// Relative path with `.{extension}` removed.
    pub fn stem_path(&self, extension: &str) -> &str {
        let ext = extension.trim_start_matches('.');
        self.path
            .strip_suffix(ext)
            .and_then(|s| s.strip_suffix('.'))
            .unwrap_or(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(path: &str) -> Document {
        Document {
            path: path.into(),
            frontmatter: Frontmatter::new(),
            body: String::new(),
            language: "en".into(),
            slug: String::new(),
            created: DateTime::UNIX_EPOCH,
            modified: DateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_stem_path() {
        assert_eq!(doc("blog/en/post.md").stem_path("md"), "blog/en/post");
        assert_eq!(doc("notes.txt").stem_path(".md"), "notes.txt");
        assert_eq!(doc("xmd").stem_path("md"), "xmd");
    }
}
