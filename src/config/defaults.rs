//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn email() -> String {
        "user@noreply.quire".into()
    }

    pub fn language() -> String {
        "en".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn extension() -> String {
        "md".into()
    }

    pub fn post_id_store() -> PathBuf {
        ".quire/post-ids.json".into()
    }

    pub mod scan {
        pub fn max_file_size() -> String {
            "10MB".into()
        }

        pub fn concurrency_limit() -> usize {
            50
        }
    }
}

// ============================================================================
// [blog] Section Defaults
// ============================================================================

pub mod blog {
    pub fn path() -> String {
        "blog".into()
    }

    pub fn posts_per_page() -> usize {
        10
    }

    pub fn max_tags_per_post() -> usize {
        20
    }

    pub fn max_categories_per_post() -> usize {
        10
    }

    pub fn max_archive_pages() -> usize {
        500
    }

    pub fn excerpt_length() -> usize {
        160
    }
}

// ============================================================================
// [search] Section Defaults
// ============================================================================

pub mod search {
    use std::path::PathBuf;

    pub fn max_content_length() -> usize {
        5000
    }

    pub fn max_headings() -> usize {
        10
    }

    pub fn output() -> PathBuf {
        "search-index.json".into()
    }
}

// ============================================================================
// [feed] Section Defaults
// ============================================================================

pub mod feed {
    use std::path::PathBuf;

    pub fn limit() -> usize {
        20
    }

    pub fn rss_path() -> PathBuf {
        "feed.xml".into()
    }

    pub fn atom_path() -> PathBuf {
        "atom.xml".into()
    }
}
