//! `[build]` section configuration.
//!
//! Contains build paths and the content scan limits.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Main BuildConfig
// ============================================================================

/// `[build]` section in quire.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"      # Source directory
/// output = "public"        # Output directory
/// extension = "md"         # Content file extension
///
/// [build.scan]
/// exclude_paths = ["drafts/**", "**/_*.md"]
/// max_file_size = "2MB"
/// concurrency_limit = 16
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content source directory (markdown files).
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Content file extension, without the leading dot.
    #[serde(default = "defaults::build::extension")]
    #[educe(Default = defaults::build::extension())]
    pub extension: String,

    /// File backing the post ID counter across builds.
    #[serde(default = "defaults::build::post_id_store")]
    #[educe(Default = defaults::build::post_id_store())]
    pub post_id_store: PathBuf,

    /// Directory scan limits.
    #[serde(default)]
    pub scan: ScanConfig,
}

// ============================================================================
// Sub-configurations
// ============================================================================

/// `[build.scan]` section - shared by the blog scanner and the search indexer.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Recurse into subdirectories.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub scan_subfolders: bool,

    /// Glob patterns (`**`, `*`) matched against content-relative paths.
    #[serde(default)]
    pub exclude_paths: Vec<String>,

    /// Files larger than this are skipped (e.g.: "512KB", "10MB").
    #[serde(default = "defaults::build::scan::max_file_size")]
    #[educe(Default = defaults::build::scan::max_file_size())]
    pub max_file_size: String,

    /// Maximum number of files read concurrently.
    #[serde(default = "defaults::build::scan::concurrency_limit")]
    #[educe(Default = defaults::build::scan::concurrency_limit())]
    pub concurrency_limit: usize,
}
