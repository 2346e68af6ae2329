//! Site configuration management for `quire.toml`.
//!
//! # Sections
//!
//! | Section        | Purpose                                          |
//! |----------------|--------------------------------------------------|
//! | `[base]`       | Site metadata (title, author, url, locales)      |
//! | `[build]`      | Paths, content extension, post ID store          |
//! | `[build.scan]` | Subfolders, exclusions, size and concurrency     |
//! | `[blog]`       | Pagination, taxonomy limits, archive ceiling     |
//! | `[search]`     | Search index limits and output                   |
//! | `[feed]`       | RSS / Atom toggles and paths                     |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Blog"
//! description = "A personal blog"
//! url = "https://example.com"
//! languages = ["en", "fr"]
//!
//! [build.scan]
//! exclude_paths = ["drafts/**"]
//!
//! [blog]
//! posts_per_page = 8
//! ```

mod base;
mod blog;
mod build;
pub mod defaults;
mod error;

pub use base::BaseConfig;
pub use blog::{BlogConfig, FeedConfig, SearchConfig};
pub use build::{BuildConfig, ScanConfig};
pub use error::ConfigError;

use crate::{
    cli::Cli,
    content::classify::ExcludeSet,
};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B (bytes), KB (kilobytes), MB (megabytes).
/// Case-insensitive for the suffix.
///
/// # Examples
/// ```ignore
/// parse_size_string("20KB") // → 20480
/// parse_size_string("5MB")  // → 5242880
/// parse_size_string("100")  // → 100 (defaults to bytes)
/// ```
fn parse_size_string(s: &str) -> u64 {
    let s = s.to_uppercase();
    let (multiplier, suffix_len) = if s.ends_with("MB") {
        (1024 * 1024, 2)
    } else if s.ends_with("KB") {
        (1024, 2)
    } else if s.ends_with('B') {
        (1, 1)
    } else {
        (1, 0)
    };
    let value: u64 = s[..s.len() - suffix_len].trim().parse().unwrap_or(0);
    value.saturating_mul(multiplier)
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing quire.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Blog settings
    #[serde(default)]
    pub blog: BlogConfig,

    /// Search index settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Feed settings
    #[serde(default)]
    pub feed: FeedConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Load from the CLI-selected file (defaults if absent), apply overrides, validate.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Content directory resolved against the root.
    pub fn content_dir(&self) -> PathBuf {
        self.get_root().join(&self.build.content)
    }

    /// Output directory resolved against the root.
    pub fn output_dir(&self) -> PathBuf {
        self.get_root().join(&self.build.output)
    }

    /// Post ID store resolved against the root.
    pub fn post_id_store(&self) -> PathBuf {
        self.get_root().join(&self.build.post_id_store)
    }

    /// Scan size threshold in bytes.
    pub fn max_file_size(&self) -> u64 {
        parse_size_string(&self.build.scan.max_file_size)
    }

    /// Compile the configured exclusion globs.
    pub fn exclude_set(&self) -> Result<ExcludeSet, ConfigError> {
        ExcludeSet::new(&self.build.scan.exclude_paths)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        if let Some(root) = &cli.root {
            self.set_root(root);
        }
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        self.build.scan.max_file_size = self.build.scan.max_file_size.to_uppercase();
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Validate configuration before any scanning happens.
    pub fn validate(&self) -> Result<()> {
        if self.build.extension.trim_start_matches('.').is_empty() {
            bail!(ConfigError::Validation(
                "[build.extension] must not be empty".into()
            ));
        }

        if self.build.scan.concurrency_limit == 0 {
            bail!(ConfigError::Validation(
                "[build.scan.concurrency_limit] must be greater than 0".into()
            ));
        }

        let valid_size_suffixes = ["B", "KB", "MB"];
        let size = self.build.scan.max_file_size.to_uppercase();
        if !valid_size_suffixes.iter().any(|s| size.ends_with(s)) || self.max_file_size() == 0 {
            bail!(ConfigError::Validation(
                "[build.scan.max_file_size] must be a positive size ending with B, KB, or MB".into()
            ));
        }

        if self.blog.posts_per_page == 0 {
            bail!(ConfigError::Validation(
                "[blog.posts_per_page] must be greater than 0".into()
            ));
        }

        if self.blog.enable && self.blog.path.trim_matches('/').is_empty() {
            bail!(ConfigError::Validation("[blog.path] must not be empty".into()));
        }

        if !self.base.languages.is_empty() && !self.base.languages.contains(&self.base.language) {
            bail!(ConfigError::Validation(format!(
                "[base.language] `{}` is not listed in [base.languages]",
                self.base.language
            )));
        }

        if let Some(url) = &self.base.url
            && !url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        self.exclude_set()?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
