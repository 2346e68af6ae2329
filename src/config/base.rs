//! `[base]` section configuration.
//!
//! Contains basic site information like title, author, locales, etc.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in quire.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "My Blog"
/// description = "A personal blog about Rust"
/// author = "Alice"
/// url = "https://myblog.com"
/// language = "en"
/// languages = ["en", "fr"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title, used as the feed title.
    pub title: String,

    /// Author name for feeds.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Author email for feeds.
    #[serde(default = "defaults::base::email")]
    #[educe(Default = defaults::base::email())]
    pub email: String,

    /// Site description, used as the feed subtitle.
    pub description: String,

    /// Base URL for absolute links in feeds.
    /// Feeds are skipped while it is unset.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// Default locale. Used when neither frontmatter nor path names a language.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Available language codes. Empty means a single-language site.
    #[serde(default)]
    pub languages: Vec<String>,

    /// Copyright notice for feeds.
    #[serde(default)]
    pub copyright: String,
}

impl BaseConfig {
    /// Resolved language list: the configured list, or just the default locale.
    pub fn available_languages(&self) -> Vec<String> {
        if self.languages.is_empty() {
            vec![self.language.clone()]
        } else {
            self.languages.clone()
        }
    }

    /// Whether content is split into one subdirectory per language.
    pub fn is_multilingual(&self) -> bool {
        self.languages.len() > 1
    }

    /// Base URL without trailing slash, empty if unset.
    pub fn base_url(&self) -> &str {
        self.url.as_deref().unwrap_or_default().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_base_config_full() {
        let config = r#"
            [base]
            title = "Notebook"
            description = "Notes on things"
            url = "https://notes.example.com"
            language = "fr"
            languages = ["fr", "en"]
            copyright = "2025 Someone"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "Notebook");
        assert_eq!(config.base.url.as_deref(), Some("https://notes.example.com"));
        assert_eq!(config.base.language, "fr");
        assert_eq!(config.base.languages, vec!["fr", "en"]);
        assert!(config.base.is_multilingual());
    }

    #[test]
    fn test_base_config_defaults() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.author, "<YOUR_NAME>");
        assert_eq!(config.base.email, "user@noreply.quire");
        assert_eq!(config.base.language, "en");
        assert_eq!(config.base.url, None);
        assert_eq!(config.base.available_languages(), vec!["en"]);
        assert!(!config.base.is_multilingual());
    }

    #[test]
    fn test_single_configured_language_is_not_multilingual() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"
            languages = ["de"]
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert!(!config.base.is_multilingual());
        assert_eq!(config.base.available_languages(), vec!["de"]);
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"
            url = "https://example.com/"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert_eq!(config.base.base_url(), "https://example.com");
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"
            unknown_field = "should_fail"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }
}
