//! RSS 2.0 feed generation.

use super::{Feed, FeedItem};
use crate::{config::SiteConfig, utils::date::to_rfc2822};
use anyhow::{Result, anyhow};
use regex::Regex;
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::sync::LazyLock;

/// Render `feed` as validated RSS 2.0 XML.
pub fn build_rss(config: &SiteConfig, feed: &Feed) -> Result<String> {
    let items: Vec<_> = feed.items.iter().map(|item| to_rss_item(item, config)).collect();

    let mut channel = ChannelBuilder::default()
        .title(&config.base.title)
        .link(&feed.link)
        .description(&config.base.description)
        .language(feed.language.clone())
        .generator("quire".to_string())
        .items(items)
        .build();
    if !config.base.copyright.is_empty() {
        channel.set_copyright(config.base.copyright.clone());
    }
    if let Some(updated) = feed.updated() {
        channel.set_last_build_date(to_rfc2822(updated));
    }

    channel
        .validate()
        .map_err(|e| anyhow!("rss validation failed: {e}"))?;
    Ok(channel.to_string())
}

fn to_rss_item(item: &FeedItem, config: &SiteConfig) -> rss::Item {
    let categories = item
        .categories
        .iter()
        .map(|name| CategoryBuilder::default().name(name.clone()).build())
        .collect::<Vec<_>>();

    ItemBuilder::default()
        .title(item.title.clone())
        .link(item.link.clone())
        .guid(GuidBuilder::default().permalink(true).value(item.link.clone()).build())
        .description((!item.summary.is_empty()).then(|| item.summary.clone()))
        .pub_date(to_rfc2822(item.date))
        .author(normalize_rss_author(item.author.as_deref(), config))
        .categories(categories)
        .build()
}

/// Normalize author field to rss format: "email@example.com (Name)"
///
/// Priority:
/// 1. Post author if already in valid format
/// 2. Site author if in valid format
/// 3. Site email combined with the post or site author name
///
/// `None` when no email can be found.
fn normalize_rss_author(author: Option<&str>, config: &SiteConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$").unwrap()
    });

    if let Some(author) = author.filter(|a| RE_VALID_AUTHOR.is_match(a)) {
        return Some(author.to_owned());
    }

    let site_author = &config.base.author;
    if RE_VALID_AUTHOR.is_match(site_author) {
        return Some(site_author.clone());
    }

    if config.base.email.is_empty() {
        return None;
    }
    let name = author.unwrap_or(site_author);
    Some(format!("{} ({name})", config.base.email))
}
