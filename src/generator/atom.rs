//! Atom 1.0 feed generation.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <feed xmlns="http://www.w3.org/2005/Atom" xml:lang="en">
//!   <title>My Blog</title>
//!   <link href="https://example.com/blog/"/>
//!   <entry>
//!     <title>Hello</title>
//!     <link href="https://example.com/blog/hello/"/>
//!     <updated>2025-01-15T00:00:00Z</updated>
//!   </entry>
//! </feed>
//! ```

use super::{Feed, FeedItem, escape_xml};
use crate::{config::SiteConfig, utils::date::to_rfc3339};
use chrono::Utc;

/// XML namespace for Atom
const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// Render `feed` as Atom 1.0 XML.
pub fn build_atom(config: &SiteConfig, feed: &Feed) -> String {
    let updated = feed
        .updated()
        .unwrap_or_else(|| Utc::now().naive_utc());

    let mut xml = String::with_capacity(4096);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<feed xmlns="{ATOM_NS}" xml:lang="{}">"#,
        escape_xml(&feed.language)
    ));
    xml.push('\n');

    xml.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.base.title)));
    if !config.base.description.is_empty() {
        xml.push_str(&format!(
            "  <subtitle>{}</subtitle>\n",
            escape_xml(&config.base.description)
        ));
    }
    xml.push_str(&format!("  <link href=\"{}\"/>\n", escape_xml(&feed.link)));
    xml.push_str(&format!("  <id>{}</id>\n", escape_xml(&feed.link)));
    xml.push_str(&format!("  <updated>{}</updated>\n", to_rfc3339(updated)));
    if !config.base.author.is_empty() {
        xml.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.base.author)
        ));
    }
    xml.push_str("  <generator>quire</generator>\n");

    for item in &feed.items {
        push_entry(&mut xml, item);
    }

    xml.push_str("</feed>\n");
    xml
}

fn push_entry(xml: &mut String, item: &FeedItem) {
    let link = escape_xml(&item.link);
    let date = to_rfc3339(item.date);

    xml.push_str("  <entry>\n");
    xml.push_str(&format!("    <title>{}</title>\n", escape_xml(&item.title)));
    xml.push_str(&format!("    <link href=\"{link}\"/>\n"));
    xml.push_str(&format!("    <id>{link}</id>\n"));
    xml.push_str(&format!("    <published>{date}</published>\n"));
    xml.push_str(&format!("    <updated>{date}</updated>\n"));
    if let Some(author) = &item.author {
        xml.push_str(&format!(
            "    <author><name>{}</name></author>\n",
            escape_xml(author)
        ));
    }
    for category in &item.categories {
        xml.push_str(&format!("    <category term=\"{}\"/>\n", escape_xml(category)));
    }
    if !item.summary.is_empty() {
        xml.push_str(&format!("    <summary>{}</summary>\n", escape_xml(&item.summary)));
    }
    xml.push_str("  </entry>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blog::post::tests::post;
    use crate::generator::tests::{collection, config};

    #[test]
    fn test_build_atom() {
        let config = config();
        let mut first = post("hello.md", "2025-01-15", 0);
        first.title = "Fish & Chips".into();
        first.author = Some("Alice".into());
        let posts = collection(&config, vec![first, post("old.md", "2024-06-01", 0)]);
        let feed = Feed::for_language(&config, &posts, "en");

        let xml = build_atom(&config, &feed);

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"<feed xmlns="http://www.w3.org/2005/Atom" xml:lang="en">"#));
        assert!(xml.contains("<title>Notes &amp; Things</title>"));
        assert!(xml.contains("<updated>2025-01-15T00:00:00Z</updated>"));
        assert!(xml.contains("<title>Fish &amp; Chips</title>"));
        assert!(xml.contains(r#"<link href="https://example.com/blog/hello/"/>"#));
        assert!(xml.contains("<author><name>Alice</name></author>"));
        assert_eq!(xml.matches("<entry>").count(), 2);
        assert!(xml.ends_with("</feed>\n"));
    }

    #[test]
    fn test_build_atom_empty() {
        let config = config();
        let feed = Feed::for_language(&config, &collection(&config, Vec::new()), "en");
        let xml = build_atom(&config, &feed);
        assert!(!xml.contains("<entry>"));
        assert!(xml.contains("<updated>"));
    }
}
