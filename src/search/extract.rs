//! Plain text, headings and metadata for search entries.

use crate::{
    content::{
        Document,
        frontmatter::{get_list, get_str},
    },
    utils::{
        slug::file_slug,
        text::{collapse_whitespace, truncate_chars},
    },
};
use regex::Regex;
use std::sync::LazyLock;

/// Fallback description length, in characters.
const DESCRIPTION_CHARS: usize = 160;

static RE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h[1-6][^>]*>(.*?)</h[1-6]>").unwrap());
static RE_BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(p|h[1-6]|li|ul|ol|dl|dt|dd|pre|blockquote|table|thead|tbody|tr|td|th|div|br|hr)\b[^>]*>")
        .unwrap()
});
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static RE_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").unwrap());

/// Strip tags and decode character references.
///
/// Block tags become word breaks; inline tags vanish.
pub fn strip_html(html: &str) -> String {
    let text = RE_BLOCK_TAG.replace_all(html, " ");
    let text = RE_TAG.replace_all(&text, "");
    let text = decode_entities(&text);
    collapse_whitespace(&text)
}

/// Decode numeric references and common named entities in one pass.
///
/// Unknown names are left as written.
fn decode_entities(text: &str) -> String {
    RE_ENTITY
        .replace_all(text, |cap: &regex::Captures<'_>| {
            let name = &cap[1];
            let decoded = match name.strip_prefix('#') {
                Some(num) => match num.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => num.parse().ok(),
                }
                .and_then(char::from_u32),
                None => named_entity(name),
            };
            decoded.map_or_else(|| cap[0].to_owned(), String::from)
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "deg" => '\u{b0}',
        "middot" => '\u{b7}',
        "times" => '\u{d7}',
        "euro" => '\u{20ac}',
        _ => return None,
    })
}

/// Text of the first `max` headings, in document order.
pub fn headings(html: &str, max: usize) -> Vec<String> {
    RE_HEADING
        .captures_iter(html)
        .map(|cap| strip_html(&cap[1]))
        .filter(|h| !h.is_empty())
        .take(max)
        .collect()
}

/// Entry id: the extensionless relative path as a slug.
pub fn entry_id(doc: &Document, extension: &str) -> String {
    file_slug(&doc.path, extension)
}

/// `/{stem}/`, with a trailing `index` collapsed into its directory.
pub fn entry_url(doc: &Document, extension: &str) -> String {
    let stem = doc.stem_path(extension);
    let stem = if stem == "index" {
        ""
    } else {
        stem.strip_suffix("/index").unwrap_or(stem)
    };

    if stem.is_empty() {
        "/".to_owned()
    } else {
        format!("/{stem}/")
    }
}

/// `description`, then `excerpt`, then the start of the content.
pub fn description(doc: &Document, content: &str) -> String {
    get_str(&doc.frontmatter, "description")
        .or_else(|| get_str(&doc.frontmatter, "excerpt"))
        .map(str::to_owned)
        .unwrap_or_else(|| truncate_chars(content, DESCRIPTION_CHARS).trim_end().to_owned())
}

/// `keywords` followed by `tags`, duplicates removed.
pub fn keywords(doc: &Document) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for word in get_list(&doc.frontmatter, "keywords")
        .into_iter()
        .chain(get_list(&doc.frontmatter, "tags"))
    {
        if !out.contains(&word) {
            out.push(word);
        }
    }
    out
}
