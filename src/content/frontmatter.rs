//! YAML frontmatter parsing.
//!
//! A document may start with a YAML block fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Hello
//! tags: [rust, blog]
//! ---
//! # Body starts here
//! ```
//!
//! The closing fence may also be `...`. Values are kept as JSON values so
//! they can be handed to templates verbatim.

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Parsed frontmatter: key → JSON value
pub type Frontmatter = BTreeMap<String, Value>;

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("invalid YAML frontmatter")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("frontmatter must be a key/value mapping")]
    NotAMapping,

    #[error("frontmatter block is never closed")]
    Unterminated,
}

/// A raw file split into metadata and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub frontmatter: Frontmatter,
    pub body: String,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a raw document. Files without a leading `---` fence have an empty
/// frontmatter and the whole text as body.
pub fn parse(raw: &str) -> Result<ParsedDocument, FrontmatterError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some((yaml, body)) = split(raw)? else {
        return Ok(ParsedDocument {
            frontmatter: Frontmatter::new(),
            body: raw.to_owned(),
        });
    };

    Ok(ParsedDocument {
        frontmatter: parse_yaml(yaml)?,
        body: body.trim_start_matches(['\r', '\n']).to_owned(),
    })
}

/// Split into `(yaml, body)`, or `None` when there is no frontmatter fence.
fn split(raw: &str) -> Result<Option<(&str, &str)>, FrontmatterError> {
    let Some(rest) = raw.strip_prefix("---") else {
        return Ok(None);
    };

    let mut lines = rest.split_inclusive('\n');
    // Remainder of the opening fence line must be blank ("----" is not a fence)
    let Some(first) = lines.next() else {
        return Ok(None);
    };
    if !first.trim().is_empty() || !first.ends_with('\n') {
        return Ok(None);
    }

    let mut offset = first.len();
    for line in lines {
        if matches!(line.trim_end(), "---" | "...") {
            let yaml = &rest[first.len()..offset];
            let body = &rest[offset + line.len()..];
            return Ok(Some((yaml, body)));
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unterminated)
}

fn parse_yaml(yaml: &str) -> Result<Frontmatter, FrontmatterError> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::new());
    }

    match serde_yaml_ng::from_str::<Value>(yaml)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        Value::Null => Ok(Frontmatter::new()),
        _ => Err(FrontmatterError::NotAMapping),
    }
}

// ============================================================================
// Field Accessors
// ============================================================================

/// Non-empty trimmed string field.
pub fn get_str<'a>(fm: &'a Frontmatter, key: &str) -> Option<&'a str> {
    fm.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// String-like field: strings as-is, numbers and booleans stringified.
pub fn get_string(fm: &Frontmatter, key: &str) -> Option<String> {
    match fm.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn get_bool(fm: &Frontmatter, key: &str) -> Option<bool> {
    fm.get(key).and_then(Value::as_bool)
}

/// `status: draft` or `draft: true`.
pub fn is_draft(fm: &Frontmatter) -> bool {
    get_str(fm, "status").is_some_and(|s| s.eq_ignore_ascii_case("draft"))
        || get_bool(fm, "draft") == Some(true)
}

/// Non-negative integer field, also accepting numeric strings.
pub fn get_u64(fm: &Frontmatter, key: &str) -> Option<u64> {
    match fm.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// List field: a sequence of scalars, or a single comma-separated string.
///
/// Empty entries are dropped; order is preserved.
pub fn get_list(fm: &Frontmatter, key: &str) -> Vec<String> {
    let scalar = |v: &Value| match v {
        Value::String(s) => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    };

    let items: Vec<String> = match fm.get(key) {
        Some(Value::Array(arr)) => arr.iter().filter_map(scalar).collect(),
        Some(Value::String(s)) => s.split(',').map(|s| s.trim().to_owned()).collect(),
        Some(v) => scalar(v).into_iter().collect(),
        None => Vec::new(),
    };

    items.into_iter().filter(|s| !s.is_empty()).collect()
}

// ============================================================================
// Tests
// ============================================================================
