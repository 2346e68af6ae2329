//! Content discovery shared by the blog and the search index.
//!
//! - **frontmatter**: split a file into YAML metadata and body
//! - **classify**: language detection, path helpers, exclusion globs
//! - **scanner**: bounded-concurrency directory scan producing [`Document`]s

pub mod classify;
pub mod document;
pub mod frontmatter;
pub mod scanner;

pub use document::Document;
pub use frontmatter::Frontmatter;
pub use scanner::{ScanPolicy, Scanner};
