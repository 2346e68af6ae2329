//! Shared helpers for slugs, dates, markdown and plain text.

pub mod date;
pub mod markdown;
pub mod slug;
pub mod text;
