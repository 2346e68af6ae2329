//! quire - content discovery and indexing for markdown blogs.
//!
//! Scans a content tree, turns dated markdown files into posts with stable
//! IDs, aggregates category / tag / author archives, paginates listings,
//! and writes RSS / Atom feeds, a JSON search index and a page manifest for
//! an external template layer.

pub mod blog;
pub mod build;
pub mod cli;
pub mod config;
pub mod content;
pub mod generator;
pub mod logger;
pub mod plugin;
pub mod search;
pub mod utils;
