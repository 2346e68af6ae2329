//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// quire: markdown blog content pipeline
#[derive(Parser, Debug, Clone, Default)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: quire.toml)
    #[arg(short = 'C', long, default_value = "quire.toml")]
    pub config: PathBuf,

    /// Print debug messages (skipped files, exclusions)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, Default)]
pub enum Commands {
    /// Discover posts, build archives, write feeds, search index and page manifest
    #[default]
    Build,

    /// Discover posts and print what would be built, writing nothing
    Scan,

    /// Validate the configuration and exit
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_with_overrides() {
        let cli = Cli::parse_from(["quire", "--root", "site", "-v", "build"]);
        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.config, PathBuf::from("quire.toml"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Build));
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::parse_from(["quire", "-C", "other.toml", "check"]);
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(cli.command, Commands::Check));
    }
}
