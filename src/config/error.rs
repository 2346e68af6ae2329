//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid exclude pattern `{0}`")]
    Pattern(String, #[source] glob::PatternError),

    #[error("Config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("quire.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("quire.toml"));

        let validation_err = ConfigError::Validation("posts_per_page must be > 0".to_string());
        let display = format!("{validation_err}");
        assert!(display.contains("posts_per_page"));
    }

    #[test]
    fn test_pattern_error_display() {
        let source = glob::Pattern::new("[").unwrap_err();
        let err = ConfigError::Pattern("[".into(), source);
        assert!(format!("{err}").contains("`[`"));
    }
}
