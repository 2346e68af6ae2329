//! Logging utilities with colored output.
//!
//! This module provides the `log!` macro for formatted terminal output with
//! colored `[module]` prefixes. Four levels are supported:
//!
//! ```ignore
//! log!("blog"; "found {} posts", count);            // info
//! log!(debug "scan"; "excluded {}", path);          // only with --verbose
//! log!(warn "blog"; "skipping {}: no title", path);
//! log!(error "scan"; "failed to read {}: {}", path, err);
//! ```
//!
//! Info and debug lines go to stdout, warnings and errors to stderr.

use crate::utils::text::truncate_bytes;
use colored::{ColoredString, Colorize};
use crossterm::terminal::size;
use std::{
    io::{Write, stderr, stdout},
    sync::{
        OnceLock,
        atomic::{AtomicBool, Ordering},
    },
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Whether debug lines are printed
static VERBOSE: AtomicBool = AtomicBool::new(false);

// ============================================================================
// Layout Constants
// ============================================================================
//
// Line format: "[module] message"
//               ^------^ ^-----^
//               prefix   message

/// Length of brackets around module name: "[]"
const BRACKET_LEN: usize = 2;
/// Space after prefix: "[module] " <- this space
const SPACE_AFTER_PREFIX: usize = 1;

/// Calculate total prefix length for a module name.
///
/// Returns: `module.len() + 3` (for `[`, `]`, and trailing space)
#[inline]
const fn calc_prefix_len(module_len: usize) -> usize {
    module_len + BRACKET_LEN + SPACE_AFTER_PREFIX
}

/// Get terminal width, cached after first call.
/// Falls back to 120 columns if detection fails.
fn get_terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

// ============================================================================
// Levels
// ============================================================================

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

/// Enable or disable debug output.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

/// Whether a line at `level` would be printed.
#[inline]
pub fn enabled(level: Level) -> bool {
    level != Level::Debug || VERBOSE.load(Ordering::Relaxed)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// log!(warn "module"; "something was skipped");
/// ```
#[macro_export]
macro_rules! log {
    (debug $module:expr; $($arg:tt)*) => {{
        if $crate::logger::enabled($crate::logger::Level::Debug) {
            $crate::logger::log_at($crate::logger::Level::Debug, $module, &format!($($arg)*))
        }
    }};
    (warn $module:expr; $($arg:tt)*) => {{
        $crate::logger::log_at($crate::logger::Level::Warn, $module, &format!($($arg)*))
    }};
    (error $module:expr; $($arg:tt)*) => {{
        $crate::logger::log_at($crate::logger::Level::Error, $module, &format!($($arg)*))
    }};
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log_at($crate::logger::Level::Info, $module, &format!($($arg)*))
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message at the given level.
///
/// Single-line messages are truncated to fit terminal width.
pub fn log_at(level: Level, module: &str, message: &str) {
    if !enabled(level) {
        return;
    }

    let prefix = colorize_prefix(level, module);
    let width = get_terminal_width() as usize;

    let message = if message.contains('\n') {
        message
    } else {
        let max_msg_len = width.saturating_sub(calc_prefix_len(module.len()));
        truncate_bytes(message, max_msg_len)
    };

    let line = match level {
        Level::Debug => format!("{prefix} {}", message.dimmed()),
        _ => format!("{prefix} {message}"),
    };

    match level {
        Level::Warn | Level::Error => {
            let mut out = stderr().lock();
            writeln!(out, "{line}").ok();
            out.flush().ok();
        }
        Level::Debug | Level::Info => {
            let mut out = stdout().lock();
            writeln!(out, "{line}").ok();
            out.flush().ok();
        }
    }
}

/// Apply color to a module prefix based on level.
#[inline]
fn colorize_prefix(level: Level, module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match level {
        Level::Debug => prefix.dimmed(),
        Level::Info => prefix.bright_green().bold(),
        Level::Warn => prefix.bright_yellow().bold(),
        Level::Error => prefix.bright_red().bold(),
    }
}

// ============================================================================
// Tests
// ============================================================================
