//! Colored console output.
//!
//! Every line the build prints goes through the `log!` macro:
//!
//! ```ignore
//! log!("content"; "processing {}", path.display());
//! log!("warn"; "no front matter in {}, skipping", path.display());
//! ```
//!
//! renders as `[content] processing src/pages/about.html`, with the bracketed
//! module colored by kind and the message cut to the terminal width.

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stdout},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Width assumed when stdout is not a terminal.
const FALLBACK_WIDTH: u16 = 120;

/// `[` + `]` + trailing space around the module name.
const PREFIX_OVERHEAD: usize = 3;

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

fn terminal_width() -> usize {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(FALLBACK_WIDTH)) as usize
}

/// Write one `[module] message` line to stdout.
///
/// Single-line messages are truncated to the terminal width; multiline
/// messages (error chains, mostly) are printed in full.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();

    let message = if message.contains('\n') {
        message
    } else {
        let max_len = terminal_width().saturating_sub(module.len() + PREFIX_OVERHEAD);
        truncate_str(message, max_len)
    };

    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        "watch" => prefix.bright_green().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Cut `s` to at most `max_len` bytes on a char boundary.
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_fits() {
        assert_eq!(truncate_str("dist/about.html", 40), "dist/about.html");
        assert_eq!(truncate_str("", 10), "");
    }

    #[test]
    fn test_truncate_str_cuts_ascii() {
        assert_eq!(truncate_str("written to dist/about.html", 10), "written to");
        assert_eq!(truncate_str("about", 0), "");
    }

    #[test]
    fn test_truncate_str_respects_char_boundary() {
        // "é" is two bytes; cutting inside it falls back to the previous boundary
        assert_eq!(truncate_str("café", 4), "caf");
        assert_eq!(truncate_str("café", 5), "café");
    }

    #[test]
    fn test_colorize_prefix_wraps_module_name() {
        colored::control::set_override(false);
        assert_eq!(colorize_prefix("content").to_string(), "[content]");
        assert_eq!(colorize_prefix("WARN").to_string(), "[WARN]");
        colored::control::unset_override();
    }
}
