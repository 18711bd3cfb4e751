//! Front-matter splitting and parsing.
//!
//! A source page looks like:
//!
//! ```text
//! ---
//! title: About Us
//! description: Who we are
//! ---
//! <p>Hello</p>
//! ```
//!
//! Values are single-line strings. Only the first `:` on a line separates
//! key from value, so `url: https://example.com` keeps the scheme.

use regex::Regex;
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// Opening `---` line, the header up to the next `---` line, then the body.
///
/// The header group is optional so an empty block (`---\n---\n`) still parses.
static FRONT_MATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\A---[ \t\r]*\n(?s:(.*?)\n)??---[ \t\r]*(?:\n(?s:(.*))|\z)")
        .expect("front matter pattern is valid")
});

/// Key/value header of a source page.
pub type FrontMatter = FxHashMap<String, String>;

/// A source page split into its header and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub front_matter: FrontMatter,
    /// Everything after the closing delimiter, untrimmed.
    pub body: &'a str,
}

/// Split `source` into front matter and body.
///
/// Returns `None` when the text does not start with a delimited block.
pub fn split(source: &str) -> Option<Page<'_>> {
    let caps = FRONT_MATTER_RE.captures(source)?;
    let header = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    Some(Page {
        front_matter: parse(header),
        body,
    })
}

/// Parse `key: value` lines. Lines without a colon, or with nothing before
/// it, are ignored; a repeated key keeps its last value.
pub fn parse(header: &str) -> FrontMatter {
    header
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            (!key.is_empty()).then(|| (key.to_owned(), value.trim().to_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic_page() {
        let page = split("---\ntitle: About Us\n---\n<p>Hello</p>\n").unwrap();
        assert_eq!(page.front_matter["title"], "About Us");
        assert_eq!(page.body, "<p>Hello</p>\n");
    }

    #[test]
    fn test_split_without_delimiters() {
        assert!(split("<p>No header here</p>").is_none());
        assert!(split("").is_none());
    }

    #[test]
    fn test_split_requires_leading_delimiter() {
        // a block that starts anywhere but the first line does not count
        assert!(split("\n---\ntitle: x\n---\nbody").is_none());
        assert!(split("<!-- -->\n---\ntitle: x\n---\nbody").is_none());
    }

    #[test]
    fn test_split_unclosed_block() {
        assert!(split("---\ntitle: x\n<p>body</p>").is_none());
    }

    #[test]
    fn test_split_empty_block() {
        let page = split("---\n---\n<p>body</p>").unwrap();
        assert!(page.front_matter.is_empty());
        assert_eq!(page.body, "<p>body</p>");
    }

    #[test]
    fn test_split_closing_delimiter_at_end_of_file() {
        let page = split("---\ntitle: x\n---").unwrap();
        assert_eq!(page.front_matter["title"], "x");
        assert_eq!(page.body, "");
    }

    #[test]
    fn test_split_crlf_line_endings() {
        let page = split("---\r\ntitle: Home\r\n---\r\n<p>hi</p>\r\n").unwrap();
        assert_eq!(page.front_matter["title"], "Home");
        assert_eq!(page.body.trim(), "<p>hi</p>");
    }

    #[test]
    fn test_split_stops_at_first_closing_delimiter() {
        let page = split("---\na: 1\n---\n<hr>\n---\nnot: header\n").unwrap();
        assert_eq!(page.front_matter.len(), 1);
        assert_eq!(page.body, "<hr>\n---\nnot: header\n");
    }

    #[test]
    fn test_parse_splits_on_first_colon() {
        let fm = parse("url: https://example.com:8080/x");
        assert_eq!(fm["url"], "https://example.com:8080/x");
    }

    #[test]
    fn test_parse_trims_both_sides() {
        let fm = parse("   title   :    Spine & Nerve Center   ");
        assert_eq!(fm["title"], "Spine & Nerve Center");
    }

    #[test]
    fn test_parse_ignores_lines_without_key() {
        let fm = parse("just text\n: orphan value\n\nlayout: default");
        assert_eq!(fm.len(), 1);
        assert_eq!(fm["layout"], "default");
    }

    #[test]
    fn test_parse_empty_value() {
        let fm = parse("description:");
        assert_eq!(fm["description"], "");
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let fm = parse("title: First\ntitle: Second");
        assert_eq!(fm["title"], "Second");
    }
}
