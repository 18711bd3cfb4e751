//! Substitution of one page into the layout.
//!
//! Order of passes over the layout text:
//!
//! 1. `{{key}}` → front-matter value (all occurrences)
//! 2. first `{{{body}}}` → trimmed page body, verbatim
//! 3. `{{> name}}` → partial content (all occurrences)
//!
//! Each pass scans its input once. Text inserted by a pass is not rescanned
//! by that pass, so partials never expand partials and front-matter values
//! never expand other keys. Unknown tokens are left as they are.

use super::{PARTIAL_RE, Templates, front_matter};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Where the page body goes in the layout.
pub const BODY_MARKER: &str = "{{{body}}}";

/// `{{key}}`; the key is matched verbatim, no trimming.
static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("variable pattern is valid"));

/// Result of composing one source page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composed {
    /// The finished document.
    Page(String),
    /// The page has no front-matter block and must not be written.
    Skipped(String),
}

impl Templates {
    /// Compose `source` (front matter + body) into the layout.
    pub fn compose(&self, source: &str) -> Composed {
        let Some(page) = front_matter::split(source) else {
            return Composed::Skipped("no front matter block".into());
        };

        let layout = self.layout();
        let html = VARIABLE_RE.replace_all(layout, |caps: &Captures| {
            match page.front_matter.get(&caps[1]) {
                Some(value) if !is_body_marker(layout, caps) => value.clone(),
                _ => caps[0].to_owned(),
            }
        });

        let html = html.replacen(BODY_MARKER, page.body.trim(), 1);

        let html = PARTIAL_RE
            .replace_all(&html, |caps: &Captures| {
                self.partials()
                    .get(&caps[1])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_owned())
            })
            .into_owned();

        Composed::Page(html)
    }
}

/// Whether a `{{body}}` match is the inner part of `{{{body}}}`.
fn is_body_marker(layout: &str, caps: &Captures) -> bool {
    let Some(token) = caps.get(0) else {
        return false;
    };
    let start = token.start().saturating_sub(1);
    layout.get(start..token.end() + 1) == Some(BODY_MARKER)
}
