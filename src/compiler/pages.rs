use crate::log;
use crate::template::{Composed, Templates};
use crate::utils::minify::minify;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// What happened to one source page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Written,
    /// Not written; the reason has already been logged.
    Skipped(String),
}

/// Compose the page at `source` and write it to `target`.
///
/// `rel` is the page path relative to the source root, used for log lines.
/// A page without front matter is skipped with a warning; read and write
/// failures are returned as errors.
pub fn process_page(
    source: &Path,
    target: &Path,
    rel: &Path,
    templates: &Templates,
    minify_html: bool,
) -> Result<PageOutcome> {
    log!("content"; "processing {}", rel.display());

    let text = fs::read_to_string(source)
        .with_context(|| format!("Failed to read page {}", source.display()))?;

    let html = match templates.compose(&text) {
        Composed::Page(html) => html,
        Composed::Skipped(reason) => {
            log!("warn"; "{}: {reason}, skipping", rel.display());
            return Ok(PageOutcome::Skipped(reason));
        }
    };

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let bytes = minify(html.as_bytes(), minify_html);
    fs::write(target, &*bytes)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    log!("content"; "written {} ({})", target.display(), format_size(bytes.len()));

    Ok(PageOutcome::Written)
}

/// `1536` → `1.5 KB`
fn format_size(bytes: usize) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
