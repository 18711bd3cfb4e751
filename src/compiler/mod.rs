//! Walking the source tree and writing composed pages.
//!
//! ```text
//! traverse(src/pages, dist)
//!     │
//!     ├── directory  ──► create mirrored output directory
//!     ├── *.html     ──► pages::process_page() ──► written | skipped
//!     └── other      ──► ignored
//! ```
//!
//! The walk is depth-first and sorted by file name, so output order and log
//! lines are stable between runs.

pub mod pages;

use crate::template::Templates;
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

pub use pages::{PageOutcome, process_page};

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// A page that was not written, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPage {
    pub source: PathBuf,
    pub reason: String,
}

/// What one traversal produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Output files written, in traversal order.
    pub written: Vec<PathBuf>,
    /// Source pages skipped with a warning.
    pub skipped: Vec<SkippedPage>,
}

/// Compose every `.html` file under `source` into the same relative path
/// under `output`.
///
/// Any I/O error aborts the traversal; pages written before it stay on disk.
pub fn traverse(
    source: &Path,
    output: &Path,
    templates: &Templates,
    minify: bool,
) -> Result<BuildReport> {
    let mut report = BuildReport::default();

    let walker = WalkDir::new(source)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !IGNORED_FILES.contains(&e.file_name().to_str().unwrap_or_default()));

    for entry in walker {
        let entry =
            entry.with_context(|| format!("Failed to walk source tree {}", source.display()))?;
        let rel = entry.path().strip_prefix(source)?;
        let target = output.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory {}", target.display()))?;
        } else if is_html(entry.path()) {
            let outcome = process_page(entry.path(), &target, rel, templates, minify)?;
            match outcome {
                PageOutcome::Written => report.written.push(target),
                PageOutcome::Skipped(reason) => report.skipped.push(SkippedPage {
                    source: entry.into_path(),
                    reason,
                }),
            }
        }
    }

    Ok(report)
}

/// Source pages are files ending in `.html` (case-sensitive).
fn is_html(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "html")
}
