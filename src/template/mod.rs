//! Layout and partial loading, page composition.
//!
//! A build loads one [`Templates`] bundle up front and composes every page
//! against it:
//!
//! ```text
//! load_layout() ─┐
//!                ├─► Templates ──► compose(page) ──► html
//! load_partials()┘
//! ```
//!
//! The bundle is immutable once loaded, so every page of a run sees the
//! same layout and partials.

mod compose;
pub mod front_matter;

pub use compose::{BODY_MARKER, Composed};

use crate::{config::PartialSpec, log};
use regex::Regex;
use rustc_hash::FxHashMap;
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use thiserror::Error;

/// `{{> name}}`, whitespace allowed around the name.
static PARTIAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{>\s*([^{}\s]+)\s*\}\}").expect("partial pattern is valid")
});

/// Failures that make a whole build impossible.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("cannot read layout `{0}`")]
    Layout(PathBuf, #[source] io::Error),

    #[error("cannot read partial `{name}` from `{path}`")]
    Partial {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot list partials directory `{0}`")]
    PartialsDir(PathBuf, #[source] io::Error),
}

/// Partial name → fragment text.
pub type Partials = FxHashMap<String, String>;

/// The layout and partials shared by every page of one build.
#[derive(Debug, Clone)]
pub struct Templates {
    layout: String,
    partials: Partials,
}

impl Templates {
    pub fn new(layout: impl Into<String>, partials: Partials) -> Self {
        Self {
            layout: layout.into(),
            partials,
        }
    }

    /// Load the layout and every partial for a build.
    pub fn load(
        layout: &Path,
        partials_dir: &Path,
        specs: &[PartialSpec],
    ) -> Result<Self, TemplateError> {
        let layout = load_layout(layout)?;
        let partials = load_partials(partials_dir, specs)?;
        Ok(Self::new(layout, partials))
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn partials(&self) -> &Partials {
        &self.partials
    }
}

/// Read the layout template.
pub fn load_layout(path: &Path) -> Result<String, TemplateError> {
    let layout =
        fs::read_to_string(path).map_err(|err| TemplateError::Layout(path.to_path_buf(), err))?;

    if !layout.contains(BODY_MARKER) {
        log!("warn"; "layout {} has no {BODY_MARKER} marker, page bodies will be dropped", path.display());
    }

    Ok(layout)
}

/// Read the declared partials, then any other `*.html` file in `dir`.
///
/// A declared optional partial that does not exist loads as `""`. Partials
/// are expanded in a single pass, so a `{{> name}}` inside a partial stays
/// literal; such partials are reported once here.
pub fn load_partials(dir: &Path, specs: &[PartialSpec]) -> Result<Partials, TemplateError> {
    let mut partials = Partials::default();

    for spec in specs {
        let path = dir.join(spec.file_name());
        let content = if spec.required || path.exists() {
            read_partial(&spec.name, &path)?
        } else {
            log!("partial"; "{} not found, using empty", spec.name);
            String::new()
        };
        partials.insert(spec.name.clone(), content);
    }

    for (name, path) in undeclared_partials(dir, &partials)? {
        let content = read_partial(&name, &path)?;
        partials.insert(name, content);
    }

    for (name, content) in &partials {
        if let Some(nested) = PARTIAL_RE.captures(content) {
            log!("warn"; "partial {name} references {{{{> {}}}}}, which will not be expanded", &nested[1]);
        }
    }

    Ok(partials)
}

fn read_partial(name: &str, path: &Path) -> Result<String, TemplateError> {
    fs::read_to_string(path).map_err(|source| TemplateError::Partial {
        name: name.to_owned(),
        path: path.to_path_buf(),
        source,
    })
}

/// `*.html` files in `dir` not already in `known`, sorted by name.
fn undeclared_partials(dir: &Path, known: &Partials) -> Result<Vec<(String, PathBuf)>, TemplateError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|err| TemplateError::PartialsDir(dir.to_path_buf(), err))?;

    let paths = entries
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| TemplateError::PartialsDir(dir.to_path_buf(), err))?;

    let mut found: Vec<_> = paths
        .into_iter()
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "html"))
        .filter_map(|path| {
            let name = path.file_stem()?.to_str()?.to_owned();
            (!known.contains_key(&name)).then_some((name, path))
        })
        .collect();
    found.sort();

    Ok(found)
}
