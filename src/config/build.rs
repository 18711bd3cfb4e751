//! `[build]` section configuration.
//!
//! Where pages, the layout and the partials live, and what happens to the
//! composed output.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in stitch.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// source = "src/pages"
/// output = "dist"
/// layout = "src/layouts/default.html"
/// partials_dir = "src/partials"
/// minify = true
///
/// [[build.partials]]
/// name = "banner"
/// required = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Source page tree; every `.html` file below it is composed.
    #[serde(default = "defaults::build::source")]
    #[educe(Default = defaults::build::source())]
    pub source: PathBuf,

    /// Output tree mirroring `source`.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// The single layout every page is composed into.
    #[serde(default = "defaults::build::layout")]
    #[educe(Default = defaults::build::layout())]
    pub layout: PathBuf,

    /// Directory holding `<name>.html` partial fragments.
    #[serde(default = "defaults::build::partials_dir")]
    #[educe(Default = defaults::build::partials_dir())]
    pub partials_dir: PathBuf,

    /// Declared partials. Undeclared `*.html` files in `partials_dir` are
    /// picked up as optional partials as well.
    #[serde(default = "defaults::build::partials")]
    #[educe(Default = defaults::build::partials())]
    pub partials: Vec<PartialSpec>,

    /// Minify composed HTML before writing.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,

    /// Remove the output directory before building.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,
}

/// One `[[build.partials]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialSpec {
    /// Name used in `{{> name}}`; also the file stem under `partials_dir`.
    pub name: String,

    /// A missing required partial aborts the build; a missing optional one
    /// renders as the empty string.
    #[serde(default = "defaults::build::required")]
    pub required: bool,
}

impl PartialSpec {
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            required: true,
        }
    }

    pub fn optional(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            required: false,
        }
    }

    /// File name of this partial inside `partials_dir`.
    pub fn file_name(&self) -> String {
        format!("{}.html", self.name)
    }
}
