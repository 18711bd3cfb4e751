//! Site configuration management for `stitch.toml`.
//!
//! The file is optional: without it the defaults describe the usual layout
//!
//! ```text
//! src/pages/**/*.html        → dist/**/*.html
//! src/layouts/default.html   (layout)
//! src/partials/*.html        (header, footer, mobile-menu, ...)
//! ```
//!
//! # Sections
//!
//! | Section   | Purpose                                        |
//! |-----------|------------------------------------------------|
//! | `[build]` | Paths, declared partials, minify, clean        |
//! | `[watch]` | Debounce window for `stitch watch`             |
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "public"
//! minify = true
//!
//! [[build.partials]]
//! name = "header"
//!
//! [watch]
//! debounce_ms = 500
//! ```

mod build;
pub mod defaults;
mod error;

pub use build::PartialSpec;

use build::BuildConfig;
use error::ConfigError;

use crate::cli::Cli;
use anyhow::{Result, bail};
use educe::Educe;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing stitch.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading, may not exist)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Watch mode settings
    #[serde(default)]
    pub watch: WatchConfig,
}

/// `[watch]` section in stitch.toml.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    /// Quiet period after the last file event before rebuilding.
    #[serde(default = "defaults::watch::debounce_ms")]
    #[educe(Default = defaults::watch::debounce_ms())]
    pub debounce_ms: u64,
}

impl SiteConfig {
    /// Parse configuration from TOML string; `path` is only used for errors.
    pub fn from_str(content: &str, path: &Path) -> Result<Self> {
        let config = toml::from_str(content)
            .map_err(|err| ConfigError::Toml(path.to_path_buf(), err))?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content, path)
    }

    /// Load `stitch.toml` under the CLI root if present, defaults otherwise,
    /// then apply CLI overrides and validate.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments and resolve every path
    /// against the root.
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.source, cli.source.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        let args = cli.build_args();
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
        self.build.clean |= args.clean;

        let root = Self::normalize_path(&root);
        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.update_path_with_root(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Make every configured path absolute under `root`.
    fn update_path_with_root(&mut self, root: &Path) {
        self.set_root(root);

        let build = &mut self.build;
        build.source = Self::normalize_path(&root.join(&build.source));
        build.output = Self::normalize_path(&root.join(&build.output));
        build.layout = Self::normalize_path(&root.join(&build.layout));
        build.partials_dir = Self::normalize_path(&root.join(&build.partials_dir));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Reject configurations that cannot produce a sane build.
    pub fn validate(&self) -> Result<()> {
        let build = &self.build;

        // Writing into the tree being walked would compose our own output.
        if build.output.starts_with(&build.source) {
            bail!(ConfigError::Validation(format!(
                "[build.output] `{}` must not be inside [build.source] `{}`",
                build.output.display(),
                build.source.display()
            )));
        }

        if build.source.starts_with(&build.output) {
            bail!(ConfigError::Validation(
                "[build.source] must not be inside [build.output]; `clean` would delete it".into()
            ));
        }

        let mut seen = FxHashSet::default();
        for partial in &build.partials {
            let name = partial.name.as_str();
            if name.is_empty() || name.contains(|c: char| c.is_whitespace() || "{}/\\".contains(c))
            {
                bail!(ConfigError::Validation(format!(
                    "[build.partials] invalid partial name `{name}`"
                )));
            }
            if !seen.insert(name) {
                bail!(ConfigError::Validation(format!(
                    "[build.partials] `{name}` declared twice"
                )));
            }
        }

        if self.watch.debounce_ms == 0 {
            bail!(ConfigError::Validation(
                "[watch.debounce_ms] must be greater than zero".into()
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
