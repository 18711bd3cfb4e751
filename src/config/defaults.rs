//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization, and by
//! `educe` so that `SiteConfig::default()` matches an empty `stitch.toml`.

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use crate::config::PartialSpec;
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn source() -> PathBuf {
        "src/pages".into()
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }

    pub fn layout() -> PathBuf {
        "src/layouts/default.html".into()
    }

    pub fn partials_dir() -> PathBuf {
        "src/partials".into()
    }

    /// `header` and `footer` must exist; `mobile-menu` may be absent.
    pub fn partials() -> Vec<PartialSpec> {
        vec![
            PartialSpec::required("header"),
            PartialSpec::required("footer"),
            PartialSpec::optional("mobile-menu"),
        ]
    }

    pub fn required() -> bool {
        true
    }
}

// ============================================================================
// [watch] Section Defaults
// ============================================================================

pub mod watch {
    pub fn debounce_ms() -> u64 {
        300
    }
}
