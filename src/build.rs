//! Site building orchestration.
//!
//! ```text
//! build_site()
//!     │
//!     ├── Templates::load()  layout + partials, fatal on failure
//!     ├── prepare_output()   clean (optional) + create output root
//!     └── traverse()         compose and write every page
//! ```
//!
//! Everything is reloaded on each call, so watch mode picks up layout and
//! partial edits without restarting.

use crate::{
    compiler::{BuildReport, traverse},
    config::SiteConfig,
    log,
    template::Templates,
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Build the entire site.
///
/// Returns the traversal report; pages skipped for missing front matter are
/// listed there and do not fail the build.
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let build = &config.build;
    let root = config.get_root();

    log!("build"; "source: {}", display_rel(&build.source, root));
    log!("build"; "output: {}", display_rel(&build.output, root));

    // output is only touched once the templates are known to load
    let templates = Templates::load(&build.layout, &build.partials_dir, &build.partials)?;
    log!("build"; "loaded layout and {} partials", templates.partials().len());

    prepare_output(&build.output, build.clean)?;

    let report = traverse(&build.source, &build.output, &templates, build.minify)?;
    log_build_result(&report);

    Ok(report)
}

/// Create the output root, removing it first when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

fn log_build_result(report: &BuildReport) {
    for page in &report.skipped {
        log!("warn"; "skipped {} ({})", page.source.display(), page.reason);
    }
    match (report.written.len(), report.skipped.len()) {
        (0, 0) => log!("warn"; "no .html pages found, output is empty"),
        (written, 0) => log!("build"; "done, {written} pages written"),
        (written, skipped) => {
            log!("build"; "done, {written} pages written, {skipped} skipped")
        }
    }
}

/// Path relative to the project root for log display.
fn display_rel(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use tempfile::TempDir;

    const LAYOUT: &str = "<html><head><title>{{title}}</title></head><body>{{> header}}{{{body}}}{{> mobile-menu}}{{> footer}}</body></html>";

    /// A project tree shaped like the default config expects.
    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/pages/services")).unwrap();
        fs::create_dir_all(root.join("src/layouts")).unwrap();
        fs::create_dir_all(root.join("src/partials")).unwrap();

        fs::write(root.join("src/layouts/default.html"), LAYOUT).unwrap();
        fs::write(root.join("src/partials/header.html"), "<header/>").unwrap();
        fs::write(root.join("src/partials/footer.html"), "<footer>{{year}}</footer>").unwrap();
        fs::write(
            root.join("src/pages/about.html"),
            "---\ntitle: About Us\nyear: 2025\n---\n<p>Hello</p>\n",
        )
        .unwrap();
        fs::write(
            root.join("src/pages/services/therapy.html"),
            "---\ntitle: Therapy\n---\n<p>Physical therapy</p>\n",
        )
        .unwrap();
        dir
    }

    fn config(dir: &TempDir, extra: &[&str]) -> SiteConfig {
        let root = dir.path().to_str().unwrap();
        let args = ["stitch", "--root", root].into_iter().chain(extra.iter().copied());
        SiteConfig::load(&Cli::try_parse_from(args).unwrap()).unwrap()
    }

    #[test]
    fn test_build_site_end_to_end() {
        let dir = project();
        let report = build_site(&config(&dir, &[])).unwrap();

        assert_eq!(report.written.len(), 2);
        assert_eq!(
            fs::read_to_string(dir.path().join("dist/about.html")).unwrap(),
            "<html><head><title>About Us</title></head><body><header/><p>Hello</p><footer>{{year}}</footer></body></html>"
        );
        assert!(dir.path().join("dist/services/therapy.html").is_file());
    }

    #[test]
    fn test_build_site_skipped_page_is_not_fatal() {
        let dir = project();
        fs::write(dir.path().join("src/pages/broken.html"), "<p>oops</p>").unwrap();

        let report = build_site(&config(&dir, &[])).unwrap();

        assert_eq!(report.written.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert!(!dir.path().join("dist/broken.html").exists());
    }

    #[test]
    fn test_build_site_missing_layout_is_fatal() {
        let dir = project();
        fs::remove_file(dir.path().join("src/layouts/default.html")).unwrap();

        let err = build_site(&config(&dir, &[])).unwrap_err();

        assert!(err.to_string().contains("layout"));
        assert!(!dir.path().join("dist/about.html").exists());
    }

    #[test]
    fn test_build_site_missing_required_partial_is_fatal() {
        let dir = project();
        fs::remove_file(dir.path().join("src/partials/header.html")).unwrap();

        let err = build_site(&config(&dir, &[])).unwrap_err();
        assert!(err.to_string().contains("header"));
    }

    #[test]
    fn test_build_site_clean_removes_stale_output() {
        let dir = project();
        fs::create_dir_all(dir.path().join("dist/old")).unwrap();
        fs::write(dir.path().join("dist/old/page.html"), "stale").unwrap();

        build_site(&config(&dir, &["build"])).unwrap();
        assert!(dir.path().join("dist/old/page.html").exists());

        build_site(&config(&dir, &["build", "--clean"])).unwrap();
        assert!(!dir.path().join("dist/old").exists());
        assert!(dir.path().join("dist/about.html").exists());
    }

    #[test]
    fn test_build_site_clean_keeps_output_when_layout_missing() {
        let dir = project();
        build_site(&config(&dir, &[])).unwrap();
        fs::write(dir.path().join("dist/index.html"), "previous").unwrap();
        fs::remove_file(dir.path().join("src/layouts/default.html")).unwrap();

        assert!(build_site(&config(&dir, &["build", "--clean"])).is_err());

        assert_eq!(
            fs::read_to_string(dir.path().join("dist/index.html")).unwrap(),
            "previous"
        );
        assert!(dir.path().join("dist/about.html").exists());
    }

    #[test]
    fn test_build_site_minify_flag() {
        let dir = project();
        fs::write(
            dir.path().join("src/pages/about.html"),
            "---\ntitle: About Us\n---\n<div>\n    <p>Hello</p>\n</div>\n",
        )
        .unwrap();

        build_site(&config(&dir, &["build", "--minify"])).unwrap();

        let html = fs::read_to_string(dir.path().join("dist/about.html")).unwrap();
        assert!(!html.contains("\n    "));
        assert!(html.contains("<p>Hello</p>"));
    }

    #[test]
    fn test_build_site_empty_source() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/pages")).unwrap();
        fs::create_dir_all(root.join("src/layouts")).unwrap();
        fs::create_dir_all(root.join("src/partials")).unwrap();
        fs::write(root.join("src/layouts/default.html"), "{{{body}}}").unwrap();
        fs::write(root.join("src/partials/header.html"), "").unwrap();
        fs::write(root.join("src/partials/footer.html"), "").unwrap();

        let report = build_site(&config(&dir, &[])).unwrap();

        assert!(report.written.is_empty());
        assert!(root.join("dist").is_dir());
    }

    #[test]
    fn test_display_rel() {
        let root = Path::new("/site");
        assert_eq!(display_rel(Path::new("/site/src/pages"), root), "src/pages");
        assert_eq!(display_rel(Path::new("/elsewhere/dist"), root), "/elsewhere/dist");
    }
}
