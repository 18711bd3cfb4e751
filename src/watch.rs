//! File system watcher for live rebuilds.
//!
//! Watches the page tree, the layout, the partials directory and the config
//! file. Any relevant change triggers a full rebuild once events have been
//! quiet for `[watch] debounce_ms`; a full build reloads the layout and
//! partials, so there is no incremental path to keep consistent.
//!
//! ```text
//! notify events ──► Debouncer ──► build_site()
//! ```
//!
//! A failed rebuild is logged and watching continues.

use crate::{build::build_site, config::SiteConfig, log};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{RecvTimeoutError, channel},
    time::{Duration, Instant},
};

/// How long to block on the event channel when nothing is pending.
const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events until they have been quiet for `window`.
struct Debouncer {
    window: Duration,
    /// Events under this directory come from our own writes.
    output: PathBuf,
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
}

impl Debouncer {
    fn new(window: Duration, output: &Path) -> Self {
        Self {
            window,
            output: output.to_path_buf(),
            pending: FxHashSet::default(),
            last_event: None,
        }
    }

    /// Queue the event's paths. Any accepted path restarts the quiet window,
    /// including one that is already pending.
    fn add(&mut self, event: Event) {
        let mut accepted = false;
        for path in event.paths {
            if is_temp_file(&path) || path.starts_with(&self.output) {
                continue;
            }
            accepted = true;
            self.pending.insert(path);
        }
        if accepted {
            self.last_event = Some(Instant::now());
        }
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty() && self.last_event.is_some_and(|t| t.elapsed() >= self.window)
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        let mut paths: Vec<_> = self.pending.drain().collect();
        paths.sort();
        paths
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            IDLE_TIMEOUT
        } else {
            self.window
        }
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

/// Paths to watch and whether to recurse into them.
fn watch_targets(config: &SiteConfig) -> Vec<(&Path, RecursiveMode)> {
    let build = &config.build;
    [
        (build.source.as_path(), RecursiveMode::Recursive),
        (build.layout.as_path(), RecursiveMode::NonRecursive),
        (build.partials_dir.as_path(), RecursiveMode::Recursive),
        (config.config_path.as_path(), RecursiveMode::NonRecursive),
    ]
    .into_iter()
    .filter(|(path, _)| path.exists())
    .collect()
}

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let root = config.get_root();
    for (path, mode) in watch_targets(config) {
        watcher
            .watch(path, mode)
            .with_context(|| format!("Failed to watch {}", path.display()))?;
        log!("watch"; "{}", path.strip_prefix(root).unwrap_or(path).display());
    }
    Ok(())
}

/// Rebuild after a batch of changes. The config file itself is only read
/// at startup, so edits to it are reported rather than applied.
fn handle_changes(paths: &[PathBuf], config: &SiteConfig) {
    let root = config.get_root();
    let rel = |p: &Path| p.strip_prefix(root).unwrap_or(p).display().to_string();

    if paths.contains(&config.config_path) {
        log!("watch"; "{} changed, restart to apply it", rel(&config.config_path));
    }

    let changed: Vec<_> = paths.iter().map(|p| rel(p)).collect();
    log!("watch"; "{} changed, rebuilding...", changed.join(", "));

    if let Err(e) = build_site(config) {
        log!("watch"; "build failed");
        log!("error"; "{e:#}");
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live rebuild.
///
/// Runs until the event channel closes (the process is normally ended with
/// Ctrl-C).
pub fn watch_for_changes_blocking(config: &SiteConfig) -> Result<()> {
    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, config)?;

    let window = Duration::from_millis(config.watch.debounce_ms);
    let mut debouncer = Debouncer::new(window, &config.build.output);

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) => debouncer.add(event),
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                handle_changes(&debouncer.take(), config);
            }
            Err(RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}
