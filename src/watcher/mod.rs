//! Watching the input file for edits made by other programs.
//!
//! The watcher only reports that something changed. Rereading the file and
//! waiting for the writes to settle is left to the edit session, which already
//! debounces every input change.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

const TARGET: &str = "lazyview::watcher";

/// Watches a single file through its parent directory.
///
/// Editors often save by writing a new file and renaming it over the old
/// one, so the directory is watched and events are filtered by name.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    target_path: PathBuf,
    target_name: Option<OsString>,
}

impl FileWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    /// Returns an error if the platform watcher cannot be created or the
    /// parent directory cannot be watched.
    pub fn new(path: impl AsRef<Path>) -> notify::Result<Self> {
        // Event paths arrive canonical, so compare against canonical paths.
        let target_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let target_name = target_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&target_path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;
        tracing::debug!(
            target: TARGET,
            path = %target_path.display(),
            root = %watch_root.display(),
            "watching"
        );

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            target_path,
            target_name,
        })
    }

    /// Drain pending events. Returns true if any of them touched the file.
    pub fn take_changed(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.is_relevant(&ev) => changed = true,
                Ok(ev) => {
                    tracing::trace!(target: TARGET, kind = ?ev.kind, paths = ?ev.paths, "ignored event");
                }
                Err(err) => tracing::warn!(target: TARGET, %err, "watch error"),
            }
        }
        if changed {
            tracing::debug!(target: TARGET, path = %self.target_path.display(), "file changed");
        }
        changed
    }

    fn is_relevant(&self, event: &Event) -> bool {
        if matches!(event.kind, EventKind::Access(_)) {
            return false;
        }
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.target_path
                || self
                    .target_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use notify::event::{AccessKind, EventAttributes};
    use tempfile::tempdir;

    fn event(kind: EventKind, path: PathBuf) -> Event {
        Event {
            kind,
            paths: vec![path],
            attrs: EventAttributes::new(),
        }
    }

    #[test]
    fn test_directory_event_counts_for_the_file() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("doc.ljson");
        std::fs::write(&path, "null").expect("write");
        let watcher = FileWatcher::new(&path).expect("watcher");

        assert!(watcher.is_relevant(&event(EventKind::Any, canonical_dir)));
    }

    #[test]
    fn test_sibling_files_are_ignored() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("doc.ljson");
        std::fs::write(&path, "null").expect("write");
        let watcher = FileWatcher::new(&path).expect("watcher");

        assert!(!watcher.is_relevant(&event(EventKind::Any, canonical_dir.join("other.txt"))));
        assert!(!watcher.is_relevant(&event(
            EventKind::Access(AccessKind::Any),
            path.clone()
        )));
        assert!(watcher.is_relevant(&event(EventKind::Any, path)));
    }

    #[test]
    fn test_watch_root_for_relative_file_is_dot() {
        assert_eq!(watch_root_for(Path::new("doc.ljson")), PathBuf::from("."));
    }

    #[test]
    fn test_real_file_modification_detected() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("watched.ljson");
        std::fs::write(&path, "[1]").expect("write");

        let mut watcher = FileWatcher::new(&path).expect("watcher");
        // Some backends need a moment before the watch is live.
        std::thread::sleep(Duration::from_millis(500));
        std::fs::write(&path, "[1, 2]").expect("write");

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut detected = false;
        while Instant::now() < deadline {
            if watcher.take_changed() {
                detected = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        assert!(detected, "watcher should report the write within 5 seconds");
    }
}
