use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

use crate::utils::path::normalize_path;

/// What happened to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

/// Pending changes, one entry per path.
pub type Changes = FxHashMap<PathBuf, ChangeKind>;

/// Pure debouncer: only handles timing and event deduplication.
///
/// Every accepted event restarts the quiet period, so a burst of saves
/// yields one rebuild once the burst is over.
pub struct Debouncer {
    pub(super) changes: Changes,
    pub(super) last_event: Option<Instant>,
    debounce: Duration,
    /// Generated artifact; writing it must not trigger another cycle.
    ignore: Option<PathBuf>,
}

impl Debouncer {
    pub fn new(debounce: Duration) -> Self {
        Self {
            changes: FxHashMap::default(),
            last_event: None,
            debounce,
            ignore: None,
        }
    }

    pub fn ignoring(mut self, path: impl Into<PathBuf>) -> Self {
        self.ignore = Some(path.into());
        self
    }

    /// Add a notify event, applying dedup rules:
    /// - Remove + Create/Modify → Create/Modify (file was restored)
    /// - Modify + Remove → Remove (file was deleted)
    /// - Create + Remove → dropped (never existed for the build)
    /// - otherwise: first event wins
    pub fn add_event(&mut self, event: &notify::Event) {
        use notify::EventKind;

        let kind = match event.kind {
            EventKind::Create(_) => ChangeKind::Created,
            EventKind::Remove(_) => ChangeKind::Removed,
            EventKind::Modify(modify) => {
                // mtime/atime/chmod noise
                if matches!(modify, notify::event::ModifyKind::Metadata(_)) {
                    return;
                }
                ChangeKind::Modified
            }
            _ => return,
        };

        for path in &event.paths {
            if is_temp_file(path) {
                continue;
            }

            let path = normalize_path(path);
            if self.ignore.as_ref() == Some(&path) {
                continue;
            }

            match self.changes.get(&path).copied() {
                None => {
                    crate::debug!("watch"; "event {}: {}", kind.label(), path.display());
                    self.changes.insert(path, kind);
                }
                Some(ChangeKind::Removed) if kind != ChangeKind::Removed => {
                    self.changes.insert(path, kind);
                }
                Some(ChangeKind::Modified) if kind == ChangeKind::Removed => {
                    self.changes.insert(path, ChangeKind::Removed);
                }
                Some(ChangeKind::Created) if kind == ChangeKind::Removed => {
                    self.changes.remove(&path);
                }
                Some(_) => {}
            }
            self.last_event = Some(Instant::now());
        }
    }

    /// Take the pending changes once the quiet period has elapsed.
    pub fn take_if_ready(&mut self) -> Option<Changes> {
        if !self.is_ready() {
            return None;
        }
        self.take_pending()
    }

    /// Take the pending changes regardless of timing.
    pub fn take_pending(&mut self) -> Option<Changes> {
        self.last_event = None;
        let changes = std::mem::take(&mut self.changes);
        (!changes.is_empty()).then_some(changes)
    }

    pub fn is_ready(&self) -> bool {
        let Some(last_event) = self.last_event else {
            return false;
        };
        last_event.elapsed() >= self.debounce && !self.changes.is_empty()
    }

    /// Precise sleep duration until the quiet period ends.
    pub fn sleep_duration(&self) -> Duration {
        let Some(last_event) = self.last_event else {
            return Duration::from_secs(86400);
        };

        self.debounce
            .saturating_sub(last_event.elapsed())
            .max(Duration::from_millis(1))
    }
}

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with(".#")
        || name.starts_with(".tmp")
}
