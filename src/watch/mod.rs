//! Watch loop for development mode.
//!
//! ```text
//! notify callback ──► std channel ──► bridge thread ──► tokio channel
//!                                                            │
//!                                     Debouncer ◄────────────┘
//!                                         │ quiet period over
//!                                         ▼
//!                                      rebuild
//! ```
//!
//! The watcher is created before the initial build so edits made during that
//! build are buffered instead of lost. Rebuilds run on the loop task itself:
//! events arriving meanwhile wait in the channel and open a new debounce
//! window once the cycle is done.

mod debouncer;

pub use debouncer::{Changes, Debouncer};

use std::path::Path;
use std::sync::mpsc as std_mpsc;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::build::BuildReport;
use crate::error::{BuildError, Result};
use crate::logger::{status_error, status_success};
use crate::utils::plural_count;

/// Capacity of the async side of the event bridge.
const EVENT_BUFFER: usize = 64;

/// Recursive watcher on the asset root.
pub struct AssetWatcher {
    notify_rx: std_mpsc::Receiver<notify::Result<notify::Event>>,
    /// Must be kept alive for events to flow
    _watcher: RecommendedWatcher,
}

impl AssetWatcher {
    /// Start watching immediately; events buffer until [`run`](Self::run).
    pub fn new(root: &Path) -> notify::Result<Self> {
        let (notify_tx, notify_rx) = std_mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;
        watcher.watch(root, RecursiveMode::Recursive)?;

        Ok(Self {
            notify_rx,
            _watcher: watcher,
        })
    }

    /// Feed events into [`run_loop`] until the process is terminated.
    pub async fn run<F>(self, debouncer: Debouncer, rebuild: F)
    where
        F: FnMut(&Changes) -> Result<BuildReport>,
    {
        let Self {
            notify_rx,
            _watcher,
        } = self;

        let (async_tx, async_rx) = mpsc::channel::<notify::Event>(EVENT_BUFFER);

        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        run_loop(async_rx, debouncer, rebuild).await;
    }
}

/// Debounce events and rebuild after each quiet period.
///
/// Returns when the event source closes, after flushing pending changes.
pub async fn run_loop<F>(
    mut events: mpsc::Receiver<notify::Event>,
    mut debouncer: Debouncer,
    mut rebuild: F,
) where
    F: FnMut(&Changes) -> Result<BuildReport>,
{
    loop {
        tokio::select! {
            biased;
            event = events.recv() => match event {
                Some(event) => debouncer.add_event(&event),
                None => {
                    if let Some(changes) = debouncer.take_pending() {
                        run_cycle(&changes, &mut rebuild);
                    }
                    break;
                }
            },
            _ = tokio::time::sleep(debouncer.sleep_duration()) => {
                if crate::core::is_shutdown() {
                    break;
                }
                if let Some(changes) = debouncer.take_if_ready() {
                    run_cycle(&changes, &mut rebuild);
                }
            }
        }
    }
}

/// Run one rebuild and report it; failures never end the loop.
fn run_cycle<F>(changes: &Changes, rebuild: &mut F)
where
    F: FnMut(&Changes) -> Result<BuildReport>,
{
    for (path, kind) in changes {
        crate::debug!("watch"; "{}: {}", kind.label(), path.display());
    }
    crate::debug!("watch"; "rebuilding after {}", plural_count(changes.len(), "change"));

    report(rebuild(changes));
}

/// Show the outcome of a cycle on the watch status line.
pub fn report(result: Result<BuildReport>) {
    match result {
        Ok(report) => status_success(&report.summary()),
        Err(e) => status_error("build failed", &error_detail(e)),
    }
}

/// Error message followed by its causes.
fn error_detail(err: BuildError) -> String {
    format!("{:#}", anyhow::Error::from(err))
}
