//! Process-level shutdown state.

use std::sync::atomic::{AtomicBool, Ordering};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Setup the global Ctrl+C handler. Call once at program start.
///
/// A build cycle is never interrupted halfway: the artifact is replaced
/// atomically, so exiting from the handler leaves either the old or the new
/// artifact on disk.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);
        crate::log!("watch"; "shutting down...");
        std::process::exit(0);
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}
