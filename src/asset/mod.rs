//! Asset classification, per-file processing and discovery.

pub mod encode;
pub mod fingerprint;
mod kind;
pub mod minify;
mod process;
mod scan;

// Types
pub use kind::Mime;
pub use process::Processor;

// Scanning (pure functions)
pub use scan::{ScanOptions, scan_assets};
