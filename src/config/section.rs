//! `[build]` and `[watch]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! root = "assets"                     # Asset root directory
//! output = "assets.rs"                # Generated artifact
//! format = "rust"                     # rust | json
//! public_prefix = "/assets/"          # Prefix of every public path
//! ignore_prefix = "_"                 # Private files (partials, inline SVGs)
//! images_dir = "images"               # Processed first
//! service_worker = "service-worker.js"  # Processed last
//!
//! [watch]
//! debounce_ms = 100                   # Quiet period before a rebuild
//! ```

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Syntax of the generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// Rust module with `PATHS` and `ASSETS` statics.
    #[default]
    Rust,
    /// JSON document with base64 payloads.
    Json,
}

/// Build settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Asset root directory.
    pub root: PathBuf,

    /// Generated artifact path.
    pub output: PathBuf,

    /// Artifact syntax.
    pub format: ArtifactFormat,

    /// Prefix joined with the fingerprint to form a public path.
    pub public_prefix: String,

    /// Files whose base name starts with this are not emitted standalone.
    pub ignore_prefix: String,

    /// Subtree processed before all other files.
    pub images_dir: String,

    /// File name suffix of the service worker, processed last.
    pub service_worker: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            output: PathBuf::from("assets.rs"),
            format: ArtifactFormat::Rust,
            public_prefix: "/assets/".into(),
            ignore_prefix: "_".into(),
            images_dir: "images".into(),
            service_worker: "service-worker.js".into(),
        }
    }
}

/// Watch loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// A rebuild starts once no event arrived for this long.
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 100 }
    }
}
