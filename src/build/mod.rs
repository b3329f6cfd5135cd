//! Build orchestration.
//!
//! One cycle:
//! - **Scan** - Discover files under the asset root, in processing order
//! - **Process** - Run each file through the pipeline, growing the tables
//! - **Render** - Serialize both tables into the artifact
//! - **Write** - Atomically replace the previous artifact
//!
//! Cycles share no state: the tables are created empty on every call and
//! any error leaves the previous artifact in place.

mod artifact;

pub use artifact::{Artifact, write_atomic};

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::asset::{Processor, ScanOptions, scan_assets};
use crate::config::Config;
use crate::core::BuildMode;
use crate::error::{BuildError, Result};
use crate::palette::Palette;
use crate::utils::plural_count;

/// Outcome of a successful cycle.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Processed source files.
    pub files: usize,
    /// Distinct fingerprints in the asset table.
    pub unique: usize,
    pub output: PathBuf,
    pub elapsed: Duration,
}

impl BuildReport {
    pub fn summary(&self) -> String {
        format!(
            "processed {} ({} unique) in {:?}",
            plural_count(self.files, "asset"),
            self.unique,
            self.elapsed
        )
    }
}

/// Runs build cycles against a fixed configuration.
pub struct Builder<'a> {
    config: &'a Config,
    palette: &'a Palette,
    mode: BuildMode,
}

impl<'a> Builder<'a> {
    pub fn new(config: &'a Config, palette: &'a Palette, mode: BuildMode) -> Self {
        Self {
            config,
            palette,
            mode,
        }
    }

    /// Run one full cycle and write the artifact.
    pub fn build(&self) -> Result<BuildReport> {
        let start = Instant::now();
        let output = &self.config.build.output;

        let artifact = self.collect()?;
        let bytes = artifact
            .render(self.config.build.format)
            .map_err(|e| BuildError::io(output, e))?;
        write_atomic(output, &bytes).map_err(|e| BuildError::io(output, e))?;

        Ok(BuildReport {
            files: artifact.paths.len(),
            unique: artifact.assets.len(),
            output: output.clone(),
            elapsed: start.elapsed(),
        })
    }

    /// Scan and process every asset into fresh tables.
    pub fn collect(&self) -> Result<Artifact> {
        let build = &self.config.build;

        let files = scan_assets(&ScanOptions {
            root: &build.root,
            ignore_prefix: &build.ignore_prefix,
            images_dir: &build.images_dir,
            service_worker: &build.service_worker,
            exclude: Some(build.output.as_path()),
        })?;
        crate::debug!("build"; "found {}", plural_count(files.len(), "file"));

        let processor = Processor {
            root: &build.root,
            palette: self.palette,
            public_prefix: &build.public_prefix,
            mode: self.mode,
        };

        let mut artifact = Artifact::default();
        for source in files {
            let path = build.root.join(&source);
            let raw = fs::read(&path).map_err(|e| BuildError::io(path, e))?;

            let asset = processor.process(&source, raw, &artifact.paths)?;
            let (fingerprint, public_path, payload) = asset.into_entry();

            artifact.paths.insert(source, public_path);
            artifact.assets.insert(fingerprint, payload);
        }

        Ok(artifact)
    }
}
