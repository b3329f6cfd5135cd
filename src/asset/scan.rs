//! Asset discovery and processing order (pure, no side effects).

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::Path;

use jwalk::WalkDir;

use crate::error::{BuildError, Result};
use crate::utils::path::to_slash;

/// What to pick up under the asset root.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions<'a> {
    pub root: &'a Path,
    /// Base-name prefix of private files (partials, inline-only SVGs).
    pub ignore_prefix: &'a str,
    /// Subtree processed before everything else.
    pub images_dir: &'a str,
    /// File name suffix processed after everything else.
    pub service_worker: &'a str,
    /// Generated artifact, skipped when it lives inside the root.
    pub exclude: Option<&'a Path>,
}

/// Discover and order every asset under the root.
///
/// ```text
/// assets/
/// ├── images/logo.png       -> 1. images first
/// ├── images/_draft.png     -> (ignored)
/// ├── _icon.svg             -> (ignored, inline-only)
/// ├── app.css               -> 2. lexicographic
/// ├── app.js                -> 3.
/// └── service-worker.js     -> 4. service worker last
/// ```
pub fn scan_assets(opts: &ScanOptions<'_>) -> Result<Vec<String>> {
    let mut files = discover(opts)?;
    sort_for_processing(&mut files, opts.images_dir, opts.service_worker);
    Ok(files)
}

/// Collect relative, `/`-separated paths of all files under the root.
///
/// Hidden files and symlinked files are included (an unsupported one fails
/// the build later); walk errors and dangling links are fatal.
fn discover(opts: &ScanOptions<'_>) -> Result<Vec<String>> {
    if !opts.root.is_dir() {
        let err = io::Error::new(io::ErrorKind::NotFound, "asset root is not a directory");
        return Err(BuildError::io(opts.root, err));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(opts.root).skip_hidden(false) {
        let entry =
            entry.map_err(|e| BuildError::io(opts.root, io::Error::other(e.to_string())))?;

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if name.starts_with(opts.ignore_prefix) {
            continue;
        }

        let path = entry.path();
        // Links are reported with their own type; follow them like a read would.
        if file_type.is_symlink() {
            let target = fs::metadata(&path).map_err(|e| BuildError::io(&path, e))?;
            if !target.is_file() {
                continue;
            }
        }
        if opts.exclude.is_some_and(|exclude| exclude == path.as_path()) {
            continue;
        }

        let rel = path.strip_prefix(opts.root).unwrap_or(path.as_path());
        files.push(to_slash(rel));
    }

    Ok(files)
}

/// Order files so referenced assets come before their referrers.
///
/// Three tiers, ties broken lexicographically:
/// 1. files under `images_dir/` (referenced from stylesheets and scripts)
/// 2. everything else
/// 3. the service worker (lists the final paths of everything else)
pub fn sort_for_processing(files: &mut [String], images_dir: &str, service_worker: &str) {
    let image_prefix = format!("{}/", images_dir.trim_end_matches('/'));
    files.sort_by(|a, b| compare(a, b, &image_prefix, service_worker));
}

fn compare(a: &str, b: &str, image_prefix: &str, service_worker: &str) -> Ordering {
    let key = |path: &str| {
        (
            !path.starts_with(image_prefix),
            path.ends_with(service_worker),
        )
    };
    key(a).cmp(&key(b)).then_with(|| a.cmp(b))
}
