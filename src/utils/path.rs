//! Path normalization utilities.
//!
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `resolve_path` - relative paths against a base directory, with `~`
//! - `to_slash` - asset keys (`images/logo.png` on every platform)

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a configured path against `base`, expanding a leading `~`.
///
/// Always returns an absolute path.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let expanded = PathBuf::from(shellexpand::tilde(&raw).as_ref());

    if expanded.is_absolute() {
        normalize_path(&expanded)
    } else {
        normalize_path(&base.join(expanded))
    }
}

/// Join the normal components of a relative path with `/`.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_to_slash() {
        assert_eq!(to_slash(Path::new("images/logo.png")), "images/logo.png");
        assert_eq!(to_slash(Path::new("./styles/app.css")), "styles/app.css");
        assert_eq!(
            to_slash(&Path::new("a").join("b").join("c.js")),
            "a/b/c.js"
        );
    }

    #[test]
    fn test_resolve_path_relative() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("assets")).unwrap();

        let resolved = resolve_path(Path::new("assets"), dir.path());
        assert!(resolved.is_absolute());
        assert_eq!(resolved, normalize_path(&dir.path().join("assets")));
    }

    #[test]
    fn test_resolve_path_absolute() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_path(dir.path(), Path::new("/elsewhere"));
        assert_eq!(resolved, normalize_path(dir.path()));
    }
}
