//! Asset kinds, derived from the file extension.

use std::path::Path;

/// Supported asset types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mime {
    Css,
    JavaScript,
    Manifest,
    Svg,
    Png,
    Jpeg,
    Woff2,
}

impl Mime {
    /// Look up the mime type for a file extension.
    ///
    /// Returns `None` for anything outside the supported table; the caller
    /// treats that as a fatal build error.
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(path.extension()?.to_str()?)
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "css" => Some(Self::Css),
            "js" => Some(Self::JavaScript),
            "webmanifest" => Some(Self::Manifest),
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            "jpg" => Some(Self::Jpeg),
            "woff2" => Some(Self::Woff2),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Css => "text/css",
            Self::JavaScript => "application/javascript",
            Self::Manifest => "application/manifest+json",
            Self::Svg => "image/svg+xml",
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Woff2 => "font/woff2",
        }
    }

    /// Rewritten as text (must be valid UTF-8).
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Css | Self::JavaScript | Self::Manifest | Self::Svg)
    }

    /// Gets a brotli payload outside development mode.
    pub const fn is_compressible(self) -> bool {
        matches!(self, Self::Css | Self::JavaScript | Self::Svg)
    }

    /// Gets a lossless WebP payload outside development mode.
    pub const fn has_alternate(self) -> bool {
        matches!(self, Self::Png)
    }
}

impl std::fmt::Display for Mime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
