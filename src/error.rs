//! Build error taxonomy.
//!
//! Every variant is fatal for the current build cycle: there is no per-file
//! recovery and no partial artifact.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while processing the asset tree.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("unsupported asset type: {path}")]
    UnsupportedExtension { path: String },

    #[error("unresolved reference in {asset}: `{reference}` has not been processed yet")]
    UnresolvedReference { asset: String, reference: String },

    #[error("unknown color variable in {asset}: `--{name}`")]
    MissingVariable { asset: String, name: String },

    #[error("IO error on `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("image processing failed for {path}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

impl BuildError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = BuildError> = std::result::Result<T, E>;
