//! Per-file pipeline: classify, resolve references, minify, fingerprint,
//! and produce optional compressed / alternate payloads.

use std::path::Path;

use crate::core::BuildMode;
use crate::error::{BuildError, Result};
use crate::palette::Palette;
use crate::resolve::{
    AssetPath, AssetUrl, ColorVar, ManifestSrc, Pass, ResolveContext, SvgEmbed, run_passes,
};
use crate::table::{PathTable, Payload};

use super::{Mime, encode, fingerprint, minify};

/// One processed file.
#[derive(Debug, Clone)]
pub struct Asset {
    pub mime: Mime,
    /// Post-pipeline bytes.
    pub data: Vec<u8>,
    /// Brotli payload (CSS, JS, SVG; production only).
    pub compressed: Option<Vec<u8>>,
    /// Lossless WebP payload (PNG; production only).
    pub alternate: Option<Vec<u8>>,
    pub fingerprint: String,
    pub public_path: String,
}

impl Asset {
    /// Split into the path-table value and the asset-table entry.
    pub fn into_entry(self) -> (String, String, Payload) {
        let payload = Payload {
            compressed: self.compressed.unwrap_or_default(),
            data: self.data,
            alternate: self.alternate.unwrap_or_default(),
            mime: self.mime.as_str().to_string(),
        };
        (self.fingerprint, self.public_path, payload)
    }
}

/// Drives single files through the pipeline.
///
/// Holds only read-only inputs; the path table of the running cycle is
/// passed per call.
pub struct Processor<'a> {
    pub root: &'a Path,
    pub palette: &'a Palette,
    pub public_prefix: &'a str,
    pub mode: BuildMode,
}

impl Processor<'_> {
    /// Process one file.
    ///
    /// `paths` must already contain every asset this one references.
    pub fn process(&self, source: &str, raw: Vec<u8>, paths: &PathTable) -> Result<Asset> {
        let mime = Mime::from_path(Path::new(source)).ok_or_else(|| {
            BuildError::UnsupportedExtension {
                path: source.to_string(),
            }
        })?;

        let ctx = ResolveContext {
            asset: source,
            root: self.root,
            paths,
            palette: self.palette,
        };

        let data = if mime.is_text() {
            let text = String::from_utf8(raw)
                .map_err(|_| BuildError::malformed(source, "not valid UTF-8"))?;
            transform_text(mime, text, &ctx)?.into_bytes()
        } else {
            raw
        };

        let fingerprint = fingerprint::compute(&data);
        let public_path = fingerprint::public_path(self.public_prefix, &fingerprint);

        let (compressed, alternate) = if self.mode.precompress {
            self.encode(source, mime, &data)?
        } else {
            (None, None)
        };

        crate::debug!("asset"; "{} -> {}", source, public_path);

        Ok(Asset {
            mime,
            data,
            compressed,
            alternate,
            fingerprint,
            public_path,
        })
    }

    fn encode(
        &self,
        source: &str,
        mime: Mime,
        data: &[u8],
    ) -> Result<(Option<Vec<u8>>, Option<Vec<u8>>)> {
        let compressed = if mime.is_compressible() {
            let bytes = encode::compress(data).map_err(|e| BuildError::io(self.root.join(source), e))?;
            Some(bytes)
        } else {
            None
        };

        let alternate = if mime.has_alternate() {
            let bytes = encode::png_to_webp(data).map_err(|source_err| BuildError::Image {
                path: source.to_string(),
                source: source_err,
            })?;
            Some(bytes)
        } else {
            None
        };

        Ok((compressed, alternate))
    }
}

/// Rewrite and minify a text asset.
///
/// In stylesheets, `svg-embed` runs after minification: the inlined data
/// URI must not go through the minifier, and the marker itself is left
/// alone by it.
fn transform_text(mime: Mime, text: String, ctx: &ResolveContext<'_>) -> Result<String> {
    match mime {
        Mime::Css => {
            let text = run_passes(&[&AssetUrl, &ColorVar, &AssetPath], text, ctx)?;
            let text = minify_text(mime, &text, ctx.asset)?;
            SvgEmbed.apply(&text, ctx)
        }
        Mime::JavaScript => {
            let text = AssetPath.apply(&text, ctx)?;
            minify_text(mime, &text, ctx.asset)
        }
        Mime::Manifest => {
            let text = AssetPath.apply(&text, ctx)?;
            let text = minify_text(mime, &text, ctx.asset)?;
            ManifestSrc.apply(&text, ctx)
        }
        Mime::Svg => ColorVar.apply(&text, ctx),
        _ => Ok(text),
    }
}

fn minify_text(mime: Mime, text: &str, asset: &str) -> Result<String> {
    minify::minify(mime, text)
        .map_err(|reason| BuildError::malformed(asset, format!("{mime} minifier: {reason}")))
}
