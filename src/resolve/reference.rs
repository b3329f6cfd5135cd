//! References to other assets' public paths.

use std::sync::LazyLock;

use regex::Regex;

use super::{Pass, ResolveContext, group, replace_all};
use crate::error::Result;

static ASSET_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"asset-url\([ \t]*['"]([^'"]*)['"][ \t]*\)"#).unwrap());

static ASSET_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"assetPath\([ \t]*['"]([^'"]*)['"][ \t]*\)"#).unwrap());

static MANIFEST_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""src":"([^"]*)""#).unwrap());

/// Stylesheet `asset-url('path')` → `url(public)`.
pub struct AssetUrl;

impl Pass for AssetUrl {
    fn name(&self) -> &'static str {
        "asset-url"
    }

    fn apply(&self, text: &str, ctx: &ResolveContext<'_>) -> Result<String> {
        replace_all(&ASSET_URL, text, |caps| {
            let public = ctx.public_path(group(caps, 1))?;
            Ok(format!("url({public})"))
        })
    }
}

/// Script `assetPath('path')` → `'public'`.
///
/// Also applied to stylesheets and the web manifest.
pub struct AssetPath;

impl Pass for AssetPath {
    fn name(&self) -> &'static str {
        "asset-path"
    }

    fn apply(&self, text: &str, ctx: &ResolveContext<'_>) -> Result<String> {
        replace_all(&ASSET_PATH, text, |caps| {
            let public = ctx.public_path(group(caps, 1))?;
            Ok(format!("'{public}'"))
        })
    }
}

/// Web manifest `"src":"path"` → `"src":"public"`.
///
/// Icons in a manifest are plain JSON strings, not markers, so this runs on
/// the compact output of the JSON minifier where the key/value spacing is
/// known.
pub struct ManifestSrc;

impl Pass for ManifestSrc {
    fn name(&self) -> &'static str {
        "manifest-src"
    }

    fn apply(&self, text: &str, ctx: &ResolveContext<'_>) -> Result<String> {
        replace_all(&MANIFEST_SRC, text, |caps| {
            let public = ctx.public_path(group(caps, 1))?;
            Ok(format!(r#""src":"{public}""#))
        })
    }
}
