//! Reference resolution inside a single asset.
//!
//! Each rewrite is a [`Pass`]: it scans the asset text for one marker syntax
//! and substitutes the resolved value. The asset processor decides which
//! passes run, and in which order, for a given mime class.
//!
//! | Pass            | Marker                              | Result                        |
//! |-----------------|-------------------------------------|-------------------------------|
//! | [`AssetUrl`]    | `asset-url('images/a.png')`         | `url(/assets/<fp>)`           |
//! | [`AssetPath`]   | `assetPath('images/a.png')`         | `'/assets/<fp>'`              |
//! | [`ColorVar`]    | `var(--blue)`                       | `#007bff`                     |
//! | [`SvgEmbed`]    | `svg-embed('_icon.svg',#fff)`       | `url("data:image/svg+xml,…")` |
//! | [`ManifestSrc`] | `"src":"images/icon.png"`           | `"src":"/assets/<fp>"`        |

mod color;
mod reference;
mod svg;

#[cfg(test)]
mod tests;

use std::path::Path;

use regex::{Captures, Regex};

use crate::error::{BuildError, Result};
use crate::palette::Palette;
use crate::table::PathTable;

pub use color::ColorVar;
pub use reference::{AssetPath, AssetUrl, ManifestSrc};
pub use svg::SvgEmbed;

/// Everything a pass may consult while rewriting one asset.
pub struct ResolveContext<'a> {
    /// Source path of the asset being rewritten (for error messages).
    pub asset: &'a str,
    /// Asset root, used to read inlined SVG files.
    pub root: &'a Path,
    /// Public paths of every asset processed earlier in this cycle.
    pub paths: &'a PathTable,
    pub palette: &'a Palette,
}

impl ResolveContext<'_> {
    /// Public path of an already processed asset.
    pub fn public_path(&self, reference: &str) -> Result<&str> {
        self.paths
            .get(reference)
            .ok_or_else(|| BuildError::UnresolvedReference {
                asset: self.asset.to_string(),
                reference: reference.to_string(),
            })
    }

    /// Literal value of a color variable.
    pub fn color(&self, name: &str) -> Result<&str> {
        self.palette
            .get(name)
            .ok_or_else(|| BuildError::MissingVariable {
                asset: self.asset.to_string(),
                name: name.to_string(),
            })
    }
}

/// One marker syntax and its substitution.
pub trait Pass {
    fn name(&self) -> &'static str;

    fn apply(&self, text: &str, ctx: &ResolveContext<'_>) -> Result<String>;
}

/// Run passes in order, feeding each one the output of the previous.
pub fn run_passes(passes: &[&dyn Pass], text: String, ctx: &ResolveContext<'_>) -> Result<String> {
    passes.iter().try_fold(text, |text, pass| {
        crate::debug!("resolve"; "{} on {}", pass.name(), ctx.asset);
        pass.apply(&text, ctx)
    })
}

/// `Regex::replace_all` with a fallible replacer.
///
/// Stops at the first error; nothing is substituted in that case.
fn replace_all<F>(re: &Regex, text: &str, mut replace: F) -> Result<String>
where
    F: FnMut(&Captures<'_>) -> Result<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&replace(&caps)?);
        last = whole.end();
    }

    out.push_str(&text[last..]);
    Ok(out)
}

/// Text of capture group `i`, or `""` when the group did not participate.
fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str())
}
