//! Inline SVG embedding for stylesheets.

use std::fs;
use std::sync::LazyLock;

use regex::Regex;

use super::{ColorVar, Pass, ResolveContext, group, replace_all};
use crate::error::{BuildError, Result};

/// `svg-embed('file.svg')` or `svg-embed('file.svg',<color>)`.
///
/// Either quote style is accepted: this pass runs on minifier output, and
/// the minifier normalizes string quotes.
static SVG_EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"svg-embed\([ \t]*['"]([^'"]*)['"][ \t]*(?:,[ \t]*([^)]*?)[ \t]*)?\)"#).unwrap()
});

/// Placeholder inside an SVG replaced by the color override.
const FILL_TOKEN: &str = "FILL";

/// `svg-embed(...)` → `url("data:image/svg+xml,<svg>")`.
///
/// The SVG is read from disk relative to the asset root, never from the
/// asset table: it is inlined, not content-addressed.
pub struct SvgEmbed;

impl Pass for SvgEmbed {
    fn name(&self) -> &'static str {
        "svg-embed"
    }

    fn apply(&self, text: &str, ctx: &ResolveContext<'_>) -> Result<String> {
        replace_all(&SVG_EMBED, text, |caps| {
            let svg = inline_svg(group(caps, 1), group(caps, 2), ctx)?;
            Ok(format!(r#"url("data:image/svg+xml,{svg}")"#))
        })
    }
}

/// Read an SVG and make it safe to place inside a double-quoted data URI.
fn inline_svg(file: &str, fill: &str, ctx: &ResolveContext<'_>) -> Result<String> {
    let path = ctx.root.join(file);
    let mut svg = fs::read_to_string(&path).map_err(|e| BuildError::io(&path, e))?;

    if !fill.is_empty() {
        svg = svg.replace(FILL_TOKEN, fill);
    }

    let svg = ColorVar.apply(&svg, ctx)?;
    Ok(svg.replace('"', "'").replace('#', "%23"))
}
