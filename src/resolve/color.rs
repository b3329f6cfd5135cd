//! Color variables.

use std::sync::LazyLock;

use regex::Regex;

use super::{Pass, ResolveContext, group, replace_all};
use crate::error::Result;

static COLOR_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"var\(--([^)]*?)\)").unwrap());

/// `var(--name)` → palette value.
///
/// Every `var(--…)` is treated as a palette reference; an unknown name
/// (including a custom property with a fallback) fails the build.
pub struct ColorVar;

impl Pass for ColorVar {
    fn name(&self) -> &'static str {
        "color-var"
    }

    fn apply(&self, text: &str, ctx: &ResolveContext<'_>) -> Result<String> {
        replace_all(&COLOR_VAR, text, |caps| {
            ctx.color(group(caps, 1)).map(str::to_string)
        })
    }
}
