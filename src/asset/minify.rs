//! Asset minification for stylesheets, scripts and the web manifest.
//!
//! Uses lightningcss for CSS, oxc for JavaScript and serde_json for the
//! manifest. Malformed input is an error, never passed through.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use super::Mime;

/// Minify JavaScript source code.
///
/// Input is parsed as a classic script (sloppy mode, top-level names are
/// globals shared with other scripts), not as a module.
pub fn minify_js(source: &str) -> Result<String, String> {
    let allocator = Allocator::default();
    let source_type = SourceType::default().with_script(true);
    let ret = Parser::new(&allocator, source, source_type).parse();
    if let Some(error) = ret.errors.first() {
        return Err(error.to_string());
    }
    if ret.panicked {
        return Err("parser gave up".to_string());
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Ok(code)
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Result<String, String> {
    let stylesheet =
        StyleSheet::parse(source, ParserOptions::default()).map_err(|e| e.to_string())?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| e.to_string())?;
    Ok(result.code)
}

/// Minify a web manifest by re-serializing it compactly.
///
/// Key order is preserved (`serde_json/preserve_order`).
pub fn minify_manifest(source: &str) -> Result<String, String> {
    let value: serde_json::Value = serde_json::from_str(source).map_err(|e| e.to_string())?;
    serde_json::to_string(&value).map_err(|e| e.to_string())
}

/// Minify content by mime type.
///
/// Types without a minifier are returned unchanged.
pub fn minify(mime: Mime, source: &str) -> Result<String, String> {
    match mime {
        Mime::Css => minify_css(source),
        Mime::JavaScript => minify_js(source),
        Mime::Manifest => minify_manifest(source),
        _ => Ok(source.to_string()),
    }
}
