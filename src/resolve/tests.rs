use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::*;

fn paths() -> PathTable {
    let mut paths = PathTable::new();
    paths.insert("images/logo.png", "/assets/LOGO");
    paths.insert("images/icon-192.png", "/assets/ICON");
    paths
}

fn ctx<'a>(root: &'a Path, paths: &'a PathTable, palette: &'a Palette) -> ResolveContext<'a> {
    ResolveContext {
        asset: "styles/app.css",
        root,
        paths,
        palette,
    }
}

#[test]
fn test_color_var_substitution() {
    let (paths, palette) = (PathTable::new(), Palette::default());
    let ctx = ctx(Path::new("."), &paths, &palette);

    assert_eq!(ColorVar.apply("var(--blue)", &ctx).unwrap(), "#007bff");
    assert_eq!(
        ColorVar
            .apply("a{color:var(--red);border-color:var(--grey-light)}", &ctx)
            .unwrap(),
        "a{color:#dc3545;border-color:#f8f9fa}"
    );
}

#[test]
fn test_color_var_unknown_fails() {
    let (paths, palette) = (PathTable::new(), Palette::default());
    let ctx = ctx(Path::new("."), &paths, &palette);

    let err = ColorVar.apply("a{color:var(--purple)}", &ctx).unwrap_err();
    assert!(matches!(
        err,
        BuildError::MissingVariable { ref name, .. } if name == "purple"
    ));

    // A fallback does not make an unknown name acceptable.
    let err = ColorVar.apply("a{color:var(--purple, red)}", &ctx).unwrap_err();
    assert!(matches!(err, BuildError::MissingVariable { .. }));
}

#[test]
fn test_asset_url() {
    let (paths, palette) = (paths(), Palette::default());
    let ctx = ctx(Path::new("."), &paths, &palette);

    let out = AssetUrl
        .apply("body{background:asset-url('images/logo.png') no-repeat}", &ctx)
        .unwrap();
    assert_eq!(out, "body{background:url(/assets/LOGO) no-repeat}");

    let out = AssetUrl.apply(r#"a{b:asset-url("images/logo.png")}"#, &ctx).unwrap();
    assert_eq!(out, "a{b:url(/assets/LOGO)}");
}

#[test]
fn test_asset_url_unresolved() {
    let (paths, palette) = (paths(), Palette::default());
    let ctx = ctx(Path::new("."), &paths, &palette);

    let err = AssetUrl
        .apply("a{b:asset-url('images/missing.png')}", &ctx)
        .unwrap_err();
    match err {
        BuildError::UnresolvedReference { asset, reference } => {
            assert_eq!(asset, "styles/app.css");
            assert_eq!(reference, "images/missing.png");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_asset_path() {
    let (paths, palette) = (paths(), Palette::default());
    let ctx = ctx(Path::new("."), &paths, &palette);

    let out = AssetPath
        .apply("const logo = assetPath('images/logo.png');", &ctx)
        .unwrap();
    assert_eq!(out, "const logo = '/assets/LOGO';");
}

#[test]
fn test_manifest_src() {
    let (paths, palette) = (paths(), Palette::default());
    let ctx = ctx(Path::new("."), &paths, &palette);

    let out = ManifestSrc
        .apply(
            r#"{"icons":[{"src":"images/icon-192.png","sizes":"192x192"}]}"#,
            &ctx,
        )
        .unwrap();
    assert_eq!(
        out,
        r#"{"icons":[{"src":"/assets/ICON","sizes":"192x192"}]}"#
    );

    assert!(ManifestSrc.apply(r#"{"src":"nope.png"}"#, &ctx).is_err());
}

#[test]
fn test_svg_embed_with_fill() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("_check.svg"),
        r#"<svg xmlns="http://www.w3.org/2000/svg"><path fill="FILL" stroke="var(--blue)"/></svg>"#,
    )
    .unwrap();

    let (paths, palette) = (PathTable::new(), Palette::default());
    let ctx = ctx(dir.path(), &paths, &palette);

    let out = SvgEmbed
        .apply(r#"a{background:svg-embed("_check.svg",#fff)}"#, &ctx)
        .unwrap();
    assert_eq!(
        out,
        "a{background:url(\"data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg'>\
         <path fill='%23fff' stroke='%23007bff'/></svg>\")}"
    );
}

#[test]
fn test_svg_embed_without_fill_keeps_token() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("_dot.svg"), "<svg fill=\"FILL\"/>").unwrap();

    let (paths, palette) = (PathTable::new(), Palette::default());
    let ctx = ctx(dir.path(), &paths, &palette);

    let out = SvgEmbed.apply("a{b:svg-embed('_dot.svg')}", &ctx).unwrap();
    assert_eq!(out, "a{b:url(\"data:image/svg+xml,<svg fill='FILL'/>\")}");
}

#[test]
fn test_svg_embed_missing_file() {
    let dir = TempDir::new().unwrap();
    let (paths, palette) = (PathTable::new(), Palette::default());
    let ctx = ctx(dir.path(), &paths, &palette);

    let err = SvgEmbed.apply("a{b:svg-embed('_gone.svg')}", &ctx).unwrap_err();
    assert!(matches!(err, BuildError::Io { .. }));
}

#[test]
fn test_run_passes_in_order() {
    let (paths, palette) = (paths(), Palette::default());
    let ctx = ctx(Path::new("."), &paths, &palette);

    let passes: [&dyn Pass; 2] = [&AssetUrl, &ColorVar];
    let out = run_passes(
        &passes,
        "a{color:var(--green);background:asset-url('images/logo.png')}".to_string(),
        &ctx,
    )
    .unwrap();
    assert_eq!(out, "a{color:#28a745;background:url(/assets/LOGO)}");
}

#[test]
fn test_passes_are_idempotent_on_resolved_text() {
    let (paths, palette) = (paths(), Palette::default());
    let ctx = ctx(Path::new("."), &paths, &palette);

    let once = AssetUrl.apply("a{b:asset-url('images/logo.png')}", &ctx).unwrap();
    let twice = AssetUrl.apply(&once, &ctx).unwrap();
    assert_eq!(once, twice);
}
