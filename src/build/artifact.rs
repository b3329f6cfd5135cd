//! Generated lookup artifact.
//!
//! The artifact is the only output of a build cycle. It is rendered fully in
//! memory and then swapped in with a rename, so readers see either the
//! previous artifact or the new one.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::config::ArtifactFormat;
use crate::table::{AssetTable, PathTable};

const RUST_HEADER: &str = "\
// @generated by assetgen. Do not edit.

pub struct Asset {
    pub br: &'static [u8],
    pub data: &'static [u8],
    pub webp: &'static [u8],
    pub mime: &'static str,
}
";

/// Both tables of one finished cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub paths: PathTable,
    pub assets: AssetTable,
}

impl Artifact {
    /// Render in the requested syntax. Output is byte-identical for equal tables.
    pub fn render(&self, format: ArtifactFormat) -> io::Result<Vec<u8>> {
        match format {
            ArtifactFormat::Rust => Ok(self.to_rust().into_bytes()),
            ArtifactFormat::Json => {
                let mut json = serde_json::to_vec_pretty(self)?;
                json.push(b'\n');
                Ok(json)
            }
        }
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    fn to_rust(&self) -> String {
        let mut out = String::from(RUST_HEADER);

        out.push_str("\npub static PATHS: &[(&str, &str)] = &[\n");
        for (source, public) in self.paths.iter() {
            let _ = writeln!(out, "    ({source:?}, {public:?}),");
        }
        out.push_str("];\n");

        out.push_str("\npub static ASSETS: &[(&str, Asset)] = &[\n");
        for (fingerprint, payload) in self.assets.iter() {
            let _ = writeln!(out, "    ({fingerprint:?}, Asset {{");
            let _ = writeln!(out, "        br: {},", byte_literal(&payload.compressed));
            let _ = writeln!(out, "        data: {},", byte_literal(&payload.data));
            let _ = writeln!(out, "        webp: {},", byte_literal(&payload.alternate));
            let _ = writeln!(out, "        mime: {:?},", payload.mime);
            out.push_str("    }),\n");
        }
        out.push_str("];\n");

        out
    }
}

/// Escape bytes as a Rust byte string literal (`b"..."`).
fn byte_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push_str("b\"");
    for &b in bytes {
        out.extend(std::ascii::escape_default(b).map(char::from));
    }
    out.push('"');
    out
}

/// Replace `path` with `bytes` via a temp file in the same directory.
///
/// Missing parent directories are created. On error the previous file is
/// left as it was.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Payload;
    use tempfile::TempDir;

    fn sample() -> Artifact {
        let mut artifact = Artifact::default();
        artifact.paths.insert("styles/app.css", "/assets/CSS");
        artifact.paths.insert("images/a.png", "/assets/PNG");
        artifact.assets.insert(
            "PNG",
            Payload {
                compressed: Vec::new(),
                data: vec![0x89, b'P', b'N', b'G', b'\n', 0],
                alternate: vec![1, 2, 3],
                mime: "image/png".into(),
            },
        );
        artifact.assets.insert(
            "CSS",
            Payload {
                compressed: vec![0xff],
                data: br#"a{content:"\""}"#.to_vec(),
                alternate: Vec::new(),
                mime: "text/css".into(),
            },
        );
        artifact
    }

    #[test]
    fn test_byte_literal_escapes() {
        assert_eq!(byte_literal(b""), r#"b"""#);
        assert_eq!(byte_literal(b"a\"\\\n\x00\xff"), r#"b"a\"\\\n\x00\xff""#);
    }

    #[test]
    fn test_render_rust_sorted() {
        let out = String::from_utf8(sample().render(ArtifactFormat::Rust).unwrap()).unwrap();

        assert!(out.starts_with("// @generated"));
        assert!(out.contains("pub static PATHS: &[(&str, &str)] = &["));
        assert!(out.contains("pub static ASSETS: &[(&str, Asset)] = &["));

        let images = out.find(r#"("images/a.png", "/assets/PNG")"#).unwrap();
        let styles = out.find(r#"("styles/app.css", "/assets/CSS")"#).unwrap();
        assert!(images < styles);

        let css = out.find(r#"("CSS", Asset {"#).unwrap();
        let png = out.find(r#"("PNG", Asset {"#).unwrap();
        assert!(css < png);
        assert!(out.contains(r#"webp: b"\x01\x02\x03","#));
        assert!(out.contains(r#"mime: "image/png","#));
    }

    #[test]
    fn test_render_deterministic() {
        let a = sample().render(ArtifactFormat::Rust).unwrap();
        let b = sample().render(ArtifactFormat::Rust).unwrap();
        assert_eq!(a, b);

        let a = sample().render(ArtifactFormat::Json).unwrap();
        let b = sample().render(ArtifactFormat::Json).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_json_round_trip() {
        let artifact = sample();
        let json = artifact.render(ArtifactFormat::Json).unwrap();
        let json = String::from_utf8(json).unwrap();

        assert!(json.contains(r#""webp": "AQID""#));
        assert_eq!(Artifact::from_json(&json).unwrap(), artifact);
    }

    #[test]
    fn test_write_atomic_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gen/assets.rs");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        let leftovers = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }
}
