//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

use crate::config::ArtifactFormat;

/// Fingerprint, compress and embed static assets
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: assetgen.toml, optional)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Asset root directory
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Generated artifact path
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Artifact syntax
    #[arg(short, long, value_enum)]
    pub format: Option<ArtifactFormat>,

    /// Development mode: skip precompression and keep watching
    /// (also enabled by DEV=1)
    #[arg(short, long)]
    pub dev: bool,

    /// Log every processed asset
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "assetgen", "--root", "static", "-o", "gen/assets.json", "--format", "json", "--dev",
        ]);
        assert_eq!(cli.root, Some(PathBuf::from("static")));
        assert_eq!(cli.output, Some(PathBuf::from("gen/assets.json")));
        assert_eq!(cli.format, Some(ArtifactFormat::Json));
        assert!(cli.dev);
        assert!(!cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["assetgen"]);
        assert!(cli.root.is_none() && cli.format.is_none());
        assert!(!cli.dev);
    }
}
