//! Configuration management for `assetgen.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                           |
//! |--------------|---------------------------------------------------|
//! | `[build]`    | Asset root, artifact path/format, ordering names  |
//! | `[watch]`    | Debounce interval of the watch loop               |
//! | `[palette]`  | Extra or overridden `var(--name)` colors          |
//!
//! The file is optional: without it every section uses its defaults. CLI
//! flags override file values. Relative paths in the file resolve against
//! its directory; relative paths given on the command line resolve against
//! the working directory.

mod error;
mod section;

pub use error::ConfigError;
pub use section::ArtifactFormat;
use section::{BuildConfig, WatchConfig};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::log;
use crate::palette::Palette;
use crate::utils::path::{normalize_path, resolve_path};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG: &str = "assetgen.toml";

/// Root configuration structure representing `assetgen.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Absolute path of the loaded config file (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Build settings
    pub build: BuildConfig,

    /// Watch loop settings
    pub watch: WatchConfig,

    /// Color overrides, merged over the built-in palette
    pub palette: BTreeMap<String, String>,
}

impl Config {
    /// Load configuration from CLI arguments.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::Io(PathBuf::from("."), e))?;
        Self::load_in(cli, &cwd)
    }

    /// Load configuration as if started from `cwd`.
    fn load_in(cli: &Cli, cwd: &Path) -> Result<Self, ConfigError> {
        let (config_path, explicit) = match &cli.config {
            Some(path) => (cwd.join(path), true),
            None => (cwd.join(DEFAULT_CONFIG), false),
        };

        let mut config = if config_path.exists() {
            let mut config = Self::from_path(&config_path)?;
            config.config_path = Some(normalize_path(&config_path));
            config
        } else if explicit {
            return Err(ConfigError::NotFound(config_path));
        } else {
            Self::default()
        };

        let base = config.base_dir(cwd);
        config.normalize_paths(&base);
        config.apply_cli(cli, cwd);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let (config, ignored) = Self::parse_with_ignored(content)?;
        if !ignored.is_empty() {
            log!("warning"; "ignoring unknown config fields: {}", ignored.join(", "));
        }
        Ok(config)
    }

    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Apply CLI overrides. Their paths are relative to the working
    /// directory, not to the config file.
    fn apply_cli(&mut self, cli: &Cli, cwd: &Path) {
        if let Some(root) = &cli.root {
            self.build.root = resolve_path(root, cwd);
        }
        if let Some(output) = &cli.output {
            self.build.output = resolve_output(output, cwd);
        }
        if let Some(format) = cli.format {
            self.build.format = format;
        }
    }

    /// Directory that relative paths resolve against.
    fn base_dir(&self, cwd: &Path) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf)
    }

    /// Make `build.root` and `build.output` absolute.
    ///
    /// The output file may not exist yet, so only its directory is
    /// canonicalized; this keeps it comparable with paths found under the
    /// (canonical) root.
    pub fn normalize_paths(&mut self, base: &Path) {
        self.build.root = resolve_path(&self.build.root, base);
        self.build.output = resolve_output(&self.build.output, base);
    }

    /// Validate field values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("build.public_prefix", &self.build.public_prefix),
            ("build.ignore_prefix", &self.build.ignore_prefix),
            ("build.images_dir", &self.build.images_dir),
            ("build.service_worker", &self.build.service_worker),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("`{field}` must not be empty")));
            }
        }

        if self.watch.debounce_ms == 0 {
            return Err(ConfigError::Validation(
                "`watch.debounce_ms` must be greater than 0".into(),
            ));
        }

        for (name, value) in &self.palette {
            if name.trim().is_empty() || value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "`palette.{name}` needs a non-empty name and value"
                )));
            }
        }

        Ok(())
    }

    /// The palette used by every build cycle of this process.
    pub fn palette(&self) -> Palette {
        Palette::with_overrides(&self.palette)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.watch.debounce_ms)
    }
}

/// Resolve the artifact path, canonicalizing only its directory.
fn resolve_output(output: &Path, base: &Path) -> PathBuf {
    let output = resolve_path(output, base);
    match (output.parent(), output.file_name()) {
        (Some(parent), Some(name)) => normalize_path(parent).join(name),
        _ => output,
    }
}

/// Parse a config snippet, failing on unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> Config {
    let (parsed, ignored) = Config::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_palette_section() {
        let config = test_parse_config("[palette]\nbrand = \"#663399\"\nblue = \"#0000ff\"");
        let palette = config.palette();
        assert_eq!(palette.get("brand"), Some("#663399"));
        assert_eq!(palette.get("blue"), Some("#0000ff"));
        assert_eq!(palette.get("green"), Some("#28a745"));
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let (_, ignored) =
            Config::parse_with_ignored("[build]\nroot = \"a\"\nminify = true\n[serve]\nport = 1")
                .unwrap();
        assert!(ignored.iter().any(|f| f == "build.minify"));
        assert!(ignored.iter().any(|f| f.starts_with("serve")));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::from_str("[build\nroot = 1"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.build.public_prefix = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = Config::default();
        config.watch.debounce_ms = 0;
        assert!(config.validate().is_err());

        let config = test_parse_config("[palette]\nempty = \"\"");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_normalize_paths() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("assets")).unwrap();

        let mut config = Config::default();
        config.build.output = PathBuf::from("gen/assets.rs");
        config.normalize_paths(dir.path());

        assert!(config.build.root.is_absolute());
        assert!(config.build.root.ends_with("assets"));
        assert!(config.build.output.is_absolute());
        assert!(config.build.output.ends_with("gen/assets.rs"));
    }

    #[test]
    fn test_cli_paths_resolve_against_working_dir() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path();
        std::fs::create_dir_all(cwd.join("sub")).unwrap();
        std::fs::create_dir_all(cwd.join("assets")).unwrap();
        std::fs::write(cwd.join("sub/assetgen.toml"), "[build]\nroot = \"static\"\n").unwrap();

        let cli = Cli::parse_from(["assetgen", "-C", "sub/assetgen.toml"]);
        let config = Config::load_in(&cli, cwd).unwrap();
        assert!(config.build.root.ends_with("sub/static"));
        assert!(config.build.output.ends_with("sub/assets.rs"));

        let cli = Cli::parse_from([
            "assetgen", "-C", "sub/assetgen.toml", "--root", "assets", "-o", "gen/assets.rs",
        ]);
        let config = Config::load_in(&cli, cwd).unwrap();
        assert_eq!(config.build.root, normalize_path(&cwd.join("assets")));
        assert!(config.build.output.ends_with("gen/assets.rs"));
        let parent = config.build.output.parent().and_then(Path::parent);
        assert_eq!(parent.and_then(Path::file_name), cwd.file_name());
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::parse_from(["assetgen", "-C", "missing.toml"]);
        assert!(matches!(
            Config::load_in(&cli, dir.path()),
            Err(ConfigError::NotFound(_))
        ));
    }
}
