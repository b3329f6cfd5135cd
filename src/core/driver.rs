/// Build mode selecting which optional payloads are produced.
///
/// Resolved once from the `DEV` environment variable or `--dev`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMode {
    /// Produce brotli and WebP payloads next to the transformed bytes.
    pub precompress: bool,

    /// Keep running after the first build and rebuild on file changes.
    pub watch: bool,
}

impl BuildMode {
    /// Production mode: compressed and alternate payloads, single shot.
    pub const PRODUCTION: Self = Self {
        precompress: true,
        watch: false,
    };

    /// Development mode: raw payloads only, watch loop enabled.
    pub const DEVELOPMENT: Self = Self {
        precompress: false,
        watch: true,
    };

    /// Pick the mode from the CLI flag and the `DEV` environment value.
    pub fn resolve(dev_flag: bool, env: Option<&str>) -> Self {
        let env_dev = env.is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
        if dev_flag || env_dev {
            Self::DEVELOPMENT
        } else {
            Self::PRODUCTION
        }
    }
}
