//! assetgen - build-time asset pipeline.
//!
//! Rewrites references between assets, fingerprints and compresses them,
//! and emits a generated lookup table for the serving binary to embed.

mod asset;
mod build;
mod cli;
mod config;
mod core;
mod error;
mod logger;
mod palette;
mod resolve;
mod table;
mod utils;
mod watch;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};

use crate::build::Builder;
use crate::cli::Cli;
use crate::config::Config;
use crate::core::BuildMode;
use crate::watch::{AssetWatcher, Debouncer};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = Config::load(&cli).context("failed to load configuration")?;
    let mode = BuildMode::resolve(cli.dev, std::env::var("DEV").ok().as_deref());
    let palette = config.palette();
    let builder = Builder::new(&config, &palette, mode);

    if mode.watch {
        run_watch(&config, &builder)
    } else {
        let report = builder
            .build()
            .with_context(|| format!("build failed for {}", config.build.root.display()))?;
        log!("build"; "{}", report.summary());
        Ok(())
    }
}

/// Initial build, then rebuild on every debounced change.
///
/// A failing build is reported and waited out; the next change retries.
fn run_watch(config: &Config, builder: &Builder<'_>) -> Result<()> {
    let watcher = AssetWatcher::new(&config.build.root)
        .with_context(|| format!("failed to watch {}", config.build.root.display()))?;

    log!("watch"; "watching {}", config.build.root.display());
    watch::report(builder.build());

    let debouncer = Debouncer::new(config.debounce()).ignoring(&config.build.output);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    rt.block_on(watcher.run(debouncer, |_| builder.build()));
    Ok(())
}
