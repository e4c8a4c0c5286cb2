//! inkframe binary: parse flags, set up logging, run until Ctrl-C or a
//! fatal error.

#![allow(missing_docs)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use inkframe::{Config, Mode, Overrides};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "inkframe", version, about = "Slow-refresh picture frame and now-playing display")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content loop to run
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Colour saturation of the panel (0.0 - 1.0)
    #[arg(short, long)]
    saturation: Option<f32>,

    /// Derive the saturation from each frame
    #[arg(long)]
    dynamic_saturation: bool,

    /// Photo directory (pictures mode)
    #[arg(long)]
    photos: Option<PathBuf>,

    /// Now-playing JSON feed (now-playing mode)
    #[arg(long)]
    feed: Option<PathBuf>,

    /// Directory the panel emulator writes frames to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long)]
    debug: bool,
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let file = match &cli.config {
        Some(path) => Config::read(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let config = file
        .with_overrides(Overrides {
            mode: cli.mode,
            saturation: cli.saturation,
            dynamic_saturation: cli.dynamic_saturation,
            photos: cli.photos,
            feed: cli.feed,
            output_dir: cli.output,
        })
        .context("Invalid configuration")?;

    tracing::info!(app = %platform::config::app_title(), "starting up");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let result = runtime.block_on(async {
        tokio::select! {
            outcome = inkframe::app::run(config) => match outcome {
                Ok(never) => match never {},
                Err(e) => Err(anyhow::Error::new(e).context("Frame loop stopped")),
            },
            signal = tokio::signal::ctrl_c() => signal
                .map(|()| tracing::info!("Ctrl-C received, shutting down"))
                .context("Failed to listen for Ctrl-C"),
        }
    });

    // A pending stdin read would otherwise keep the runtime alive.
    runtime.shutdown_timeout(Duration::from_secs(1));
    result
}
