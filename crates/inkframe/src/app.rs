//! Wiring: build the collaborators for the configured mode and run its loop.

use core::convert::Infallible;

use library::{LibraryError, PictureLibrary};
use slideshow::{
    forward_events, input_channel, ButtonMap, ConfigError, HistoryEngine, InputController,
    NowPlayingScheduler, PictureScheduler, RandomPicker, SchedulerError,
};

use crate::config::{Config, ConfigFileError, Mode};
use crate::display::PanelEmulator;
use crate::input::KeyboardInput;
use crate::now_playing::JsonFileSource;
use crate::render::FrameRenderer;

/// Anything that stops the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration file problem.
    #[error(transparent)]
    Config(#[from] ConfigFileError),
    /// Picture directory problem.
    #[error(transparent)]
    Library(#[from] LibraryError),
    /// Scheduler could not be built from the configuration.
    #[error(transparent)]
    Setup(#[from] ConfigError),
    /// A loop ended on a fatal error.
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

/// Run the configured mode until a fatal error.
pub async fn run(config: Config) -> Result<Infallible, AppError> {
    tracing::info!(mode = ?config.mode, output = %config.display.output_dir.display(), "starting");
    match config.mode {
        Mode::Pictures => run_pictures(&config).await,
        Mode::NowPlaying => run_now_playing(&config).await,
    }
}

fn panel(config: &Config) -> (FrameRenderer, PanelEmulator) {
    (
        FrameRenderer::new(config.display.width, config.display.height),
        PanelEmulator::new(&config.display.output_dir, config.min_refresh()),
    )
}

/// Picture slideshow with keyboard buttons.
pub async fn run_pictures(config: &Config) -> Result<Infallible, AppError> {
    let library = PictureLibrary::scan(&config.pictures.dir)?;
    tracing::info!(
        dir = %library.dir().display(),
        pictures = library.len(),
        "picture pool ready"
    );

    let picker = config
        .pictures
        .seed
        .map_or_else(RandomPicker::from_entropy, RandomPicker::seeded);
    let engine = HistoryEngine::new(library.into_pictures(), config.pictures.history_limit, picker)?;
    let (renderer, gateway) = panel(config);
    let scheduler = PictureScheduler::new(
        engine,
        config.picture_interval(),
        renderer,
        gateway,
        config.frame_options(),
    )?;

    if config.input.keyboard {
        let (tx, rx) = input_channel();
        let controller = InputController::new(
            rx,
            scheduler.shared(),
            ButtonMap::default(),
            config.debounce_window(),
        );
        tokio::spawn(controller.run());
        tokio::spawn(forward_events(KeyboardInput::stdin(), tx));
        tracing::info!("keyboard buttons: a/n advance, b/p back, c/r reset, d/space pause");
    }

    Ok(scheduler.run().await?)
}

/// Now-playing card loop.
pub async fn run_now_playing(config: &Config) -> Result<Infallible, AppError> {
    let path = config
        .now_playing
        .source
        .as_ref()
        .ok_or(ConfigFileError::MissingSource)?;
    tracing::info!(feed = %path.display(), "polling now-playing feed");

    let (renderer, gateway) = panel(config);
    let scheduler = NowPlayingScheduler::new(
        JsonFileSource::new(path),
        renderer,
        gateway,
        config.frame_options(),
        config.poll_interval(),
    )?;
    Ok(scheduler.run().await?)
}
