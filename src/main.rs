use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use isowire::config::{parse_resolution, Config, Overrides};
use isowire::display::{Display, InputEvent, RenderTarget};
use isowire::scene::{self, Dispatch, Session};
use isowire::AppError;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Isometric wireframe viewer for integer heightmaps
#[derive(Debug, Parser)]
#[command(name = "isowire", version)]
struct Cli {
    /// Heightmap file: one row per line, whitespace separated integers
    map: PathBuf,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Window width
    #[arg(short, long)]
    width: Option<u32>,

    /// Window height
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Window size as WxH, e.g. 1280x720
    #[arg(short, long, value_parser = parse_resolution, conflicts_with_all = ["width", "height"])]
    resolution: Option<(u32, u32)>,

    /// Disable VSync
    #[arg(long)]
    no_vsync: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        let (width, height) = match self.resolution {
            Some((w, h)) => (Some(w), Some(h)),
            None => (self.width, self.height),
        };
        Overrides {
            width,
            height,
            vsync: self.no_vsync.then_some(false),
        }
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        },
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        },
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .with_overrides(cli.overrides())?;

    let (grid, view) = scene::initialize(&cli.map, &config)?;

    let (width, height) = (config.window.width, config.window.height);
    let (mut display, texture_creator) =
        Display::with_options(&config.window.title, width, height, config.window.vsync)
            .map_err(AppError::display)?;
    let mut target =
        RenderTarget::with_size(&texture_creator, width, height).map_err(AppError::display)?;

    let mut session = Session::new(grid, view, config.palette, width, height);

    info!("{}x{} window; Up/Down height, Left/Right rotate, Escape quits", width, height);

    display
        .present(&mut target, session.current_frame())
        .map_err(AppError::display)?;

    'main: loop {
        for event in display.wait_events() {
            match event {
                InputEvent::Quit => break 'main,
                InputEvent::KeyDown(key) => match session.on_key(key) {
                    Dispatch::Quit => break 'main,
                    Dispatch::Redrawn | Dispatch::Unchanged => {},
                },
            }
        }

        // Expose and resize events wake the loop too, so present on every wake
        display
            .present(&mut target, session.current_frame())
            .map_err(AppError::display)?;
    }

    info!(redraws = session.redraw_count(), "exiting");
    Ok(())
}
