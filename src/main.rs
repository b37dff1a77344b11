//! Skylight entry point
//!
//! Loads settings and the profile, takes over the terminal and runs the game
//! loop until the player quits.

use std::fs::{self, File};
use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::terminal;

use skylight::audio::LogAudio;
use skylight::persistence::{FileStore, file::project_dirs};
use skylight::platform::{TerminalInput, TickClock};
use skylight::progression::load_or_default;
use skylight::renderer::TerminalPresenter;
use skylight::sim::GameState;
use skylight::{Settings, app};

const LOG_FILE: &str = "skylight.log";

/// Log to a file; the terminal belongs to the game
fn init_logging(filter: &str) -> Result<()> {
    let dirs = project_dirs()?;
    let dir = dirs.data_local_dir();
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let file = File::create(dir.join(LOG_FILE)).context("creating log file")?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    let settings_path = Settings::default_path()?;
    let loaded = Settings::load(&settings_path);
    let log_filter = match &loaded {
        Ok(Some(settings)) => settings.log_filter.clone(),
        _ => Settings::default().log_filter,
    };
    init_logging(&log_filter)?;
    log::info!("Skylight {} starting", env!("CARGO_PKG_VERSION"));

    let settings = match loaded {
        Ok(Some(settings)) => {
            log::info!("Loaded settings from {}", settings_path.display());
            settings.sanitized()
        }
        Ok(None) => {
            log::info!("No settings file, writing defaults");
            let settings = Settings::default();
            settings.save(&settings_path)?;
            settings
        }
        Err(e) => {
            log::warn!("Ignoring {}: {}", settings_path.display(), e);
            Settings::default()
        }
    };

    let store = match &settings.profile_path {
        Some(path) => FileStore::new(path),
        None => FileStore::default_location()?,
    };
    log::info!("Profile at {}", store.path().display());
    let profile = load_or_default(&store);

    let seed = settings.seed.unwrap_or_else(clock_seed);
    log::info!("Seed {}", seed);
    let mut state = GameState::new(seed, profile, settings.tuning.clone());

    // Put the terminal back before a panic message is printed
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            io::stdout(),
            crossterm::event::DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );
        default_hook(info);
    }));

    let (cols, rows) = terminal::size().context("terminal size")?;
    let mut presenter = TerminalPresenter::new(io::stdout(), cols, rows)?;
    presenter.enter()?;
    let mut input = TerminalInput::new(presenter.viewport());
    let mut audio = LogAudio::new(settings.mute);
    let mut clock = TickClock::new(settings.tick_rate);

    let outcome = app::run(
        &mut state,
        &store,
        &mut input,
        &mut presenter,
        &mut audio,
        &mut clock,
    );
    if let Err(e) = presenter.leave() {
        log::error!("failed to restore terminal: {}", e);
    }
    outcome?;

    log::info!("Skylight exiting");
    Ok(())
}
