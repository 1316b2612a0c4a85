use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, terminal,
};
use dweets_config::ConfigFile;
use dweets_core::KeyboardState;
use dweets_demos::{BlackHole, BreakingBroke, Demo, LorenzAttractor, RingWeave, Tunnel, demo_rng};
use tracing::{info, warn};

mod cli;
mod engine;
mod logging;

use cli::{Cli, Command};
use engine::Engine;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let _log_guard = match &cli.log {
        Some(path) => Some(logging::setup_file_logging(&logging::log_path(
            path.as_deref(),
        )?)?),
        None => None,
    };

    match cli.command {
        Command::BreakingBroke { display, seed } => {
            let demo = BreakingBroke::new(demo_rng(seed));
            play(demo.into(), display.view(), display.fps)?;
        }
        Command::Lorenz { display } => {
            play(LorenzAttractor::new().into(), display.view(), display.fps)?;
        }
        Command::BlackHole { display, nstars } => {
            let demo = BlackHole::new(nstars, display.view());
            play(demo.into(), display.view(), display.fps)?;
        }
        Command::RingWeave {
            display,
            config,
            yes,
        } => ring_weave(display.view(), display.fps, config, yes)?,
        Command::Tunnel {
            width,
            height,
            framerate,
            fontsize,
        } => {
            let demo = Tunnel::new((width, height), fontsize);
            play(demo.into(), (width, height), framerate)?;
        }
    }
    Ok(())
}

/// Run one demo in the terminal, restoring the terminal whatever happens.
fn play(demo: Demo, view: (u32, u32), fps: u32) -> Result<Demo> {
    info!(demo = demo.name(), xres = view.0, yres = view.1, fps, "starting demo");
    let terminal = ratatui::init();
    let releases = enable_key_releases();
    let keys = if releases {
        KeyboardState::with_releases()
    } else {
        KeyboardState::default()
    };

    let result = Engine::new(demo, view, fps, keys).run(terminal);

    if releases {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    }
    ratatui::restore();
    result
}

/// Ask the terminal for key release events. Returns whether it agreed.
fn enable_key_releases() -> bool {
    match terminal::supports_keyboard_enhancement() {
        Ok(true) => {
            let flags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_EVENT_TYPES;
            match execute!(stdout(), PushKeyboardEnhancementFlags(flags)) {
                Ok(()) => {
                    info!("keyboard enhancement enabled, tracking key releases");
                    true
                }
                Err(err) => {
                    warn!(%err, "failed to enable keyboard enhancement");
                    false
                }
            }
        }
        Ok(false) => {
            info!("keyboard enhancement unsupported, keys expire shortly after their last repeat");
            false
        }
        Err(err) => {
            warn!(%err, "could not query keyboard enhancement support");
            false
        }
    }
}

fn ring_weave(view: (u32, u32), fps: u32, config: Option<Option<PathBuf>>, yes: bool) -> Result<()> {
    let mut file = match config {
        Some(path) => {
            let path = match path {
                Some(path) => path,
                None => dweets_config::default_config_path()
                    .ok_or_else(|| eyre!("no config directory found, pass --config PATH"))?,
            };
            Some(ConfigFile::load(path))
        }
        None => None,
    };

    let weave = match &file {
        Some(file) => {
            let loaded = file.ring_weave(RingWeave::default_config(view));
            info!(path = %file.path().display(), ?loaded, "ring weave config loaded");
            RingWeave::with_config(view, &loaded)
        }
        None => RingWeave::new(view),
    };

    let demo = play(weave.into(), view, fps)?;

    if let (Some(file), Demo::RingWeave(weave)) = (file.as_mut(), demo) {
        if yes || confirm_save()? {
            file.set_ring_weave(&weave.config())?;
            file.save()?;
            info!(path = %file.path().display(), "ring weave config saved");
        }
    }
    Ok(())
}

fn confirm_save() -> Result<bool> {
    let save = dialoguer::Confirm::new()
        .with_prompt("Save config?")
        .default(false)
        .interact()?;
    Ok(save)
}
