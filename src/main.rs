#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use kret::app::App;
use kret::config::{self, KretConfig};
use kret::schedule::FrameSchedule;
use kret::ui::{self, DebugInfo};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

fn main() -> Result<()> {
    // Create log file and redirect stderr to it
    let log_path = "kret.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .with_context(|| format!("failed to create log file {log_path}"))?;

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file.as_raw_fd(), io::stderr().as_raw_fd());
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Kret");

    let config = match config::loader::load_config_from_file() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {e}");
            KretConfig::default()
        }
    };

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, App::new(config));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("Game error: {err:?}");
    }
    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let frame_length = Duration::from_secs(1) / u32::try_from(app.config.timing.fps.max(1))?;
    let mut schedule = FrameSchedule::new(&app.config.timing);
    let mut debug_info = DebugInfo::default();
    let mut refresh_needed = true;

    loop {
        if refresh_needed {
            debug_info.frame = schedule.frame();
            debug_info.frames_per_iteration = schedule.frames_per_iteration();
            terminal.draw(|f| ui::render(f, &app, &debug_info))?;
            refresh_needed = false;
        }

        if app.should_quit {
            return Ok(());
        }

        if app.is_game_over() {
            if event::poll(frame_length)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                        KeyCode::Enter => {
                            info!("Restarting after {} blocks eaten", app.blocks_eaten());
                            app.reset();
                            schedule = FrameSchedule::new(&app.config.timing);
                        }
                        _ => {}
                    }
                    refresh_needed = true;
                }
            }
            continue;
        }

        let actions = schedule.advance();
        if actions.iterate {
            app.step(actions.spawn);
            refresh_needed = true;
        }
        if actions.player_fall {
            app.move_vertical(1);
            refresh_needed = true;
        }
        if app.is_game_over() {
            info!("Kret died with {} blocks eaten", app.blocks_eaten());
            refresh_needed = true;
            continue;
        }

        if event::poll(frame_length)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                debug!("Key event: {key:?}");
                match key.code {
                    KeyCode::Char('q') => app.should_quit = true,
                    KeyCode::Left | KeyCode::Char('a') => {
                        app.move_horizontal(-1);
                        schedule.note_movement(false);
                    }
                    KeyCode::Right | KeyCode::Char('d') => {
                        app.move_horizontal(1);
                        schedule.note_movement(false);
                    }
                    KeyCode::Up | KeyCode::Char('w') => {
                        app.move_vertical(-1);
                        schedule.note_movement(true);
                    }
                    _ => {}
                }
                debug_info.last_key = Some(format!("{:?}", key.code));
                refresh_needed = true;
            }
        }
    }
}
