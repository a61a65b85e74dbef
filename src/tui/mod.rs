//! Terminal dashboard
//!
//! One select loop owns the engine: key presses, engine updates, the periodic
//! refresh and the frame tick are all handled here, so the view model is only
//! ever touched from this task.

use color_eyre::eyre::{Result, WrapErr};
use crossterm::cursor::Show;
use crossterm::event::EventStream;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures_util::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval, interval_at};
use tracing::info;

use crate::config::Config;
use crate::engine::Engine;
use crate::logging;

mod app;
mod input;
mod screens;
mod widgets;

#[cfg(test)]
mod tests;

use app::App;
use input::handle_event;
use screens::render_dashboard;

/// Restores the terminal when dropped, including on early return
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Run the dashboard until the user quits
///
/// # Errors
/// Returns an error if logging, the HTTP client or the terminal cannot be set up,
/// or drawing fails.
pub async fn run(config: Config) -> Result<()> {
    let _log_guard = logging::init_file_logging(&logging::log_dir()?, &config.settings.log_level)?;
    info!("Starting dashboard against {}", config.settings.endpoint);

    let (engine, mut updates) = Engine::from_config(&config)?;

    // Restore the terminal before the panic report is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode().wrap_err("Failed to enable raw mode")?;
    let _term_guard = TerminalGuard;
    execute!(io::stdout(), EnterAlternateScreen).wrap_err("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).wrap_err("Failed to create terminal")?;

    let mut app = App::new(engine);
    app.engine.start();

    const TARGET_FPS: u64 = 30;
    const FRAME_TIME: Duration = Duration::from_millis(1000 / TARGET_FPS);
    const SPINNER_STEP: Duration = Duration::from_millis(120);

    let mut tick = interval(FRAME_TIME);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut refresh = config.settings.refresh_interval.map(|period| {
        let mut timer = interval_at(tokio::time::Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        timer
    });

    let mut events = EventStream::new();
    let mut last_frame = Instant::now();
    let mut last_spin = Instant::now();

    loop {
        tokio::select! {
            _ = tick.tick() => {
                if app.is_busy() && last_spin.elapsed() >= SPINNER_STEP {
                    app.throbber.calc_next();
                    last_spin = Instant::now();
                    app.dirty = true;
                }
            }
            Some(Ok(event)) = events.next() => {
                handle_event(&mut app, &event);
            }
            Some(update) = updates.recv() => {
                app.handle_update(update);
            }
            () = async {
                match refresh.as_mut() {
                    Some(timer) => {
                        timer.tick().await;
                    }
                    None => std::future::pending().await,
                }
            } => {
                app.engine.poll();
            }
        }

        if app.should_quit {
            break;
        }

        if app.dirty && last_frame.elapsed() >= FRAME_TIME {
            terminal.draw(|frame| draw(frame, &mut app))?;
            app.dirty = false;
            last_frame = Instant::now();
        }
    }

    info!("Dashboard closed");
    Ok(())
}

fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let busy = app.is_busy();
    render_dashboard(frame, area, app.engine.view(), busy, &mut app.throbber);
}
