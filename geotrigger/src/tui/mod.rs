pub mod app;
pub mod component;
pub mod map;
pub mod shortcuts;
pub mod styles;
pub mod tabs;
pub mod toast;

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, EventStream};
use crossterm::execute;
use futures::StreamExt;
use log::info;
use ratatui::DefaultTerminal;

use geotrigger_core::config::{ConfigError, Settings};

use app::App;

pub fn run(
    settings: Settings,
    settings_path: &Path,
    settings_err: Option<ConfigError>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Marker glyphs must be in place before the map is first drawn
    map::icons::install_default_icons(settings.icons);

    // Setup terminal
    let mut terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;

    // Create app state
    let mut app = App::new(settings, settings_path, settings_err);

    // Run the main loop
    let result = tokio::runtime::Runtime::new()?.block_on(run_app(&mut terminal, &mut app));

    // Restore terminal
    execute!(io::stdout(), DisableMouseCapture)?;
    ratatui::restore();

    info!("Exiting with {} saved trigger(s)", app.config.saved.len());
    result
}

async fn run_app(
    terminal: &mut DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut event_stream = EventStream::new();
    let mut tick_interval = tokio::time::interval(Duration::from_millis(33));

    loop {
        // Force full redraw when tab switched (clears rendering artifacts)
        if app.force_redraw {
            terminal.clear()?;
            app.force_redraw = false;
        }

        terminal.draw(|f| {
            app::render::draw(f, app);
        })?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                app::events::handle_event(app, maybe_event)?;
            }
            _ = tick_interval.tick() => {
                app.tick();
            }
        }

        // Drain any queued events immediately to prevent scroll lag in Terminal.app
        while crossterm::event::poll(Duration::ZERO)? {
            let event = crossterm::event::read()?;
            app::events::handle_event(app, Some(Ok(event)))?;
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
