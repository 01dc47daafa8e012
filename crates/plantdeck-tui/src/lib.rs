//! Terminal dashboard for a plantdeck greenhouse sensor node.
//!
//! This crate ties the client library to a ratatui interface:
//!
//! - Terminal setup and restoration
//! - Channel creation between the UI loop and the [`NodeWorker`]
//! - The main event loop with input handling and rendering
//! - Graceful shutdown coordination

pub mod app;
pub mod config;
pub mod input;
pub mod messages;
pub mod ui;
pub mod worker;

pub use app::App;
pub use config::AppConfig;
pub use messages::{Command, UiEvent};
pub use worker::NodeWorker;

use std::io::{self, stdout};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::info;

use plantdeck_client::{NodeApi, NodeClient, TelemetrySeries};
use plantdeck_types::Theme;

/// Set up the terminal for TUI rendering.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the dashboard against the node at `server_url`.
///
/// Polling and a settings load start immediately; everything else is
/// driven by key input.
pub async fn run(server_url: &str, theme: Theme) -> Result<()> {
    let client = NodeClient::new(server_url)?;
    let base_url = client.base_url().to_string();
    info!(%base_url, "starting dashboard");

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(32);
    let (event_tx, event_rx) = mpsc::channel::<UiEvent>(64);
    let series = Arc::new(Mutex::new(TelemetrySeries::new()));

    let api: Arc<dyn NodeApi> = Arc::new(client);
    let worker = NodeWorker::new(cmd_rx, event_tx, api, Arc::clone(&series));
    let worker_handle = tokio::spawn(worker.run());

    let mut app = App::new(base_url, theme, series, cmd_tx.clone(), event_rx);

    // Start live telemetry, fetch settings, and run the initial unfiltered
    // history query up front.
    app.polling = true;
    let _ = cmd_tx.try_send(Command::StartPolling);
    let _ = cmd_tx.try_send(Command::LoadSettings);
    let _ = cmd_tx.try_send(Command::LoadHistory {
        filter: plantdeck_client::RangeFilter::all(),
    });

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app).await;

    // A bounded try_send could drop the shutdown if the channel were full,
    // leaving the worker running; wait for the slot instead.
    let _ = cmd_tx.send(Command::Shutdown).await;
    restore_terminal()?;
    let _ = worker_handle.await;

    result
}

/// Main event loop: draw, handle input, drain worker events.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let action =
                input::handle_key(key.code, app.tab, app.editing.is_some(), app.alert.is_some());
            if let Some(cmd) = input::apply_action(app, action) {
                let _ = app.command_tx.try_send(cmd);
            }
        }

        // Non-blocking drain of worker events.
        while let Ok(event) = app.event_rx.try_recv() {
            app.handle_event(event);
        }
    }

    Ok(())
}
