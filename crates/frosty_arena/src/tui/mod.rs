//! Terminal UI for watching a match.

mod app;
mod ui;

pub use app::App;

use crate::orchestrator::{MatchOutcome, Orchestrator};
use crate::sink::ChannelSink;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

/// How long to wait for a key press between redraws.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs `orchestrator` on a background task and renders it until the user quits.
///
/// Returns the outcome if the match finished, `None` if the user quit first.
#[instrument(skip_all)]
pub async fn run_match_tui(orchestrator: Orchestrator) -> Result<Option<MatchOutcome>> {
    info!("Starting match TUI");

    let (sink, mut event_rx) = ChannelSink::channel();
    let mut match_task: JoinHandle<MatchOutcome> = tokio::spawn(async move {
        let mut sink = sink;
        orchestrator.run(&mut sink).await
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let res = event_loop(&mut terminal, &mut app, &mut event_rx, &mut match_task).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match res {
        Ok(Some(outcome)) => Ok(Some(outcome)),
        Ok(None) => {
            info!("User quit before the match finished");
            match_task.abort();
            Ok(None)
        }
        Err(e) => {
            error!(error = ?e, "TUI loop error");
            match_task.abort();
            Err(e)
        }
    }
}

/// Draws, drains match events and handles keys until `q`.
async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    event_rx: &mut tokio::sync::mpsc::UnboundedReceiver<crate::sink::MatchEvent>,
    match_task: &mut JoinHandle<MatchOutcome>,
) -> Result<Option<MatchOutcome>> {
    let mut outcome = None;

    loop {
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }

        if outcome.is_none() && match_task.is_finished() {
            // Pick up events sent just before the task ended.
            while let Ok(event) = event_rx.try_recv() {
                app.handle_event(event);
            }
            outcome = Some((&mut *match_task).await?);
            debug!(?outcome, "Match task finished");
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    return Ok(outcome);
                }
            }
        }

        tokio::task::yield_now().await;
    }
}
