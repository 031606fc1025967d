use std::io::Write;

use eyre::{Context, Result};
use moodji_client::{PredictError, PredictionResult, Query, RequestController};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::tui::{
    App, AppEvent, AppState, EventLoop, TerminalGuard, calculate_needed_height,
    install_panic_hook, render,
};

type Outcome = Result<PredictionResult, PredictError>;

/// The request currently on the wire, with the submission it belongs to.
struct InFlight {
    query: Query,
    handle: JoinHandle<Outcome>,
}

/// Writes one JSON line per state change, for replaying UI bugs.
struct DebugStateLogger {
    file: std::fs::File,
    entry_count: usize,
    width: u16,
}

impl DebugStateLogger {
    fn new(path: &str) -> Result<Self> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create debug state file: {path}"))?;
        let (width, _) = crossterm::terminal::size().unwrap_or((80, 24));
        Ok(Self {
            file,
            entry_count: 0,
            width,
        })
    }

    fn log(&mut self, label: &str, app: &App) {
        self.entry_count += 1;
        let timestamp_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        let session = app.controller.snapshot();
        let height = calculate_needed_height(&session, &app.state);

        let entry = serde_json::json!({
            "entry": self.entry_count,
            "label": label,
            "timestamp_ms": timestamp_ms,
            "session": session,
            "ui": ui_to_json(&app.state),
            "width": self.width,
            "height": height,
        });

        if let Err(e) = writeln!(self.file, "{entry}") {
            tracing::warn!("failed to write debug state: {e}");
        }
        let _ = self.file.flush();
    }
}

fn ui_to_json(state: &AppState) -> serde_json::Value {
    serde_json::json!({
        "input": state.input,
        "cursor": state.cursor,
        "show_history": state.show_history,
        "recent_cursor": state.recent_cursor,
    })
}

pub async fn run(controller: RequestController, keep: bool, debug_state: Option<String>) -> Result<()> {
    install_panic_hook();

    let mut guard = TerminalGuard::new(keep)?;
    let mut app = App::new(controller);
    debug!(viewport = guard.viewport_height(), "interactive session started");

    let mut debug_logger = debug_state
        .map(|path| DebugStateLogger::new(&path))
        .transpose()?;

    macro_rules! log_state {
        ($label:expr) => {
            if let Some(ref mut logger) = debug_logger {
                logger.log($label, &app);
            }
        };
    }

    log_state!("init");

    let mut event_loop = EventLoop::new();
    let mut in_flight: Option<InFlight> = None;

    loop {
        let session = app.controller.snapshot();

        // Cursor position reads can fail mid-resize; the next frame will do
        if let Err(e) = guard
            .terminal()
            .draw(|frame| render(frame, &session, &app.state))
        {
            let err_msg = e.to_string();
            if err_msg.contains("cursor position") {
                debug!("skipping frame after cursor position read error: {err_msg}");
            } else {
                return Err(e.into());
            }
        }

        match event_loop.run().await? {
            AppEvent::Key(key) => {
                if app.handle_key(key) {
                    log_state!("key");
                }
            }
            AppEvent::Tick => {
                app.state.tick();

                if in_flight.as_ref().is_some_and(|r| r.handle.is_finished())
                    && let Some(InFlight { query, handle }) = in_flight.take()
                {
                    let outcome = match handle.await {
                        Ok(outcome) => outcome,
                        Err(e) => Err(PredictError::Transport(e.to_string())),
                    };
                    app.controller.finish(query, outcome);
                    log_state!("finish");
                }
            }
            AppEvent::Resize(width, height) => {
                trace!(width, height, "terminal resized");
            }
        }

        if event_loop.is_shutdown() {
            app.state.exit();
        }

        if app.state.should_exit {
            break;
        }

        if let Some(query) = app.take_pending() {
            let service = app.controller.service();
            let canonical = query.canonical().to_string();
            let handle = tokio::spawn(async move { service.predict(&canonical).await });

            in_flight = Some(InFlight { query, handle });
            log_state!("submit");
        }
    }

    if let Some(request) = in_flight {
        debug!("exiting with a request in flight, dropping it");
        request.handle.abort();
    }

    log_state!("exit");
    Ok(())
}
