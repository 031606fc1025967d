use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use eyre::{Result, eyre};
use futures::StreamExt;
use std::time::Duration;
use tokio::time;

/// Base tick interval for the event loop. Fast enough for the spinner and
/// for notification banners to disappear on time.
const BASE_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Events that drive the interactive UI.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input (Press events only)
    Key(KeyEvent),

    /// Periodic tick: spinner, expiring banners, and polling the in-flight
    /// request
    Tick,

    /// Terminal resize (width, height)
    Resize(u16, u16),
}

/// Async event loop with prioritized event handling.
///
/// Keyboard input wins over ticks (`biased` select), so typing stays
/// responsive. Ctrl+C outside raw mode and stdin EOF both flag shutdown.
pub struct EventLoop {
    /// Terminal event stream (created lazily on first run)
    reader: Option<EventStream>,

    /// Tick interval timer (created lazily on first run)
    tick_timer: Option<time::Interval>,

    /// Shutdown flag - when true, event loop will terminate
    shutdown: bool,
}

impl EventLoop {
    pub fn new() -> Self {
        Self {
            reader: None,
            tick_timer: None,
            shutdown: false,
        }
    }

    /// Wait for the next application event.
    ///
    /// # Errors
    /// Returns an error if the terminal event stream fails. Stream close is
    /// handled as a shutdown signal instead.
    pub async fn run(&mut self) -> Result<AppEvent> {
        let reader = self.reader.get_or_insert_with(EventStream::new);

        // Reused across calls to keep a steady rhythm
        let tick_timer = self.tick_timer.get_or_insert_with(|| {
            let mut interval = time::interval(BASE_TICK_INTERVAL);
            interval.set_missed_tick_behavior(time::MissedTickBehavior::Skip);
            // Skip the first immediate tick
            interval.reset();
            interval
        });

        loop {
            if self.shutdown {
                break;
            }

            let event = tokio::select! {
                biased;

                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            Some(AppEvent::Key(key))
                        }
                        Some(Ok(Event::Resize(w, h))) => Some(AppEvent::Resize(w, h)),
                        Some(Err(e)) => {
                            return Err(eyre!("terminal event error: {}", e));
                        }
                        None => {
                            // stdin EOF
                            self.shutdown = true;
                            None
                        }
                        // Key releases, mouse, focus, paste
                        _ => None,
                    }
                }

                _ = tick_timer.tick() => Some(AppEvent::Tick),

                _ = tokio::signal::ctrl_c() => {
                    self.shutdown = true;
                    // One more event so the caller gets to clean up
                    Some(AppEvent::Tick)
                }
            };

            if let Some(app_event) = event {
                return Ok(app_event);
            }
        }

        Ok(AppEvent::Tick)
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown
    }

    /// Takes effect on the next iteration of `run()`.
    pub fn shutdown(&mut self) {
        self.shutdown = true;
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_flag() {
        let mut event_loop = EventLoop::new();
        assert!(!event_loop.is_shutdown());

        event_loop.shutdown();
        assert!(event_loop.is_shutdown());
    }

    // run() needs a TTY, so it is only exercised by hand.
}
