use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use moodji_client::{Query, RequestController};

use super::state::AppState;

/// Key handling on top of the UI state and the session controller.
pub struct App {
    pub state: AppState,
    pub controller: RequestController,
    /// Submission accepted by the controller, waiting to be sent
    pending: Option<Query>,
}

impl App {
    pub fn new(controller: RequestController) -> Self {
        Self {
            state: AppState::new(),
            controller,
            pending: None,
        }
    }

    /// Handle a key event. Returns true if render is needed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Always available, even mid-request
        match key.code {
            KeyCode::Esc => {
                self.state.exit();
                return true;
            }
            KeyCode::Char('c') if ctrl => {
                self.state.exit();
                return true;
            }
            _ => {}
        }

        // The input is locked while a request is in flight
        if self.controller.is_loading() {
            return false;
        }

        if ctrl {
            return self.handle_ctrl_key(key.code);
        }

        match key.code {
            KeyCode::Enter => {
                if let Some(query) = self.controller.begin(&self.state.input) {
                    self.state.recent_cursor = None;
                    self.pending = Some(query);
                }
            }
            KeyCode::Tab => self.state.fill_next_example(),
            KeyCode::Up => {
                let recent = self.recent_words();
                self.state.cycle_recent(&recent, true);
            }
            KeyCode::Down => {
                let recent = self.recent_words();
                self.state.cycle_recent(&recent, false);
            }
            KeyCode::Char(c) => {
                self.state.insert_char(c);
                self.controller.dismiss_error();
            }
            KeyCode::Backspace => {
                self.state.backspace();
                self.controller.dismiss_error();
            }
            KeyCode::Delete => {
                self.state.delete();
                self.controller.dismiss_error();
            }
            KeyCode::Left => self.state.move_left(),
            KeyCode::Right => self.state.move_right(),
            KeyCode::Home => self.state.move_home(),
            KeyCode::End => self.state.move_end(),
            _ => return false,
        }

        true
    }

    fn handle_ctrl_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('l') => {
                self.state.clear_input();
                self.controller.clear_input();
            }
            KeyCode::Char('y') => {
                self.controller.copy_result();
            }
            KeyCode::Char('o') => self.state.toggle_history(),
            KeyCode::Char('r') => {
                self.controller.clear_recent();
                self.state.recent_cursor = None;
            }
            KeyCode::Char('x') => {
                self.controller.clear_history();
                self.state.recent_cursor = None;
            }
            KeyCode::Char('a') => self.state.move_home(),
            KeyCode::Char('e') => self.state.move_end(),
            _ => return false,
        }

        true
    }

    fn recent_words(&self) -> Vec<String> {
        self.controller.recent().iter().map(str::to_string).collect()
    }

    /// The submission to send, if Enter was just accepted.
    pub fn take_pending(&mut self) -> Option<Query> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use crossterm::event::KeyEventKind;
    use moodji_client::notify::FlagDurations;
    use moodji_client::{
        CapabilityError, Clipboard, NoHaptics, PredictError, PredictionResult,
        PredictionService, Sentiment,
    };

    use super::*;

    struct Fixed;

    #[async_trait]
    impl PredictionService for Fixed {
        async fn predict(&self, _word: &str) -> Result<PredictionResult, PredictError> {
            Ok(PredictionResult {
                emoji: "☕".to_string(),
                sentiment: Sentiment::Positive,
                confidence: 0.7,
            })
        }
    }

    struct NoClipboard;

    impl Clipboard for NoClipboard {
        fn write_text(&self, _text: &str) -> Result<(), CapabilityError> {
            Ok(())
        }
    }

    fn app() -> App {
        App::new(RequestController::new(
            Arc::new(Fixed),
            Arc::new(NoClipboard),
            Arc::new(NoHaptics),
            FlagDurations::default(),
        ))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new_with_kind(KeyCode::Char(c), KeyModifiers::CONTROL, KeyEventKind::Press)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn blank_enter_starts_nothing() {
        let mut app = app();
        type_text(&mut app, "   ");
        app.handle_key(key(KeyCode::Enter));

        assert!(app.take_pending().is_none());
        assert!(!app.controller.is_loading());
    }

    #[tokio::test]
    async fn enter_queues_submission_and_locks_input() {
        let mut app = app();
        type_text(&mut app, "Coffee");
        app.handle_key(key(KeyCode::Enter));

        assert!(app.controller.is_loading());
        type_text(&mut app, "xyz");
        assert_eq!(app.state.input, "Coffee");

        let query = app.take_pending().expect("submission queued");
        assert_eq!(query.canonical(), "coffee");

        let outcome = app.controller.service().predict(query.canonical()).await;
        app.controller.finish(query, outcome);

        assert!(!app.controller.is_loading());
        assert_eq!(app.controller.recent().get(0), Some("Coffee"));
    }

    #[tokio::test]
    async fn typing_dismisses_error() {
        let mut app = app();
        let query = app.controller.begin("x").unwrap();
        app.controller
            .finish(query, Err(PredictError::Service("word too short".into())));
        assert!(app.controller.error().is_some());

        type_text(&mut app, "a");
        assert!(app.controller.error().is_none());
    }

    #[tokio::test]
    async fn ctrl_l_clears_everything_visible() {
        let mut app = app();
        app.controller.submit("latte").await;
        app.state.set_input("latte");

        app.handle_key(ctrl('l'));

        assert!(app.state.input.is_empty());
        assert!(app.controller.result().is_none());
        assert_eq!(app.controller.history().len(), 1);
    }

    #[test]
    fn esc_exits_even_while_loading() {
        let mut app = app();
        app.controller.begin("rain");
        app.handle_key(key(KeyCode::Esc));
        assert!(app.state.should_exit);
    }

    #[tokio::test]
    async fn ctrl_r_forgets_recent_words_only() {
        let mut app = app();
        app.controller.submit("latte").await;
        app.controller.submit("mocha").await;
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.state.recent_cursor, Some(0));

        app.handle_key(ctrl('r'));

        assert!(app.controller.recent().is_empty());
        assert_eq!(app.controller.history().len(), 2);
        assert_eq!(app.state.recent_cursor, None);
    }

    #[test]
    fn ctrl_o_toggles_history() {
        let mut app = app();
        app.handle_key(ctrl('o'));
        assert!(app.state.show_history);
        app.handle_key(ctrl('o'));
        assert!(!app.state.show_history);
    }
}
