//! UI-only state for the interactive mode.
//!
//! Session state (results, history, notifications) lives in the
//! `RequestController`; this is just the text box and the bits of chrome
//! around it.

use std::time::Instant;

use moodji_client::EXAMPLE_WORDS;

use super::spinner::{ACTIVE_SPINNER, active_tick_interval};

pub struct AppState {
    /// Text in the input line
    pub input: String,
    /// Cursor position in the input, in chars
    pub cursor: usize,
    /// Whether the history panel is expanded
    pub show_history: bool,
    /// Next example word Tab will insert
    pub next_example: usize,
    /// Position while cycling through recent words with Up/Down
    pub recent_cursor: Option<usize>,
    pub should_exit: bool,
    pub spinner_frame: usize,
    pub last_spinner_tick: Instant,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
            show_history: false,
            next_example: 0,
            recent_cursor: None,
            should_exit: false,
            spinner_frame: 0,
            last_spinner_tick: Instant::now(),
        }
    }

    // ===== Input editing =====

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
        self.recent_cursor = None;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.input.remove(at);
        self.recent_cursor = None;
    }

    pub fn delete(&mut self) {
        if self.cursor < self.input.chars().count() {
            let at = self.byte_offset(self.cursor);
            self.input.remove(at);
            self.recent_cursor = None;
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    /// Replace the whole input, cursor at the end
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.cursor = self.input.chars().count();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
        self.recent_cursor = None;
    }

    // ===== Shortcuts =====

    /// Put the next example word in the input
    pub fn fill_next_example(&mut self) {
        let word = EXAMPLE_WORDS[self.next_example % EXAMPLE_WORDS.len()];
        self.next_example = (self.next_example + 1) % EXAMPLE_WORDS.len();
        self.recent_cursor = None;
        self.set_input(word);
    }

    /// Step through recent words (older with `older = true`) and put the
    /// selected one in the input. Does nothing without recent words.
    pub fn cycle_recent(&mut self, recent: &[String], older: bool) {
        if recent.is_empty() {
            return;
        }

        let last = recent.len() - 1;
        let next = match (self.recent_cursor, older) {
            (None, true) => 0,
            (None, false) => last,
            (Some(i), true) => (i + 1).min(last),
            (Some(i), false) => i.saturating_sub(1),
        };

        self.recent_cursor = Some(next);
        self.set_input(&recent[next]);
    }

    pub fn toggle_history(&mut self) {
        self.show_history = !self.show_history;
    }

    pub fn exit(&mut self) {
        self.should_exit = true;
    }

    /// Advance spinner frame if enough time has passed. Called on every tick,
    /// only moves when the spinner's own interval has elapsed.
    pub fn tick(&mut self) {
        if self.last_spinner_tick.elapsed() >= active_tick_interval() {
            self.spinner_frame = (self.spinner_frame + 1) % ACTIVE_SPINNER.frame_count();
            self.last_spinner_tick = Instant::now();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_multibyte_input() {
        let mut state = AppState::new();
        for c in "café".chars() {
            state.insert_char(c);
        }
        assert_eq!(state.cursor, 4);

        state.backspace();
        assert_eq!(state.input, "caf");

        state.move_home();
        state.delete();
        assert_eq!(state.input, "af");

        state.move_right();
        state.insert_char('é');
        assert_eq!(state.input, "aéf");
    }

    #[test]
    fn examples_cycle() {
        let mut state = AppState::new();
        state.fill_next_example();
        assert_eq!(state.input, "sunshine");
        state.fill_next_example();
        assert_eq!(state.input, "coffee");

        for _ in 0..EXAMPLE_WORDS.len() - 2 {
            state.fill_next_example();
        }
        state.fill_next_example();
        assert_eq!(state.input, "sunshine");
    }

    #[test]
    fn recent_cycle_clamps() {
        let recent = vec!["rain".to_string(), "love".to_string()];
        let mut state = AppState::new();

        state.cycle_recent(&recent, true);
        assert_eq!(state.input, "rain");
        state.cycle_recent(&recent, true);
        assert_eq!(state.input, "love");
        state.cycle_recent(&recent, true);
        assert_eq!(state.input, "love");
        state.cycle_recent(&recent, false);
        assert_eq!(state.input, "rain");

        state.cycle_recent(&[], true);
        assert_eq!(state.input, "rain");
    }
}
