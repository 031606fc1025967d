//! Spinner shown while a prediction is loading.

use std::time::Duration;

pub const ACTIVE_SPINNER: SpinnerStyle = SpinnerStyle::Dots;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStyle {
    /// / - \ |
    Line,
    /// Braille dots
    Dots,
    /// Moon phases, for a bit of mood
    Moon,
}

impl SpinnerStyle {
    pub const fn frames(&self) -> &'static [&'static str] {
        match self {
            SpinnerStyle::Line => &["/", "-", "\\", "|"],
            SpinnerStyle::Dots => &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            SpinnerStyle::Moon => &["🌑", "🌒", "🌓", "🌔", "🌕", "🌖", "🌗", "🌘"],
        }
    }

    /// Faster spinners need shorter intervals to look smooth
    pub const fn tick_interval(&self) -> Duration {
        match self {
            SpinnerStyle::Line => Duration::from_millis(150),
            SpinnerStyle::Dots => Duration::from_millis(80),
            SpinnerStyle::Moon => Duration::from_millis(120),
        }
    }

    pub fn frame_at(&self, index: usize) -> &'static str {
        let frames = self.frames();
        frames[index % frames.len()]
    }

    pub fn frame_count(&self) -> usize {
        self.frames().len()
    }
}

pub fn active_frame(index: usize) -> &'static str {
    ACTIVE_SPINNER.frame_at(index)
}

pub fn active_tick_interval() -> Duration {
    ACTIVE_SPINNER.tick_interval()
}
