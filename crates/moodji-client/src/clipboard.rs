//! Copying the current verdict to the clipboard.

use std::sync::Arc;

use crate::effects::{COPY_PATTERN, Haptics, pulse};
use crate::error::CapabilityError;
use crate::notify::{Flag, NotificationTimer};
use crate::result::PredictionResult;

/// Write-only clipboard capability.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), CapabilityError>;
}

/// `"<word> = <emoji> <sentiment> (<pct>%)"`
pub fn format_result(word: &str, result: &PredictionResult) -> String {
    format!(
        "{word} = {} {} ({}%)",
        result.emoji,
        result.sentiment,
        result.percent()
    )
}

pub struct ClipboardExporter {
    clipboard: Arc<dyn Clipboard>,
    haptics: Arc<dyn Haptics>,
    notifications: NotificationTimer,
}

impl ClipboardExporter {
    pub fn new(
        clipboard: Arc<dyn Clipboard>,
        haptics: Arc<dyn Haptics>,
        notifications: NotificationTimer,
    ) -> Self {
        Self {
            clipboard,
            haptics,
            notifications,
        }
    }

    /// Copy the formatted result.
    ///
    /// The copy is best-effort: a failed write is logged, and the
    /// confirmation flag and haptic pulse happen either way.
    pub fn export(&self, word: &str, result: &PredictionResult) {
        let text = format_result(word, result);

        match self.clipboard.write_text(&text) {
            Ok(()) => tracing::debug!(%text, "copied result to clipboard"),
            Err(e) => tracing::warn!("failed to copy result to clipboard: {e}"),
        }

        self.notifications.trigger(Flag::CopyConfirmation);
        pulse(self.haptics.as_ref(), COPY_PATTERN);
    }
}

impl std::fmt::Debug for ClipboardExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardExporter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::effects::NoHaptics;
    use crate::result::Sentiment;

    #[derive(Default)]
    struct Recording(Mutex<Vec<String>>);

    impl Clipboard for Recording {
        fn write_text(&self, text: &str) -> Result<(), CapabilityError> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct Unavailable;

    impl Clipboard for Unavailable {
        fn write_text(&self, _text: &str) -> Result<(), CapabilityError> {
            Err(CapabilityError::Clipboard("no display".into()))
        }
    }

    fn sunshine() -> PredictionResult {
        PredictionResult {
            emoji: "☀️".to_string(),
            sentiment: Sentiment::Positive,
            confidence: 0.93,
        }
    }

    #[test]
    fn formats_result() {
        assert_eq!(
            format_result("sunshine", &sunshine()),
            "sunshine = ☀️ positive (93%)"
        );
    }

    #[tokio::test]
    async fn writes_and_confirms() {
        let clipboard = Arc::new(Recording::default());
        let timer = NotificationTimer::default();
        let exporter = ClipboardExporter::new(clipboard.clone(), Arc::new(NoHaptics), timer.clone());

        exporter.export("sunshine", &sunshine());

        assert_eq!(
            *clipboard.0.lock().unwrap(),
            vec!["sunshine = ☀️ positive (93%)".to_string()]
        );
        assert!(timer.is_active(Flag::CopyConfirmation));
    }

    #[tokio::test]
    async fn confirms_even_when_the_write_fails() {
        let timer = NotificationTimer::default();
        let exporter = ClipboardExporter::new(Arc::new(Unavailable), Arc::new(NoHaptics), timer.clone());

        exporter.export("sunshine", &sunshine());

        assert!(timer.is_active(Flag::CopyConfirmation));
    }
}
