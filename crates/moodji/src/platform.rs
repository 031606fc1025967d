//! Platform capabilities handed to the session controller.

use std::io::Write;
use std::sync::Arc;

use moodji_client::{CapabilityError, Clipboard, Haptics, NoHaptics};

/// The system clipboard, when built with the `clipboard` feature.
pub fn clipboard() -> Arc<dyn Clipboard> {
    Arc::new(SystemClipboard)
}

/// Terminal bell when haptics are enabled, nothing otherwise.
pub fn haptics(enabled: bool) -> Arc<dyn Haptics> {
    if enabled {
        Arc::new(TerminalBell)
    } else {
        Arc::new(NoHaptics)
    }
}

pub struct SystemClipboard;

#[cfg(all(
    feature = "clipboard",
    any(target_os = "windows", target_os = "macos", target_os = "linux")
))]
impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), CapabilityError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| CapabilityError::Clipboard(e.to_string()))?;

        clipboard
            .set_text(text)
            .map_err(|e| CapabilityError::Clipboard(e.to_string()))
    }
}

#[cfg(not(all(
    feature = "clipboard",
    any(target_os = "windows", target_os = "macos", target_os = "linux")
)))]
impl Clipboard for SystemClipboard {
    fn write_text(&self, _text: &str) -> Result<(), CapabilityError> {
        Err(CapabilityError::Clipboard(
            "built without clipboard support".to_string(),
        ))
    }
}

/// A terminal has no vibration motor; the closest thing is the bell. Rings
/// once per pattern, whatever its length.
pub struct TerminalBell;

impl Haptics for TerminalBell {
    fn vibrate(&self, pattern: &[u64]) -> Result<(), CapabilityError> {
        if pattern.is_empty() {
            return Ok(());
        }

        let mut stderr = std::io::stderr();
        stderr
            .write_all(b"\x07")
            .and_then(|()| stderr.flush())
            .map_err(|e| CapabilityError::Haptics(e.to_string()))
    }
}
