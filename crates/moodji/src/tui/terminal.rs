use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use eyre::{Context, Result, bail};
use ratatui::{Terminal, TerminalOptions, Viewport, backend::CrosstermBackend};
use std::io::{IsTerminal, Stdout, stdout};

/// Restore the terminal before the panic message is printed, so a crash
/// doesn't leave the shell in raw mode.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        original_hook(panic_info);
    }));
}

/// Minimum viewport height
const MIN_VIEWPORT_HEIGHT: u16 = 10;

/// Margin to leave below viewport for shell prompt
const VIEWPORT_BOTTOM_MARGIN: u16 = 2;

/// Guards terminal lifecycle: raw mode and an inline viewport on creation,
/// cleared viewport and cooked mode on drop.
///
/// The viewport is sized once, from the terminal height, when the guard is
/// created. Content taller than that is scrolled by the renderer.
pub struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    keep_output: bool,
    viewport_height: u16,
}

impl TerminalGuard {
    /// # Errors
    /// - stdout is not a terminal (piped or redirected)
    /// - terminal initialization fails
    pub fn new(keep_output: bool) -> Result<Self> {
        if !stdout().is_terminal() {
            bail!(
                "moodji needs a terminal (TTY) for interactive mode, but stdout is not one. \
                 Use `moodji predict <WORD>` from scripts."
            );
        }

        let (_, term_height) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport_height = term_height
            .saturating_sub(VIEWPORT_BOTTOM_MARGIN)
            .max(MIN_VIEWPORT_HEIGHT);

        enable_raw_mode().context("failed to enable raw mode")?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(viewport_height),
            },
        )
        .context("failed to create terminal with inline viewport")?;

        Ok(Self {
            terminal,
            keep_output,
            viewport_height,
        })
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best-effort: nothing useful to do with errors while tearing down
        if !self.keep_output {
            let _ = self.terminal.clear();
        }

        let _ = disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_hook_installation() {
        install_panic_hook();
        // Installing again replaces the previous hook
        install_panic_hook();
    }
}
