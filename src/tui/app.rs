//! Terminal application wrapper with RAII setup/teardown.

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};

/// Type alias for the terminal with crossterm backend.
pub type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// RAII wrapper for terminal setup and teardown.
///
/// Enables raw mode and the alternate screen on creation. Dropping it leaves the alternate
/// screen and shows the cursor again, including when the prompt unwinds with an error.
pub struct TerminalApp {
    terminal: TuiTerminal,
}

impl TerminalApp {
    /// Creates a new terminal application, setting up raw mode and alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        debug!("terminal ready");
        Ok(Self { terminal })
    }

    /// Returns a mutable reference to the underlying terminal.
    pub fn terminal(&mut self) -> &mut TuiTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalApp {
    fn drop(&mut self) {
        // Attempt to restore terminal state, ignoring errors during cleanup
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
        debug!("terminal restored");
    }
}
