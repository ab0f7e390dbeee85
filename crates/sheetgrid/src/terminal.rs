//! Raw mode, alternate screen and mouse capture, held for the lifetime of a [`TerminalSession`].

use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use log::debug;
use log::warn;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::io::Stdout;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Owns the terminal while the UI runs. Dropping it restores the terminal, also when the UI
/// returns early with an error or unwinds from a panic.
pub struct TerminalSession {
    terminal: Tui,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = crossterm::execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        ) {
            restore();
            return Err(e);
        }
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(t) => t,
            Err(e) => {
                restore();
                return Err(e);
            }
        };
        debug!("terminal session started");
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore();
        if let Err(e) = self.terminal.show_cursor() {
            warn!("failed to show cursor: {e}");
        }
        debug!("terminal session ended");
    }
}

fn restore() {
    if let Err(e) = disable_raw_mode() {
        warn!("failed to leave raw mode: {e}");
    }
    if let Err(e) = crossterm::execute!(
        io::stdout(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    ) {
        warn!("failed to restore screen: {e}");
    }
}
