use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use snipdex_core::Result;
use std::io::{self, stdout};

pub type CrosstermTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns the terminal while a screen is shown.
///
/// Raw mode, the alternate screen, mouse capture and focus reporting are
/// switched on in [`TerminalSession::enter`] and always switched back off
/// when the session is dropped, whichever way the screen exits.
pub struct TerminalSession {
    terminal: CrosstermTerminal,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let mut out = stdout();
        if let Err(e) = execute!(
            out,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange
        ) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }

        let backend = CrosstermBackend::new(out);
        let terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(e) => {
                restore_terminal(&mut stdout());
                return Err(e.into());
            }
        };
        tracing::debug!("terminal session started");
        Ok(TerminalSession { terminal })
    }

    pub fn terminal(&mut self) -> &mut CrosstermTerminal {
        &mut self.terminal
    }
}

fn restore_terminal(out: &mut impl io::Write) {
    let _ = disable_raw_mode();
    let _ = execute!(
        out,
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    );
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal(self.terminal.backend_mut());
        let _ = self.terminal.show_cursor();
        tracing::debug!("terminal session restored");
    }
}
