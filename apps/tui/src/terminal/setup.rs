use color_eyre::eyre::{eyre, Result};
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout, Write};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Puts the terminal into dashboard mode. A failed step rolls back the ones before it.
pub fn setup_terminal() -> Result<Tui> {
    if let Ok((width, height)) = crossterm::terminal::size() {
        tracing::debug!(width, height, "entering dashboard mode");
    }

    enable_raw_mode().map_err(|e| eyre!("could not enable raw mode: {e}"))?;

    if let Err(e) = execute!(stdout(), EnterAlternateScreen) {
        cleanup_terminal_state(true, false);
        return Err(eyre!("could not enter the alternate screen: {e}"));
    }

    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout())) {
        Ok(terminal) => terminal,
        Err(e) => {
            cleanup_terminal_state(true, true);
            return Err(eyre!("could not create the terminal backend: {e}"));
        }
    };

    if let Err(e) = terminal.clear() {
        tracing::warn!(error = %e, "screen clear failed");
    }
    if let Err(e) = execute!(stdout(), cursor::Hide) {
        tracing::warn!(error = %e, "cursor hide failed");
    }

    Ok(terminal)
}

/// Leaves dashboard mode. Every step runs even when an earlier one failed.
pub fn cleanup_terminal_state(raw_mode: bool, alternate_screen: bool) {
    let mut out = stdout();

    if let Err(e) = execute!(out, cursor::Show) {
        tracing::warn!(error = %e, "cursor show failed");
    }
    if alternate_screen {
        if let Err(e) = execute!(out, LeaveAlternateScreen) {
            tracing::warn!(error = %e, "leaving the alternate screen failed");
        }
    }
    if raw_mode {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "disabling raw mode failed");
        }
    }

    // Keep the shell prompt off the last dashboard line.
    let _ = execute!(out, cursor::MoveToNextLine(1));
    let _ = out.flush();
    tracing::debug!("terminal restored");
}
