//! Terminal lifecycle management.
//!
//! Terminal state is restored on:
//! - Normal exit and error returns (via `TerminalGuard` drop)
//! - Panic (via the panic hook)
//! - SIGINT, SIGTERM, SIGHUP and SIGQUIT on Unix
//!
//! Only the first restore after setup touches the terminal, so the guard, the
//! panic hook and the signal watcher never emit the teardown sequence twice.

use crate::error::UiError;
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set while the dashboard owns the terminal
static TERMINAL_ACTIVE: AtomicBool = AtomicBool::new(false);

pub type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Restores the terminal when dropped
#[derive(Debug)]
pub struct TerminalGuard {
    _private: (),
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal() {
            tracing::warn!(error = %e, "failed to restore terminal");
        }
    }
}

fn init_error(e: impl std::fmt::Display) -> UiError {
    UiError::InitializationError(e.to_string())
}

/// Sets up the terminal for the dashboard.
///
/// - Checks that stdout is a terminal
/// - Enables raw mode
/// - Enters alternate screen and hides the cursor
///
/// The returned guard must outlive the terminal. Call `install_panic_hook()`
/// before this.
pub fn setup_terminal() -> Result<(CrosstermTerminal, TerminalGuard), UiError> {
    if !atty::is(atty::Stream::Stdout) {
        return Err(init_error("stdout is not a terminal"));
    }

    enable_raw_mode().map_err(init_error)?;
    TERMINAL_ACTIVE.store(true, Ordering::SeqCst);
    // From here on every early return restores the terminal.
    let guard = TerminalGuard { _private: () };

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide).map_err(init_error)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(init_error)?;

    Ok((terminal, guard))
}

/// Restores terminal state. Only the first call after `setup_terminal()` does
/// anything; later calls return `Ok(())`.
pub fn restore_terminal() -> io::Result<()> {
    if !TERMINAL_ACTIVE.swap(false, Ordering::SeqCst) {
        return Ok(());
    }
    let _ = execute!(io::stdout(), cursor::Show);
    execute!(io::stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()
}

/// Installs a panic hook that restores the terminal before printing the panic.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// Raw mode turns Ctrl+C into a key event, but `kill -INT` still arrives.
#[cfg(unix)]
const TERMINATION_SIGNALS: [i32; 4] = [
    signal_hook::consts::SIGINT,
    signal_hook::consts::SIGTERM,
    signal_hook::consts::SIGHUP,
    signal_hook::consts::SIGQUIT,
];

/// Restore the terminal and exit when the process is asked to terminate.
#[cfg(unix)]
pub fn install_signal_handler() -> Result<(), UiError> {
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new(TERMINATION_SIGNALS).map_err(init_error)?;

    std::thread::Builder::new()
        .name("signal-watcher".to_string())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                // May interleave with a frame being flushed by the main
                // thread; the process exits right after, so only the
                // teardown sequence has to reach the terminal.
                let _ = restore_terminal();
                tracing::warn!(signal, "terminated by signal");
                std::process::exit(128 + signal);
            }
        })
        .map_err(init_error)?;

    Ok(())
}

#[cfg(not(unix))]
pub fn install_signal_handler() -> Result<(), UiError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    // Terminal setup needs a real TTY. Checked by hand:
    // - quitting with q, Esc and Ctrl+C leaves the shell usable
    // - a failed fetch prints its error on the normal screen
    // - `kill <pid>` and `kill -INT <pid>` while loading restore the terminal
    // Rendering itself is covered with TestBackend in `app` and `layout`.
    use super::*;

    #[test]
    fn test_restore_without_setup_is_noop() {
        assert!(!TERMINAL_ACTIVE.load(Ordering::SeqCst));
        assert!(restore_terminal().is_ok());
        assert!(restore_terminal().is_ok());
        assert!(!TERMINAL_ACTIVE.load(Ordering::SeqCst));
    }

    #[cfg(unix)]
    #[test]
    fn test_termination_signals_include_interrupt() {
        use signal_hook::consts::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
        for signal in [SIGINT, SIGTERM, SIGHUP, SIGQUIT] {
            assert!(TERMINATION_SIGNALS.contains(&signal));
        }
    }
}
