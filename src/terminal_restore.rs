//! Raw-mode bookkeeping that survives panics.
//!
//! The form UI owns the terminal while it runs. Every change that has to be
//! undone on the way out (raw mode, the alternate screen) is recorded in a
//! process-wide bitmask so both the RAII guard and the panic hook can roll
//! the terminal back, whichever exit path fires first.

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::any::Any;
use std::io::{self, Write};
use std::panic;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Once;

const RAW_MODE: u8 = 1 << 0;
const ALT_SCREEN: u8 = 1 << 1;

static TRACKED: AtomicU8 = AtomicU8::new(0);
static HOOK: Once = Once::new();

/// Undoes raw mode and the alternate screen when dropped.
///
/// Tracked state is global, so whichever of the guard or the panic hook runs
/// first does the rollback and leaves nothing for the other.
pub struct TerminalGuard;

impl TerminalGuard {
    #[must_use]
    pub fn new() -> Self {
        install_panic_restore_hook();
        TerminalGuard
    }

    /// Switch the terminal to raw mode and remember to undo it.
    ///
    /// # Errors
    ///
    /// Returns the underlying terminal error when raw mode is unavailable.
    pub fn enter_raw_mode(&self) -> io::Result<()> {
        enable_raw_mode()?;
        TRACKED.fetch_or(RAW_MODE, Ordering::SeqCst);
        Ok(())
    }

    /// Flip to the alternate screen and remember to undo it.
    ///
    /// # Errors
    ///
    /// Returns the write error when the switch sequence cannot be sent.
    pub fn enter_alternate_screen(&self, out: &mut impl Write) -> io::Result<()> {
        execute!(out, EnterAlternateScreen)?;
        TRACKED.fetch_or(ALT_SCREEN, Ordering::SeqCst);
        Ok(())
    }

    /// Roll the terminal back now instead of waiting for drop.
    pub fn restore(&self) {
        restore_terminal();
    }
}

impl Default for TerminalGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Undo every tracked terminal change and re-show the cursor.
pub fn restore_terminal() {
    let tracked = TRACKED.swap(0, Ordering::SeqCst);
    if tracked & RAW_MODE != 0 {
        let _ = disable_raw_mode();
    }
    let mut stdout = io::stdout();
    if tracked & ALT_SCREEN != 0 {
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
    // The cursor may be hidden even when nothing else is tracked.
    let _ = execute!(stdout, Show);
    let _ = stdout.flush();
}

/// Chain a hook ahead of the default panic handler that fixes the terminal
/// first, so the panic report prints onto a usable screen.
pub fn install_panic_restore_hook() {
    HOOK.call_once(|| {
        let inner = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            let location = info.location().map_or_else(
                || "unknown".to_string(),
                |loc| format!("{}:{}", loc.file(), loc.line()),
            );
            crate::log_panic(&location, &panic_text(info.payload()));
            crate::log_debug_content(&format!("panic: {info}"));
            inner(info);
        }));
    });
}

fn panic_text(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "opaque panic payload".to_string()
    }
}
