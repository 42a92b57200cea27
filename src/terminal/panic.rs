//! Panic hook that gives the terminal back before the panic is reported.

use super::setup::emergency_restore;
use std::panic;

/// Install once, before creating the [`TerminalManager`](super::TerminalManager).
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        emergency_restore();
        tracing::error!(panic = %panic_info, "Panicked");
        original_hook(panic_info);
    }));
}
