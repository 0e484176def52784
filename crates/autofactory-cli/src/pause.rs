// Optional pause before exiting after a fatal error

use std::{
    io::{self, BufRead, Write},
    sync::atomic::{AtomicBool, Ordering},
};

static PAUSE_ON_ERROR: AtomicBool = AtomicBool::new(false);

/// Ask for a pause when the process exits with an error
pub fn request_pause_on_error(pause: bool) {
    PAUSE_ON_ERROR.store(pause, Ordering::Relaxed);
}

/// Whether a pause was requested
pub fn pause_requested() -> bool {
    PAUSE_ON_ERROR.load(Ordering::Relaxed)
}

/// Waits for Enter if a pause was requested
pub fn pause_if_requested() {
    if !pause_requested() {
        return;
    }
    eprint!("Press Enter to exit...");
    let _ = io::stderr().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
