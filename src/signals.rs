//! Ctrl-C handling
//!
//! Timed playback and paced paste run on the calling thread. The handler
//! only raises a shared flag; the running loop checks it between
//! characters or steps and stops early.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::warn;

static INTERRUPT: OnceLock<Arc<AtomicBool>> = OnceLock::new();

/// The process-wide interrupt flag, installing the Ctrl-C handler on first use
pub fn interrupt_flag() -> Arc<AtomicBool> {
    let flag = INTERRUPT.get_or_init(|| {
        let flag = Arc::new(AtomicBool::new(false));
        let handler_flag = Arc::clone(&flag);
        if let Err(e) = ctrlc::set_handler(move || {
            handler_flag.store(true, Ordering::SeqCst);
        }) {
            warn!("Could not install Ctrl-C handler: {}", e);
        }
        flag
    });
    Arc::clone(flag)
}

/// Check if Ctrl-C was pressed and clear the flag
pub fn take_interrupt() -> bool {
    interrupt_flag().swap(false, Ordering::SeqCst)
}

/// Clear a stale interrupt before starting a new interruptible operation
pub fn reset_interrupt() {
    interrupt_flag().store(false, Ordering::SeqCst);
}
