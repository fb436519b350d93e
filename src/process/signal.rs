use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::consts::SIGCHLD;

use crate::process::ProcessError;

/// Flags set from signal context and drained by the interpreter loop.
///
/// The handlers never print or touch shell state; they only store `true`.
#[derive(Clone, Debug, Default)]
pub struct Signals {
    interrupted: Arc<AtomicBool>,
    child_exited: Arc<AtomicBool>,
}

impl Signals {
    /// Install the SIGINT and SIGCHLD handlers. Only one `Signals` may be
    /// installed per process.
    pub fn install() -> Result<Self, ProcessError> {
        let signals = Signals::default();

        let interrupted = Arc::clone(&signals.interrupted);
        ctrlc::set_handler(move || {
            interrupted.store(true, Ordering::SeqCst);
        })
        .map_err(|e| ProcessError::SignalError(e.to_string()))?;

        signal_hook::flag::register(SIGCHLD, Arc::clone(&signals.child_exited))
            .map_err(|e| ProcessError::SignalError(e.to_string()))?;

        Ok(signals)
    }

    /// True once per interrupt since the last call.
    pub fn take_interrupt(&self) -> bool {
        self.interrupted.swap(false, Ordering::SeqCst)
    }

    pub fn take_child_exit(&self) -> bool {
        self.child_exited.swap(false, Ordering::SeqCst)
    }

    pub fn raise_interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }
}
