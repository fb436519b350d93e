use std::fmt;
use std::process::ExitStatus;

pub mod executor;
pub mod signal;

pub use executor::ProcessExecutor;
pub use signal::Signals;

/// What happened to a launched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutcome {
    Backgrounded { pid: u32 },
    Completed { pid: u32, status: ExitStatus },
}

#[derive(Debug)]
pub enum ProcessError {
    /// The child process could not be created at all.
    Spawn(std::io::Error),
    /// The child was created but the program could not be run.
    Exec {
        program: String,
        source: std::io::Error,
    },
    Wait(std::io::Error),
    SignalError(String),
}

impl ProcessError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProcessError::Spawn(_) | ProcessError::SignalError(_))
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Spawn(e) => write!(f, "fork failed: {}", e),
            ProcessError::Exec { program, source } => write!(f, "{}: {}", program, source),
            ProcessError::Wait(e) => write!(f, "wait failed: {}", e),
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Spawn(e) | ProcessError::Wait(e) => Some(e),
            ProcessError::Exec { source, .. } => Some(source),
            ProcessError::SignalError(_) => None,
        }
    }
}
