use crate::core::commands::CommandError;
use crate::input::HistoryError;
use crate::process::ProcessError;

#[derive(Debug)]
pub enum ShellError {
    Readline(rustyline::error::ReadlineError),
    Io(std::io::Error),
    CommandError(CommandError),
    HistoryError(HistoryError),
    ProcessError(ProcessError),
}

impl ShellError {
    /// Errors after which the loop cannot usefully go on.
    pub fn is_fatal(&self) -> bool {
        match self {
            ShellError::Readline(_) => true,
            ShellError::ProcessError(e) => e.is_fatal(),
            _ => false,
        }
    }
}

impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ShellError::Readline(err)
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<CommandError> for ShellError {
    fn from(err: CommandError) -> Self {
        ShellError::CommandError(err)
    }
}

impl From<HistoryError> for ShellError {
    fn from(err: HistoryError) -> Self {
        ShellError::HistoryError(err)
    }
}

impl From<ProcessError> for ShellError {
    fn from(err: ProcessError) -> Self {
        ShellError::ProcessError(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Readline(e) => write!(f, "Readline error: {}", e),
            ShellError::Io(e) => write!(f, "IO error: {}", e),
            ShellError::CommandError(e) => write!(f, "Error: {}", e),
            ShellError::HistoryError(e) => write!(f, "Error: {}", e),
            ShellError::ProcessError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ShellError {}
