use std::fmt;

/// What a `!` reference resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// A stored line to tokenize and run in place of the reference.
    Line(String),
    /// `!-` wiped the history; nothing runs this turn.
    Cleared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    NoPrevious,
    OutOfRange(String),
    Invalid(String),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::NoPrevious => write!(f, "no previous command"),
            HistoryError::OutOfRange(n) => {
                write!(f, "!{}: number does not exist in history", n)
            }
            HistoryError::Invalid(token) => write!(f, "{}: invalid ! command", token),
        }
    }
}

impl std::error::Error for HistoryError {}
