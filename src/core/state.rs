use std::env;

use crate::core::config::ShellConfig;
use crate::input::History;

/// Everything the builtins read or change. Owned by the interpreter.
#[derive(Debug)]
pub struct ShellState {
    current_dir: String,
    previous_dir: Option<String>,
    pub history: History,
}

impl ShellState {
    pub fn new(config: &ShellConfig) -> Self {
        ShellState {
            current_dir: read_current_dir(),
            previous_dir: None,
            history: History::new(config.history_capacity, config.max_line),
        }
    }

    pub fn current_dir(&self) -> &str {
        &self.current_dir
    }

    pub fn previous_dir(&self) -> Option<&str> {
        self.previous_dir.as_deref()
    }

    /// Re-read the process cwd after a successful change, remembering the
    /// directory we just left.
    pub fn record_dir_change(&mut self, left: String) {
        self.previous_dir = Some(left);
        self.refresh_current_dir();
    }

    pub fn refresh_current_dir(&mut self) {
        self.current_dir = read_current_dir();
    }
}

fn read_current_dir() -> String {
    env::current_dir()
        .map(|dir| dir.to_string_lossy().into_owned())
        .unwrap_or_default()
}
