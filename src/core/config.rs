use std::{env, fmt};

pub const HISTSIZE_VAR: &str = "RINGSH_HISTSIZE";

/// Limits and prompt text for one shell session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Longest single command line, in bytes.
    pub max_line: usize,
    pub history_capacity: usize,
    pub prompt_marker: &'static str,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            max_line: 1024,
            history_capacity: 10,
            prompt_marker: "$ ",
        }
    }
}

impl ShellConfig {
    /// Defaults with the environment overrides applied.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ShellConfig::default();

        if let Some(value) = lookup(HISTSIZE_VAR) {
            config.history_capacity = match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: HISTSIZE_VAR,
                        value,
                    })
                }
            };
        }

        Ok(config)
    }

    pub fn prompt(&self, current_dir: &str) -> String {
        format!("{}{}", current_dir, self.prompt_marker)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value for {}: {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
