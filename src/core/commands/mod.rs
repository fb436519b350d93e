use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

mod builtin;
mod cd;
mod help;
mod history;

pub use builtin::{ExitCommand, PwdCommand};
pub use cd::CdCommand;
pub use help::HelpCommand;
pub use history::HistoryCommand;

use crate::core::state::ShellState;

#[derive(Debug)]
pub enum CommandError {
    NoArguments(&'static str),
    TooManyArguments(&'static str),
    HomeNotSet,
    ChangeDir {
        path: PathBuf,
        source: std::io::Error,
    },
    IoError(std::io::Error),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::NoArguments(cmd) => write!(f, "{} does not take any arguments", cmd),
            CommandError::TooManyArguments(cmd) => write!(f, "{}: too many arguments", cmd),
            CommandError::HomeNotSet => write!(f, "cd: HOME not set"),
            CommandError::ChangeDir { path, source } => {
                write!(f, "cd: {}: {}", path.display(), source)
            }
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::ChangeDir { source, .. } => Some(source),
            CommandError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

/// Whether the interpreter keeps looping after a builtin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub trait Command {
    fn name(&self) -> &'static str;

    /// One-line description used by `help`.
    fn summary(&self) -> &'static str;

    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError>;
}

#[derive(Clone, Debug)]
enum CommandType {
    Exit(ExitCommand),
    Pwd(PwdCommand),
    Cd(CdCommand),
    Help(HelpCommand),
    History(HistoryCommand),
}

impl CommandType {
    fn as_command(&self) -> &dyn Command {
        match self {
            CommandType::Exit(cmd) => cmd,
            CommandType::Pwd(cmd) => cmd,
            CommandType::Cd(cmd) => cmd,
            CommandType::Help(cmd) => cmd,
            CommandType::History(cmd) => cmd,
        }
    }
}

/// The builtin table. Lookups are by exact command name.
#[derive(Clone, Debug)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut executor = Self {
            commands: BTreeMap::new(),
        };

        executor.register(CommandType::Exit(ExitCommand::new()));
        executor.register(CommandType::Pwd(PwdCommand::new()));
        executor.register(CommandType::Cd(CdCommand::new()));
        executor.register(CommandType::History(HistoryCommand::new()));

        // help lists the table, so it goes in last with a snapshot of it
        let summaries = executor.summaries_with(HelpCommand::SELF_SUMMARY);
        executor.register(CommandType::Help(HelpCommand::new(summaries)));

        executor
    }

    fn register(&mut self, command: CommandType) {
        let name = command.as_command().name();
        self.commands.insert(name, command);
    }

    fn summaries_with(&self, help_summary: &'static str) -> Vec<(&'static str, &'static str)> {
        let mut summaries: Vec<_> = self
            .commands
            .values()
            .map(|cmd| (cmd.as_command().name(), cmd.as_command().summary()))
            .collect();
        summaries.push(("help", help_summary));
        summaries.sort_unstable_by_key(|(name, _)| *name);
        summaries
    }

    /// Run `args[0]` if it names a builtin. `None` means it is external.
    pub fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Option<Result<Flow, CommandError>> {
        let (name, rest) = args.split_first()?;
        let command = self.commands.get(name.as_str())?;
        Some(command.as_command().execute(rest, state, out))
    }

    /// The `help` listing, used for interrupts as well.
    pub fn print_help(&self, out: &mut dyn Write) -> Result<(), CommandError> {
        match self.commands.get("help") {
            Some(CommandType::Help(help)) => help.list_all(out),
            _ => Ok(()),
        }
    }
}
