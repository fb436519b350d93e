use std::io::Write;

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

#[derive(Clone, Debug, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn summary(&self) -> &'static str {
        "exiting the shell program"
    }

    fn execute(
        &self,
        args: &[String],
        _state: &mut ShellState,
        _out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        if !args.is_empty() {
            return Err(CommandError::NoArguments("exit"));
        }
        Ok(Flow::Exit)
    }
}

#[derive(Clone, Debug, Default)]
pub struct PwdCommand;

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn summary(&self) -> &'static str {
        "displaying the current working directory"
    }

    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        if !args.is_empty() {
            return Err(CommandError::NoArguments("pwd"));
        }
        writeln!(out, "{}", state.current_dir())?;
        Ok(Flow::Continue)
    }
}
