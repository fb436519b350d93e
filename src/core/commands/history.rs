use std::io::Write;

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

#[derive(Clone, Debug, Default)]
pub struct HistoryCommand;

impl HistoryCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for HistoryCommand {
    fn name(&self) -> &'static str {
        "history"
    }

    fn summary(&self) -> &'static str {
        "displaying the most recent commands with their numbers"
    }

    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        if !args.is_empty() {
            return Err(CommandError::NoArguments("history"));
        }

        for (index, line) in state.history.iter_indexed() {
            writeln!(out, "{}\t{}", index, line)?;
        }
        Ok(Flow::Continue)
    }
}
