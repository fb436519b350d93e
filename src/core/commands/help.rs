use std::io::Write;

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;

#[derive(Clone, Debug)]
pub struct HelpCommand {
    summaries: Vec<(&'static str, &'static str)>,
}

impl HelpCommand {
    pub const SELF_SUMMARY: &'static str =
        "displaying help information on internal commands";

    pub fn new(summaries: Vec<(&'static str, &'static str)>) -> Self {
        Self { summaries }
    }

    pub fn list_all(&self, out: &mut dyn Write) -> Result<(), CommandError> {
        for (name, summary) in &self.summaries {
            writeln!(out, "{:<8} {}", name, summary)?;
        }
        Ok(())
    }

    fn describe(&self, name: &str, out: &mut dyn Write) -> Result<(), CommandError> {
        match self.summaries.iter().find(|(known, _)| *known == name) {
            Some((known, summary)) => {
                writeln!(out, "'{}' is a builtin command for {}", known, summary)?
            }
            None => writeln!(out, "'{}' is an external command or application", name)?,
        }
        Ok(())
    }
}

impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn summary(&self) -> &'static str {
        Self::SELF_SUMMARY
    }

    fn execute(
        &self,
        args: &[String],
        _state: &mut ShellState,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        match args {
            [] => self.list_all(out)?,
            [name] => self.describe(name, out)?,
            _ => return Err(CommandError::TooManyArguments("help")),
        }
        Ok(Flow::Continue)
    }
}
