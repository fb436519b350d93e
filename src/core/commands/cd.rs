use std::env;
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use super::{Command, CommandError, Flow};
use crate::core::state::ShellState;
use crate::path::PathExpander;

#[derive(Clone, Debug, Default)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }

    /// Where `cd` should go, or `None` for `cd -` with nowhere to go back to.
    fn target(&self, arg: Option<&str>, state: &ShellState) -> Result<Option<PathBuf>, CommandError> {
        match arg {
            None => self.home().map(Some),
            Some("-") => Ok(state.previous_dir().map(PathBuf::from)),
            Some(path) if self.path_expander.is_home_path(path) => self
                .path_expander
                .expand(path)
                .map(Some)
                .ok_or(CommandError::HomeNotSet),
            Some(path) => Ok(Some(PathBuf::from(path))),
        }
    }

    fn home(&self) -> Result<PathBuf, CommandError> {
        self.path_expander
            .get_home_dir()
            .ok_or(CommandError::HomeNotSet)
    }
}

impl Command for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn summary(&self) -> &'static str {
        "changing the current working directory"
    }

    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        _out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        if args.len() > 1 {
            return Err(CommandError::TooManyArguments("cd"));
        }

        let Some(target) = self.target(args.first().map(String::as_str), state)? else {
            debug!("cd -: no previous directory");
            return Ok(Flow::Continue);
        };

        let left = state.current_dir().to_owned();
        env::set_current_dir(&target).map_err(|source| CommandError::ChangeDir {
            path: target.clone(),
            source,
        })?;

        state.record_dir_change(left);
        debug!(from = state.previous_dir(), to = state.current_dir(), "changed directory");
        Ok(Flow::Continue)
    }
}
