use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{Command, ExitStatus, Stdio};

use tracing::{debug, warn};

use super::{ChildOutcome, ProcessError};

/// Spawns external commands and keeps just enough bookkeeping to reap the
/// ones it did not wait for.
#[derive(Debug, Default)]
pub struct ProcessExecutor {
    detached: Vec<u32>,
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `args[0]` with the rest as its arguments. Foreground commands
    /// block until that child exits.
    pub fn launch(&mut self, args: &[String], background: bool) -> Result<ChildOutcome, ProcessError> {
        let Some((program, rest)) = args.split_first() else {
            return Err(ProcessError::Exec {
                program: String::new(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
            });
        };

        let mut command = Command::new(program);
        command
            .args(rest)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let mut child = command
            .spawn()
            .map_err(|e| classify_spawn_error(program, e))?;
        let pid = child.id();
        debug!(pid, program = program.as_str(), background, "spawned child");

        if background {
            self.detached.push(pid);
            return Ok(ChildOutcome::Backgrounded { pid });
        }

        let status = child.wait().map_err(ProcessError::Wait)?;
        debug!(pid, %status, "child finished");
        Ok(ChildOutcome::Completed { pid, status })
    }

    /// Collect every background child that has exited, without blocking.
    pub fn reap_background(&mut self) -> Vec<(u32, ExitStatus)> {
        let mut reaped = Vec::new();

        self.detached.retain(|&pid| {
            let Ok(raw_pid) = libc::pid_t::try_from(pid) else {
                return false;
            };
            let mut status: libc::c_int = 0;
            // SAFETY: `status` is a valid out-pointer for the duration of
            // the call and `raw_pid` names a child this process spawned.
            let result = unsafe { libc::waitpid(raw_pid, &mut status, libc::WNOHANG) };
            match result {
                0 => true,
                r if r == raw_pid => {
                    reaped.push((pid, ExitStatus::from_raw(status)));
                    false
                }
                _ => {
                    warn!(pid, error = %io::Error::last_os_error(), "waitpid failed");
                    false
                }
            }
        });

        reaped
    }
}

/// `fork` itself failing means the system is out of processes or memory;
/// anything else surfaced by `spawn` comes from `exec` in the child.
fn classify_spawn_error(program: &str, err: io::Error) -> ProcessError {
    match err.raw_os_error() {
        Some(libc::EAGAIN) | Some(libc::ENOMEM) => ProcessError::Spawn(err),
        _ => ProcessError::Exec {
            program: program.to_owned(),
            source: err,
        },
    }
}
