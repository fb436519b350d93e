use std::env;
use std::io::Write;

use tracing::debug;

use crate::core::commands::{CommandExecutor, Flow};
use crate::core::config::ShellConfig;
use crate::core::state::ShellState;
use crate::error::ShellError;
use crate::highlight::SyntaxHighlighter;
use crate::input::tokenizer::{bound_line, tokenize};
use crate::input::{Expansion, Tokens};
use crate::process::{ChildOutcome, ProcessExecutor, Signals};

const INTERRUPT_HINT: &str = "Use 'exit' to exit the shell";

/// One line in, one dispatch out. Holds no terminal handles so it can be
/// driven from tests.
#[derive(Debug)]
pub struct Interpreter {
    config: ShellConfig,
    state: ShellState,
    builtins: CommandExecutor,
    processes: ProcessExecutor,
}

impl Interpreter {
    pub fn new(config: ShellConfig) -> Self {
        let state = ShellState::new(&config);
        Interpreter {
            config,
            state,
            builtins: CommandExecutor::new(),
            processes: ProcessExecutor::new(),
        }
    }

    /// Move to `/home/$USER`. Stays put if that fails.
    pub fn enter_user_home(&mut self) {
        let Ok(user) = env::var("USER") else {
            debug!("USER not set; staying in {}", self.state.current_dir());
            return;
        };

        let home = format!("/home/{}", user);
        match env::set_current_dir(&home) {
            Ok(()) => self.state.refresh_current_dir(),
            Err(e) => debug!(home = home.as_str(), error = %e, "startup chdir failed"),
        }
    }

    pub fn prompt(&self) -> String {
        self.config.prompt(self.state.current_dir())
    }

    pub fn process_line(&mut self, line: &str, out: &mut dyn Write) -> Result<Flow, ShellError> {
        let line = bound_line(line, self.config.max_line);
        let mut tokens = tokenize(line);
        if tokens.is_empty() {
            return Ok(Flow::Continue);
        }

        self.state.history.add(line);

        let reference = tokens
            .command()
            .filter(|t| t.starts_with('!') && t.len() > 1)
            .map(str::to_owned);
        if let Some(reference) = reference {
            match self.state.history.expand(&reference)? {
                Expansion::Line(expanded) => {
                    writeln!(out, "{}", expanded)?;
                    tokens = tokenize(&expanded);
                }
                Expansion::Cleared => return Ok(Flow::Continue),
            }
            if tokens.is_empty() {
                return Ok(Flow::Continue);
            }
        }

        if tokens.background {
            writeln!(out, "Run in background.")?;
        }

        self.dispatch(&tokens, out)
    }

    fn dispatch(&mut self, tokens: &Tokens, out: &mut dyn Write) -> Result<Flow, ShellError> {
        if let Some(result) = self.builtins.execute(&tokens.args, &mut self.state, out) {
            debug!(command = tokens.command(), "ran builtin");
            return Ok(result?);
        }

        out.flush()?;
        if let ChildOutcome::Completed { pid, status } =
            self.processes.launch(&tokens.args, tokens.background)?
        {
            writeln!(out, "Completed child {} ({})", pid, status)?;
        }
        Ok(Flow::Continue)
    }

    /// Report background children that have finished since the last call.
    pub fn reap_background(&mut self, out: &mut dyn Write) -> Result<usize, ShellError> {
        let reaped = self.processes.reap_background();
        for (pid, status) in &reaped {
            writeln!(out, "[{}] done ({})", pid, status)?;
        }
        Ok(reaped.len())
    }

    pub fn print_help(&self, out: &mut dyn Write) -> Result<(), ShellError> {
        self.builtins.print_help(out)?;
        Ok(())
    }

    /// Print the help listing if an interrupt arrived since the last check.
    pub fn handle_interrupt(
        &self,
        signals: &Signals,
        highlighter: &SyntaxHighlighter,
        out: &mut dyn Write,
    ) -> Result<bool, ShellError> {
        if !signals.take_interrupt() {
            return Ok(false);
        }
        writeln!(out)?;
        self.print_help(out)?;
        writeln!(out, "{}", highlighter.highlight_hint(INTERRUPT_HINT))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HistoryError;
    use crate::test_support::cwd_lock;
    use std::thread;
    use std::time::{Duration, Instant};

    fn run(interp: &mut Interpreter, line: &str) -> (Result<Flow, ShellError>, String) {
        let mut out = Vec::new();
        let result = interp.process_line(line, &mut out);
        (result, String::from_utf8_lossy(&out).into_owned())
    }

    fn interpreter() -> Interpreter {
        Interpreter::new(ShellConfig::default())
    }

    #[test]
    fn test_blank_line_is_not_recorded() {
        let mut interp = interpreter();
        let (result, out) = run(&mut interp, "   \n");
        assert!(matches!(result, Ok(Flow::Continue)));
        assert!(out.is_empty());
        assert_eq!(interp.state.history.cmd_count(), 0);
    }

    #[test]
    fn test_exit_ends_the_loop() {
        let mut interp = interpreter();
        assert!(matches!(run(&mut interp, "exit").0, Ok(Flow::Exit)));
    }

    #[test]
    fn test_exit_with_arguments_keeps_going() {
        let mut interp = interpreter();
        let (result, _) = run(&mut interp, "exit 1");
        assert!(matches!(result, Err(ShellError::CommandError(_))));
    }

    #[test]
    fn test_history_after_three_commands() {
        let mut interp = interpreter();
        run(&mut interp, "help cd");
        run(&mut interp, "help pwd");
        let (_, out) = run(&mut interp, "history");
        assert_eq!(out, "0\thelp cd\n1\thelp pwd\n2\thistory\n");
    }

    #[test]
    fn test_bang_bang_with_empty_history() {
        let mut interp = interpreter();
        let (result, out) = run(&mut interp, "!!");
        assert!(matches!(
            result,
            Err(ShellError::HistoryError(HistoryError::NoPrevious))
        ));
        assert!(out.is_empty());
        assert_eq!(interp.state.history.cmd_count(), 0);
    }

    #[test]
    fn test_bang_bang_reruns_without_recording() {
        let mut interp = interpreter();
        run(&mut interp, "help ls");
        let (result, out) = run(&mut interp, "!!");
        assert!(result.is_ok());
        assert_eq!(
            out,
            "help ls\n'ls' is an external command or application\n"
        );
        assert_eq!(interp.state.history.cmd_count(), 1);
    }

    #[test]
    fn test_bang_number_runs_that_entry() {
        let mut interp = interpreter();
        run(&mut interp, "help ls");
        run(&mut interp, "help cd");
        let (_, out) = run(&mut interp, "!0");
        assert_eq!(out, "help ls\n'ls' is an external command or application\n");

        let (result, _) = run(&mut interp, "!7");
        assert!(matches!(
            result,
            Err(ShellError::HistoryError(HistoryError::OutOfRange(ref n))) if n == "7"
        ));
    }

    #[test]
    fn test_bang_dash_runs_nothing() {
        let mut interp = interpreter();
        run(&mut interp, "help");
        let (result, out) = run(&mut interp, "!-");
        assert!(matches!(result, Ok(Flow::Continue)));
        assert!(out.is_empty());
        assert!(interp.state.history.iter_indexed().next().is_none());
        assert!(run(&mut interp, "!!").0.is_err());
    }

    #[test]
    fn test_invalid_bang_is_reported() {
        let mut interp = interpreter();
        let (result, _) = run(&mut interp, "!abc");
        assert!(matches!(
            result,
            Err(ShellError::HistoryError(HistoryError::Invalid(_)))
        ));
    }

    #[test]
    fn test_foreground_completion_is_reported() {
        let mut interp = interpreter();
        let (result, out) = run(&mut interp, "false");
        assert!(result.is_ok());
        assert!(out.starts_with("Completed child "));
        assert!(out.trim_end().ends_with("(exit status: 1)"));

        let (_, out) = run(&mut interp, "true");
        assert!(out.starts_with("Completed child "));
        assert!(out.contains("(exit status: 0)"));
    }

    #[test]
    fn test_interrupt_prints_help_once() {
        let interp = interpreter();
        let signals = Signals::default();
        let highlighter = SyntaxHighlighter::plain();

        let mut quiet = Vec::new();
        assert!(!interp
            .handle_interrupt(&signals, &highlighter, &mut quiet)
            .expect("write"));
        assert!(quiet.is_empty());

        signals.raise_interrupt();
        let mut out = Vec::new();
        assert!(interp
            .handle_interrupt(&signals, &highlighter, &mut out)
            .expect("write"));

        let mut expected = b"\n".to_vec();
        interp.print_help(&mut expected).expect("help");
        expected.extend_from_slice(b"Use 'exit' to exit the shell\n");
        assert_eq!(out, expected);

        let mut again = Vec::new();
        assert!(!interp
            .handle_interrupt(&signals, &highlighter, &mut again)
            .expect("write"));
    }

    #[test]
    fn test_missing_user_home_keeps_original_dir() {
        let _guard = cwd_lock();
        let start = tempfile::tempdir().expect("tempdir");
        env::set_current_dir(start.path()).expect("chdir");
        env::set_var("USER", "ringsh-user-without-a-home-dir");

        let mut interp = interpreter();
        let before = interp.prompt();
        interp.enter_user_home();

        let canonical = std::fs::canonicalize(start.path()).expect("canonicalize");
        assert_eq!(before, format!("{}$ ", canonical.to_string_lossy()));
        assert_eq!(interp.prompt(), before);
        assert_eq!(
            env::current_dir().expect("cwd"),
            canonical
        );
    }

    #[test]
    fn test_background_acknowledged_and_not_waited_for() {
        let mut interp = interpreter();
        let start = Instant::now();
        let (result, out) = run(&mut interp, "sleep 0.3 &");
        assert!(result.is_ok());
        assert_eq!(out, "Run in background.\n");
        assert!(start.elapsed() < Duration::from_millis(300));

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut reported = Vec::new();
        while Instant::now() < deadline {
            if interp.reap_background(&mut reported).expect("reap") > 0 {
                break;
            }
            thread::sleep(Duration::from_millis(20));
        }
        let reported = String::from_utf8_lossy(&reported);
        assert!(reported.starts_with('['));
        assert!(reported.contains("] done ("));
    }

    #[test]
    fn test_missing_program_does_not_stop_the_shell() {
        let mut interp = interpreter();
        let (result, _) = run(&mut interp, "ringsh-no-such-program --flag");
        match result {
            Err(err) => assert!(!err.is_fatal()),
            Ok(_) => panic!("missing program should be reported"),
        }
        assert!(matches!(run(&mut interp, "help").0, Ok(Flow::Continue)));
    }

    #[test]
    fn test_cd_updates_prompt() {
        let _guard = cwd_lock();
        let dir = tempfile::tempdir().expect("tempdir");
        let mut interp = interpreter();
        let path = dir.path().to_string_lossy().into_owned();
        let (result, _) = run(&mut interp, &format!("cd {}", path));
        assert!(result.is_ok());
        let canonical = std::fs::canonicalize(dir.path()).expect("canonicalize");
        assert_eq!(
            interp.prompt(),
            format!("{}$ ", canonical.to_string_lossy())
        );
    }

    #[test]
    fn test_help_listing_is_stable() {
        let interp = interpreter();
        let mut first = Vec::new();
        let mut second = Vec::new();
        interp.print_help(&mut first).expect("help");
        interp.print_help(&mut second).expect("help");
        assert_eq!(first, second);
        assert_eq!(String::from_utf8_lossy(&first).lines().count(), 5);
    }
}
