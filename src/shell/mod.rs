use std::io::{self, IsTerminal, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, warn};

mod interpreter;

pub use interpreter::Interpreter;

use crate::{
    core::{commands::Flow, config::ShellConfig},
    error::ShellError,
    highlight::SyntaxHighlighter,
    process::Signals,
};

pub struct Shell {
    pub(crate) editor: DefaultEditor,
    pub(crate) interpreter: Interpreter,
    pub(crate) signals: Signals,
    pub(crate) highlighter: SyntaxHighlighter,
}

impl Shell {
    pub fn new() -> Result<Self, ShellError> {
        let config = ShellConfig::load().unwrap_or_else(|e| {
            warn!("{}; using defaults", e);
            ShellConfig::default()
        });

        let editor = DefaultEditor::new()?;
        let signals = Signals::install()?;
        let mut interpreter = Interpreter::new(config);
        interpreter.enter_user_home();

        Ok(Shell {
            editor,
            interpreter,
            signals,
            highlighter: if io::stderr().is_terminal() {
                SyntaxHighlighter::new()
            } else {
                SyntaxHighlighter::plain()
            },
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        let mut stdout = io::stdout();

        loop {
            if self.signals.take_child_exit() {
                self.interpreter.reap_background(&mut stdout)?;
            }

            let prompt = self.interpreter.prompt();
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                            debug!("couldn't add to line editor history: {}", e);
                        }
                    }

                    match self.interpreter.process_line(&line, &mut stdout) {
                        Ok(Flow::Exit) => break,
                        Ok(Flow::Continue) => {}
                        Err(e) if e.is_fatal() => return Err(e),
                        Err(e) => eprintln!("{}", self.highlighter.highlight_error(&e.to_string())),
                    }
                }
                Err(ReadlineError::Interrupted) => self.signals.raise_interrupt(),
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }

            self.interpreter
                .handle_interrupt(&self.signals, &self.highlighter, &mut stdout)?;
            stdout.flush()?;
        }
        Ok(())
    }
}
