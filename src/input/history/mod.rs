pub mod types;

use std::collections::VecDeque;

use tracing::debug;

pub use self::types::{Expansion, HistoryError};

/// Upper bound on the slots reserved up front; larger rings grow on demand.
const PREALLOC_ENTRIES: usize = 64;

/// Fixed-size ring of raw command lines.
///
/// `cmd_count` is the logical index the next line will get. Eviction never
/// lowers it; only [`History::clear`] does.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    max_entries: usize,
    max_line: usize,
    cmd_count: u64,
}

impl History {
    pub fn new(max_entries: usize, max_line: usize) -> Self {
        History {
            entries: VecDeque::with_capacity(max_entries.min(PREALLOC_ENTRIES)),
            max_entries: max_entries.max(1),
            max_line,
            cmd_count: 0,
        }
    }

    /// Record `line` unless it is itself a `!` reference. Returns whether
    /// the line was stored.
    pub fn add(&mut self, line: &str) -> bool {
        if is_expansion_trigger(line) {
            return false;
        }

        let line = crate::input::tokenizer::bound_line(line, self.max_line + 1);
        if self.entries.len() == self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_owned());
        self.cmd_count += 1;
        true
    }

    pub fn get(&self, index: u64) -> Option<&str> {
        let first = self.first_index();
        if index < first || index >= self.cmd_count {
            return None;
        }
        let offset = usize::try_from(index - first).ok()?;
        self.entries.get(offset).map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn cmd_count(&self) -> u64 {
        self.cmd_count
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cmd_count = 0;
    }

    /// Retained entries, oldest first, paired with their logical index.
    pub fn iter_indexed(&self) -> impl Iterator<Item = (u64, &str)> {
        let first = self.first_index();
        self.entries
            .iter()
            .zip(first..)
            .map(|(line, index)| (index, line.as_str()))
    }

    /// Resolve a token that starts with `!`.
    pub fn expand(&mut self, token: &str) -> Result<Expansion, HistoryError> {
        let rest = token
            .strip_prefix('!')
            .ok_or_else(|| HistoryError::Invalid(token.to_owned()))?;

        match rest {
            "!" => self
                .last()
                .map(|line| Expansion::Line(line.to_owned()))
                .ok_or(HistoryError::NoPrevious),
            "-" => {
                debug!(dropped = self.entries.len(), "history cleared");
                self.clear();
                Ok(Expansion::Cleared)
            }
            digits if is_digits(digits) => {
                // Too large for u64 means it is past every index we hand out.
                digits
                    .parse::<u64>()
                    .ok()
                    .and_then(|index| self.get(index))
                    .map(|line| Expansion::Line(line.to_owned()))
                    .ok_or_else(|| HistoryError::OutOfRange(digits.to_owned()))
            }
            _ => Err(HistoryError::Invalid(token.to_owned())),
        }
    }

    fn first_index(&self) -> u64 {
        self.cmd_count - self.entries.len() as u64
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `!!...`, `!-...`, or a first word of `!` plus digits.
fn is_expansion_trigger(line: &str) -> bool {
    let line = line.trim_start();
    if line.starts_with("!!") || line.starts_with("!-") {
        return true;
    }
    line.split_whitespace()
        .next()
        .and_then(|word| word.strip_prefix('!'))
        .is_some_and(is_digits)
}
