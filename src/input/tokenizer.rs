/// Arguments for one command line, with the trailing `&` already folded
/// into `background`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    pub args: Vec<String>,
    pub background: bool,
}

impl Tokens {
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn command(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

/// Split `line` on unescaped spaces, tabs and newlines.
///
/// `\ ` is the only escape: it puts a literal space into the current token.
/// A backslash followed by anything else is kept as is. If the last token
/// is exactly `&` it is dropped and the command is marked as background.
pub fn tokenize(line: &str) -> Tokens {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&' ') => {
                chars.next();
                current.push(' ');
                in_token = true;
            }
            ' ' | '\t' | '\n' => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            _ => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_token {
        args.push(current);
    }

    let background = args.last().is_some_and(|last| last == "&");
    if background {
        args.pop();
    }

    Tokens { args, background }
}

/// Cut `line` to fewer than `max` bytes without splitting a character, and
/// drop one trailing newline.
pub fn bound_line(line: &str, max: usize) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.len() < max {
        return line;
    }

    let mut end = max.saturating_sub(1);
    while end > 0 && !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}
