use inksac::prelude::*;

/// Colours for messages the shell itself prints to the terminal.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        Self {
            color_support: check_color_support().unwrap_or(ColorSupport::NoColor),
        }
    }

    /// Never colours anything, for output that is not a terminal.
    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    pub fn highlight_error(&self, error: &str) -> String {
        self.paint(error, || {
            Style::builder().foreground(Color::Red).bold().build()
        })
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        self.paint(hint, || {
            Style::builder().foreground(Color::RGB(128, 128, 128)).build()
        })
    }

    fn paint(&self, text: &str, style: impl FnOnce() -> Style) -> String {
        match self.color_support {
            ColorSupport::NoColor => text.to_string(),
            _ => text.style(style()).to_string(),
        }
    }
}
