use std::{fmt, ops::Range};

use unicode_segmentation::UnicodeSegmentation;

/// Half-open range of `char` indices into the source text.
pub type Span = Range<usize>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub message: String,
    pub span: Span,
}

impl Error {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Error {
            message: message.into(),
            span,
        }
    }

    /// 1-based line and column of the start of the span. Columns count
    /// graphemes so that accented identifiers line up with the caret.
    pub fn location(&self, source: &str) -> (usize, usize) {
        let prefix = source.chars().take(self.span.start).collect::<String>();
        let line = prefix.matches('\n').count() + 1;
        let line_start = prefix.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
        let column = prefix[line_start..].graphemes(true).count() + 1;

        (line, column)
    }

    /// Renders the error against the source it was produced from:
    ///
    /// ```text
    /// 1:5: no prefix parse rule for ILLEGAL found
    ///   let @ = 5;
    ///       ^
    /// ```
    pub fn render(&self, source: &str) -> String {
        let (line, column) = self.location(source);
        let source_line = source.lines().nth(line - 1).unwrap_or("");

        format!(
            "{}:{}: {}\n  {}\n  {}^",
            line,
            column,
            self.message,
            source_line,
            " ".repeat(column - 1)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
