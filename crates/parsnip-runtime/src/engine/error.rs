//! Parse-failure diagnostics.

/// Line/column diagnostic derived from the furthest failure position.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    /// 1-based line of the failure position.
    pub line: usize,
    /// 1-based column of the failure position.
    pub column: usize,
    pub message: String,
}

impl ParseError {
    /// Build the diagnostic for position `at` in `data`.
    pub(crate) fn at(data: &[u8], at: usize) -> Self {
        let at = at.min(data.len());
        let mut line = 1;
        let mut column = 1;
        for &byte in &data[..at] {
            column += 1;
            if byte == b'\n' {
                line += 1;
                column = 1;
            }
        }

        let message = if at == data.len() {
            "Unexpected EOF".to_string()
        } else {
            let tail = &data[at..data.len().min(at + 4)];
            let next = String::from_utf8_lossy(tail)
                .chars()
                .next()
                .unwrap_or('\u{fffd}');
            if next == '\r' || next == '\n' {
                "Unexpected new line".to_string()
            } else {
                format!("Unexpected {next}")
            }
        };

        Self {
            line,
            column,
            message,
        }
    }
}
