//! Byte offset to line/column conversion for tokenizer diagnostics

use crate::shoebill::error::{TokenizationError, TokenizationErrorKind};

/// A 0-based line/column position; columns count characters, not bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Provides fast conversion from byte offsets to line/column positions
pub struct SourceLocation<'a> {
    source: &'a str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceLocation<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);
        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..byte_offset)
            .map_or(byte_offset - line_start, |prefix| prefix.chars().count());

        Position::new(line, column)
    }

    pub fn is_line_start(&self, byte_offset: usize) -> bool {
        self.line_starts.binary_search(&byte_offset).is_ok()
    }

    /// Build a tokenization error pointing at `byte_offset`, reported 1-based.
    pub fn error_at(&self, byte_offset: usize, kind: TokenizationErrorKind) -> TokenizationError {
        let position = self.byte_to_position(byte_offset);
        TokenizationError::new(position.line + 1, position.column + 1, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_to_position_single_line() {
        let loc = SourceLocation::new("Hello");
        assert_eq!(loc.byte_to_position(0), Position::new(0, 0));
        assert_eq!(loc.byte_to_position(4), Position::new(0, 4));
    }

    #[test]
    fn test_byte_to_position_multiline() {
        let loc = SourceLocation::new("Hello\nworld\ntest");
        assert_eq!(loc.byte_to_position(5), Position::new(0, 5));
        assert_eq!(loc.byte_to_position(6), Position::new(1, 0));
        assert_eq!(loc.byte_to_position(12), Position::new(2, 0));
    }

    #[test]
    fn test_columns_count_characters() {
        let loc = SourceLocation::new("é = 'x");
        // 'é' is two bytes wide
        assert_eq!(loc.byte_to_position(5), Position::new(0, 4));
    }

    #[test]
    fn test_line_start_detection() {
        let loc = SourceLocation::new("# a\n  # b\n");
        assert!(loc.is_line_start(0));
        assert!(loc.is_line_start(4));
        assert!(!loc.is_line_start(6));
    }

    #[test]
    fn test_error_positions_are_one_based() {
        let loc = SourceLocation::new("x = 1\ny = (\n");
        let err = loc.error_at(10, TokenizationErrorKind::UnclosedBracket('('));
        assert_eq!((err.line, err.column), (2, 5));
    }
}
