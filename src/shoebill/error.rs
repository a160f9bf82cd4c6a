//! Error types for the shoebill pipeline
//!
//! Every failure is deterministic given the same input text, so nothing here is
//! retried. Messages carry the section name or the line/column that caused the
//! failure so authoring errors in markup files can be fixed directly.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = ShoebillError> = std::result::Result<T, E>;

/// Errors produced while parsing markup, extracting comments or writing artifacts
#[derive(Debug, Error)]
pub enum ShoebillError {
    /// A required section (TEMPLATE or TABLE) is absent or whitespace-only
    #[error("Missing template or table in submission file: {section} section is absent or empty")]
    MissingSection { section: String },

    /// A line starts with the marker prefix but is not a valid START or END marker
    #[error("malformed section marker on line {line}: {content:?}")]
    MalformedMarker { line: usize, content: String },

    #[error(transparent)]
    Tokenization(#[from] TokenizationError),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 (valid up to byte {valid_up_to})", path.display())]
    InvalidEncoding { path: PathBuf, valid_up_to: usize },

    #[error("failed to write artifact {}: {source}", path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Submit(#[from] crate::shoebill::submit::SubmitError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failure to lexically tokenize host-language source
///
/// `line` and `column` are 1-based and point at the start of the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tokenization failed at line {line}, column {column}: {kind}")]
pub struct TokenizationError {
    pub line: usize,
    pub column: usize,
    pub kind: TokenizationErrorKind,
}

impl TokenizationError {
    pub fn new(line: usize, column: usize, kind: TokenizationErrorKind) -> Self {
        Self { line, column, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizationErrorKind {
    UnterminatedString,
    UnclosedBracket(char),
    UnmatchedBracket(char),
    UnexpectedCharacter(char),
    /// A dedent that lands on no enclosing indentation level
    InconsistentDedent,
    /// The source ends while a backslash continuation is pending
    DanglingContinuation,
    InvalidUtf8,
}

impl fmt::Display for TokenizationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizationErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            TokenizationErrorKind::UnclosedBracket(c) => {
                write!(f, "'{}' is never closed before end of file", c)
            }
            TokenizationErrorKind::UnmatchedBracket(c) => {
                write!(f, "closing '{}' does not match any open bracket", c)
            }
            TokenizationErrorKind::UnexpectedCharacter(c) => {
                write!(f, "unexpected character {:?}", c)
            }
            TokenizationErrorKind::InconsistentDedent => {
                write!(f, "unindent does not match any outer indentation level")
            }
            TokenizationErrorKind::DanglingContinuation => {
                write!(f, "line continuation at end of file")
            }
            TokenizationErrorKind::InvalidUtf8 => write!(f, "source is not valid UTF-8"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_section_names_the_section() {
        let err = ShoebillError::MissingSection {
            section: "TABLE".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("Missing template or table"));
        assert!(message.contains("TABLE"));
    }

    #[test]
    fn tokenization_error_reports_position() {
        let err = TokenizationError::new(3, 7, TokenizationErrorKind::UnterminatedString);
        assert_eq!(
            err.to_string(),
            "tokenization failed at line 3, column 7: unterminated string literal"
        );
    }

    #[test]
    fn tokenization_error_converts_into_crate_error() {
        let err: ShoebillError =
            TokenizationError::new(1, 1, TokenizationErrorKind::UnclosedBracket('(')).into();
        assert!(matches!(err, ShoebillError::Tokenization(_)));
        assert!(err.to_string().contains("'(' is never closed"));
    }
}
