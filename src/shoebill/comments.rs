//! Comment extraction from host-language source
//!
//! Markup can live inside the comments of a program. Extraction is a separate
//! pass that runs before markup parsing: a [`CommentLexer`] tokenizes the host
//! source and reports where its line comments are, and [`extract_comments`]
//! joins the comment bodies (introducer stripped, whitespace kept) into the
//! text handed to the section scanner.
//!
//! New host languages plug in by implementing [`CommentLexer`] and adding a
//! [`HostLanguage`] variant; nothing downstream changes.

pub mod location;
pub mod python;

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

pub use crate::shoebill::config::CommentScope;
use crate::shoebill::error::TokenizationError;
use crate::shoebill::markup::normalize_line_endings;
pub use python::PythonComments;

/// One line comment in the host source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSpan {
    /// Byte range of the comment, introducer included
    pub range: Range<usize>,
    /// 1-based line number
    pub line: usize,
    /// Whether the comment starts in the first column of its line
    pub at_line_start: bool,
}

/// Given host source text, yield its comment tokens in source order.
pub trait CommentLexer: Send + Sync {
    /// Token that opens a line comment, stripped from extracted bodies
    fn introducer(&self) -> &str;

    fn comment_spans(&self, source: &str) -> Result<Vec<CommentSpan>, TokenizationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostLanguage {
    #[default]
    Python,
}

static PYTHON: PythonComments = PythonComments;

impl HostLanguage {
    pub fn comment_lexer(&self) -> &'static dyn CommentLexer {
        match self {
            HostLanguage::Python => &PYTHON,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HostLanguage::Python => "python",
        }
    }
}

impl fmt::Display for HostLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HostLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(HostLanguage::Python),
            other => Err(format!("unsupported host language: {}", other)),
        }
    }
}

/// Joined comment bodies together with the source line each one came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedComments {
    text: String,
    source_lines: Vec<usize>,
}

impl ExtractedComments {
    /// Comment bodies, one per line.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based host source line of the 1-based `line` of [`text`](Self::text).
    pub fn source_line(&self, line: usize) -> Option<usize> {
        line.checked_sub(1)
            .and_then(|index| self.source_lines.get(index))
            .copied()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Join the bodies of the comments selected by `scope`, one per line.
pub fn extract_comments(
    lexer: &dyn CommentLexer,
    source: &str,
    scope: CommentScope,
) -> Result<ExtractedComments, TokenizationError> {
    let source = normalize_line_endings(source);
    let spans = lexer.comment_spans(&source)?;
    let (bodies, source_lines): (Vec<&str>, Vec<usize>) = spans
        .iter()
        .filter(|span| match scope {
            CommentScope::Anywhere => true,
            CommentScope::LineStart => span.at_line_start,
        })
        .map(|span| {
            let text = &source[span.range.clone()];
            let body = text.strip_prefix(lexer.introducer()).unwrap_or(text);
            (body, span.line)
        })
        .unzip();

    debug!(
        found = spans.len(),
        kept = bodies.len(),
        ?scope,
        "extracted comments"
    );
    Ok(ExtractedComments {
        text: bodies.join("\n"),
        source_lines,
    })
}
