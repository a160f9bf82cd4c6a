//! Section markup
//!
//! Markup text is scanned for marker lines ([`scanner`]), the markers are folded
//! into named sections ([`assembler`]), and the result is a [`ParsedDocument`].
//! Scanning and assembly are pure functions of their input; a [`MarkerGrammar`]
//! is immutable and can be shared between threads.

pub mod assembler;
pub mod document;
pub mod grammar;
pub mod scanner;

use std::borrow::Cow;

pub use assembler::{assemble, collect_sections};
pub use document::{LineSpan, ParsedDocument, Section, EXEC, TABLE, TEMPLATE};
pub use grammar::{LineClass, Marker, MarkerGrammar};
pub use scanner::{MarkerScanner, ScannedMarker};

use crate::shoebill::error::Result;

/// Strip a leading byte-order mark and turn CRLF line endings into LF.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Scan and assemble `text` under `grammar`.
pub fn parse_sections(grammar: &MarkerGrammar, text: &str) -> Result<ParsedDocument> {
    let text = normalize_line_endings(text);
    assemble(&text, grammar.scan(&text))
}
