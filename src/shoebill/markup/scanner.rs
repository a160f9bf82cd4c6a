//! Section scanner
//!
//! Turns text into the ordered sequence of marker lines. The scanner is a plain
//! iterator over the input: lazy, finite, and restartable by cloning it or by
//! calling [`MarkerGrammar::scan`] again.

use std::iter::Enumerate;
use std::str::Lines;

use tracing::trace;

use crate::shoebill::error::{Result, ShoebillError};
use crate::shoebill::markup::grammar::{LineClass, Marker, MarkerGrammar};

/// A marker together with its 0-based line index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedMarker {
    pub marker: Marker,
    pub line: usize,
}

#[derive(Debug, Clone)]
pub struct MarkerScanner<'g, 't> {
    grammar: &'g MarkerGrammar,
    lines: Enumerate<Lines<'t>>,
}

impl<'g, 't> MarkerScanner<'g, 't> {
    pub fn new(grammar: &'g MarkerGrammar, text: &'t str) -> Self {
        Self {
            grammar,
            lines: text.lines().enumerate(),
        }
    }
}

impl Iterator for MarkerScanner<'_, '_> {
    type Item = Result<ScannedMarker>;

    fn next(&mut self) -> Option<Self::Item> {
        for (line, content) in self.lines.by_ref() {
            match self.grammar.classify(content) {
                LineClass::Content => continue,
                LineClass::Marker(marker) => {
                    trace!(line = line + 1, ?marker, "marker");
                    return Some(Ok(ScannedMarker { marker, line }));
                }
                LineClass::Malformed => {
                    return Some(Err(ShoebillError::MalformedMarker {
                        line: line + 1,
                        content: content.to_string(),
                    }));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(text: &str) -> Vec<ScannedMarker> {
        MarkerGrammar::default()
            .scan(text)
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn yields_markers_in_document_order() {
        let text = "preamble\n%HTCSS TEMPLATE\na = b\n%HTCSS TABLE\nx\n%HTCSS END\ntrailing";
        assert_eq!(
            markers(text),
            vec![
                ScannedMarker {
                    marker: Marker::Start("TEMPLATE".to_string()),
                    line: 1
                },
                ScannedMarker {
                    marker: Marker::Start("TABLE".to_string()),
                    line: 3
                },
                ScannedMarker {
                    marker: Marker::End,
                    line: 5
                },
            ]
        );
    }

    #[test]
    fn no_markers_yields_empty_sequence() {
        assert!(markers("just text\nmore text\n").is_empty());
        assert!(markers("").is_empty());
    }

    #[test]
    fn scanner_is_restartable() {
        let grammar = MarkerGrammar::default();
        let text = "%HTCSS TEMPLATE\na\n%HTCSS TABLE\nb";
        let scanner = grammar.scan(text);
        let first: Vec<_> = scanner.clone().collect::<Result<_>>().unwrap();
        let second: Vec<_> = scanner.collect::<Result<_>>().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn malformed_marker_reports_one_based_line() {
        let grammar = MarkerGrammar::default();
        let mut scanner = grammar.scan("%HTCSS TEMPLATE\na = b\n%HTCSS table\n");
        assert!(scanner.next().unwrap().is_ok());
        match scanner.next() {
            Some(Err(ShoebillError::MalformedMarker { line, content })) => {
                assert_eq!(line, 3);
                assert_eq!(content, "%HTCSS table");
            }
            other => panic!("expected malformed marker, got {:?}", other),
        }
    }
}
