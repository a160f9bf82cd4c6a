//! Section assembler
//!
//! Folds the marker sequence over the source lines with a two-state machine:
//! either no section is open, or exactly one is. A START marker always closes
//! whatever is open and opens its own section, so END markers are optional.
//! Lines outside any section are discarded.

use tracing::{debug, warn};

use crate::shoebill::error::{Result, ShoebillError};
use crate::shoebill::markup::document::{LineSpan, ParsedDocument, TABLE, TEMPLATE};
use crate::shoebill::markup::grammar::Marker;
use crate::shoebill::markup::scanner::ScannedMarker;

#[derive(Debug)]
enum AssemblyState {
    Idle,
    Open { name: String, body_start: usize },
}

impl AssemblyState {
    fn after(marker: Marker, line: usize) -> Self {
        match marker {
            Marker::Start(name) => AssemblyState::Open {
                name,
                body_start: line + 1,
            },
            Marker::End => AssemblyState::Idle,
        }
    }
}

/// Build the section mapping and check that TEMPLATE and TABLE have content.
pub fn assemble<I>(source: &str, markers: I) -> Result<ParsedDocument>
where
    I: IntoIterator<Item = Result<ScannedMarker>>,
{
    let document = collect_sections(source, markers)?;
    require(&document, TEMPLATE)?;
    require(&document, TABLE)?;
    Ok(document)
}

/// Build the section mapping without checking for required sections.
pub fn collect_sections<I>(source: &str, markers: I) -> Result<ParsedDocument>
where
    I: IntoIterator<Item = Result<ScannedMarker>>,
{
    let lines: Vec<&str> = source.lines().collect();
    let mut document = ParsedDocument::new();
    let mut state = AssemblyState::Idle;

    for scanned in markers {
        let ScannedMarker { marker, line } = scanned?;
        state = match (state, marker) {
            (AssemblyState::Open { name, body_start }, marker) => {
                close(&mut document, &name, &lines, body_start, line);
                AssemblyState::after(marker, line)
            }
            (AssemblyState::Idle, Marker::End) => {
                warn!(line = line + 1, "END marker with no open section");
                AssemblyState::Idle
            }
            (AssemblyState::Idle, marker) => AssemblyState::after(marker, line),
        };
    }

    if let AssemblyState::Open { name, body_start } = state {
        close(&mut document, &name, &lines, body_start, lines.len());
    }

    debug!(sections = ?document.names().collect::<Vec<_>>(), "assembled sections");
    Ok(document)
}

fn close(document: &mut ParsedDocument, name: &str, lines: &[&str], start: usize, end: usize) {
    let body = lines[start..end].join("\n");
    document.push_span(
        name,
        &body,
        LineSpan {
            start_line: start,
            end_line: end,
        },
    );
}

fn require(document: &ParsedDocument, name: &str) -> Result<()> {
    if document.body(name).is_none() {
        return Err(ShoebillError::MissingSection {
            section: name.to_string(),
        });
    }
    Ok(())
}
