//! Assembled sections
//!
//! A [`ParsedDocument`] maps section names to their accumulated bodies in order
//! of first occurrence. Names are case-sensitive and open-ended: only
//! [`TEMPLATE`], [`TABLE`] and [`EXEC`] are acted upon downstream.

use serde::Serialize;

pub const TEMPLATE: &str = "TEMPLATE";
pub const TABLE: &str = "TABLE";
pub const EXEC: &str = "EXEC";

/// Body lines of one marker span: 0-based, `end_line` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineSpan {
    pub start_line: usize,
    pub end_line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    name: String,
    body: String,
    spans: Vec<LineSpan>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: String::new(),
            spans: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed body text; spans of a repeated section are joined by a newline.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.body.lines()
    }

    pub fn spans(&self) -> &[LineSpan] {
        &self.spans
    }

    pub fn start_line(&self) -> Option<usize> {
        self.spans.first().map(|span| span.start_line)
    }

    pub fn end_line(&self) -> Option<usize> {
        self.spans.last().map(|span| span.end_line)
    }

    pub fn is_blank(&self) -> bool {
        self.body.is_empty()
    }

    /// Merge another span into this section.
    pub fn append(&mut self, text: &str, span: LineSpan) {
        self.spans.push(span);
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if !self.body.is_empty() {
            self.body.push('\n');
        }
        self.body.push_str(text);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    sections: Vec<Section>,
}

impl ParsedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` to the section called `name`, creating it on first use.
    pub fn push_span(&mut self, name: &str, text: &str, span: LineSpan) {
        match self.sections.iter_mut().find(|s| s.name == name) {
            Some(section) => section.append(text, span),
            None => {
                let mut section = Section::new(name);
                section.append(text, span);
                self.sections.push(section);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Body of `name` if the section exists and is not blank.
    pub fn body(&self, name: &str) -> Option<&str> {
        self.get(name)
            .filter(|s| !s.is_blank())
            .map(Section::body)
    }

    pub fn template(&self) -> &str {
        self.body(TEMPLATE).unwrap_or_default()
    }

    pub fn table(&self) -> &str {
        self.body(TABLE).unwrap_or_default()
    }

    /// EXEC body whenever the section is present, blank or not.
    pub fn exec(&self) -> Option<&str> {
        self.get(EXEC).map(Section::body)
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(Section::name)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
