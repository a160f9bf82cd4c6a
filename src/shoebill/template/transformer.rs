//! Template transformer
//!
//! Applied to the TEMPLATE body in a fixed order, each step seeing the result
//! of the previous one:
//!
//! 1. attribute rewrite through the [`RewriteTable`]
//! 2. `universe = container` at the top when `container_image` is set and no
//!    `universe` is
//! 3. `executable = <exec file>` at the end when an EXEC section exists and no
//!    `executable` is set
//! 4. a blank line and `queue from TABLE <table file>`, always last
//!
//! Only the trailer has no user override. A trailer line left over from an
//! earlier transformation is dropped before the trailer is appended again, so
//! transforming an already-transformed template adds nothing new.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::shoebill::config::{ArtifactsConfig, TemplateConfig};
use crate::shoebill::template::rewrite::{attribute_key, RewriteRule, RewriteTable};

const CONTAINER_IMAGE: &str = "container_image";
const UNIVERSE: &str = "universe";
const EXECUTABLE: &str = "executable";

/// Final submit description text, one `key = value` line per entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct SubmitTemplate {
    lines: Vec<String>,
}

impl SubmitTemplate {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines joined by `\n`; the text ends with the trailer line.
    pub fn as_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Value of the first line setting `key` (ASCII case-insensitive).
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| {
            let found = attribute_key(line)?;
            if !found.eq_ignore_ascii_case(key) {
                return None;
            }
            line.split_once('=').map(|(_, value)| value.trim())
        })
    }

    pub fn count_lines(&self, line: &str) -> usize {
        self.lines.iter().filter(|l| l.as_str() == line).count()
    }
}

impl fmt::Display for SubmitTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<SubmitTemplate> for String {
    fn from(template: SubmitTemplate) -> Self {
        template.as_text()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateTransformer {
    rewrites: RewriteTable,
    container_universe: String,
    exec_file: String,
    trailer: String,
}

impl TemplateTransformer {
    pub fn new(
        rewrites: RewriteTable,
        container_universe: impl Into<String>,
        table_file: &str,
        exec_file: impl Into<String>,
    ) -> Self {
        Self {
            rewrites,
            container_universe: container_universe.into(),
            exec_file: exec_file.into(),
            trailer: format!("queue from TABLE {}", table_file),
        }
    }

    pub fn from_config(template: &TemplateConfig, artifacts: &ArtifactsConfig) -> Self {
        let rules = template.rewrites.iter().map(RewriteRule::from).collect();
        Self::new(
            RewriteTable::new(rules),
            template.container_universe.as_str(),
            &artifacts.table_file,
            artifacts.exec_file.as_str(),
        )
    }

    pub fn trailer(&self) -> &str {
        &self.trailer
    }

    pub fn rewrites(&self) -> &RewriteTable {
        &self.rewrites
    }

    /// Transform a TEMPLATE body. `has_exec` tells whether the document had an
    /// EXEC section.
    pub fn transform(&self, body: &str, has_exec: bool) -> SubmitTemplate {
        let mut lines: Vec<String> = body
            .lines()
            .map(|line| self.rewrites.rewrite_line(line))
            .collect();

        if has_key(&lines, CONTAINER_IMAGE, false) && !has_key(&lines, UNIVERSE, true) {
            debug!("container_image set, inserting universe");
            lines.insert(0, format!("{} = {}", UNIVERSE, self.container_universe));
        }

        if has_exec && !has_key(&lines, EXECUTABLE, true) {
            debug!(exec_file = %self.exec_file, "EXEC section present, appending executable");
            lines.push(format!("{} = {}", EXECUTABLE, self.exec_file));
        }

        lines.retain(|line| line.trim() != self.trailer);
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        lines.push(String::new());
        lines.push(self.trailer.clone());

        SubmitTemplate { lines }
    }
}

impl Default for TemplateTransformer {
    fn default() -> Self {
        Self::new(RewriteTable::default(), "container", "_table.csv", "_exec.py")
    }
}

fn has_key(lines: &[String], key: &str, ignore_case: bool) -> bool {
    lines.iter().filter_map(|line| attribute_key(line)).any(|found| {
        if ignore_case {
            found.eq_ignore_ascii_case(key)
        } else {
            found == key
        }
    })
}
