//! Marker grammar
//!
//! A marker line is, after optional leading whitespace, the prefix token
//! followed by whitespace and a single keyword: either the END keyword or an
//! uppercase section name. Anything after the keyword other than whitespace
//! makes the line malformed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::shoebill::config::MarkupConfig;
use crate::shoebill::error::{Result, ShoebillError};
use crate::shoebill::markup::scanner::MarkerScanner;

static SECTION_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("section name pattern is valid"));

/// A recognized marker line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    Start(String),
    End,
}

/// How a single line of markup reads under a grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    Content,
    Marker(Marker),
    Malformed,
}

/// Immutable marker syntax, built once per configuration and shared by every scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerGrammar {
    prefix: String,
    end_keyword: String,
}

impl MarkerGrammar {
    pub fn new(prefix: impl Into<String>, end_keyword: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        let end_keyword = end_keyword.into();
        if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
            return Err(ShoebillError::InvalidConfig(format!(
                "marker prefix must be a non-empty token without whitespace, got {:?}",
                prefix
            )));
        }
        if !SECTION_NAME.is_match(&end_keyword) {
            return Err(ShoebillError::InvalidConfig(format!(
                "END keyword must be an uppercase word, got {:?}",
                end_keyword
            )));
        }
        Ok(Self {
            prefix,
            end_keyword,
        })
    }

    pub fn from_config(config: &MarkupConfig) -> Result<Self> {
        Self::new(config.prefix.as_str(), config.end_keyword.as_str())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn end_keyword(&self) -> &str {
        &self.end_keyword
    }

    /// Classify one line of text.
    pub fn classify(&self, line: &str) -> LineClass {
        let Some(rest) = line.trim_start().strip_prefix(self.prefix.as_str()) else {
            return LineClass::Content;
        };
        if rest.trim().is_empty() {
            return LineClass::Malformed;
        }
        // "%HTCSSX" is not the prefix token followed by a keyword
        if !rest.starts_with(char::is_whitespace) {
            return LineClass::Content;
        }

        let mut words = rest.split_whitespace();
        let keyword = words.next().unwrap_or_default();
        if words.next().is_some() {
            return LineClass::Malformed;
        }

        if keyword == self.end_keyword {
            LineClass::Marker(Marker::End)
        } else if SECTION_NAME.is_match(keyword) {
            LineClass::Marker(Marker::Start(keyword.to_string()))
        } else {
            LineClass::Malformed
        }
    }

    /// Lazily scan `text` for marker lines.
    pub fn scan<'g, 't>(&'g self, text: &'t str) -> MarkerScanner<'g, 't> {
        MarkerScanner::new(self, text)
    }
}

impl Default for MarkerGrammar {
    fn default() -> Self {
        Self {
            prefix: "%HTCSS".to_string(),
            end_keyword: "END".to_string(),
        }
    }
}
