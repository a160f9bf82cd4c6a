//! Parse orchestration
//!
//! A [`Processor`] owns the immutable pieces of the pipeline (marker grammar,
//! template transformer, comment policy) and runs them per call:
//!
//! ```text
//! file bytes -> [comment extraction] -> markup text -> scan -> assemble -> transform
//! ```
//!
//! No state survives between calls, so one processor can serve any number of
//! threads at once.
//!
//! ```rust,ignore
//! use shoebill::shoebill::processor::{Processor, SourceMode};
//! use shoebill::shoebill::comments::HostLanguage;
//!
//! let processor = Processor::default();
//! let job = processor.parse_file("job.htpy", SourceMode::Markup)?;
//! let job = processor.parse_file("train.py", SourceMode::HostSource(HostLanguage::Python))?;
//! println!("{}", job.template());
//! ```

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::shoebill::comments::{extract_comments, CommentScope, HostLanguage};
use crate::shoebill::config::{load_defaults, ShoebillConfig};
use crate::shoebill::error::{Result, ShoebillError, TokenizationError, TokenizationErrorKind};
use crate::shoebill::markup::{assemble, normalize_line_endings, MarkerGrammar, ParsedDocument};
use crate::shoebill::template::{SubmitTemplate, TemplateTransformer};

/// How the input should be read. Chosen by the caller, never sniffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    /// The file is markup text
    Markup,
    /// The markup lives in the comments of a program
    HostSource(HostLanguage),
}

/// Assembled sections plus the transformed template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedJob {
    document: ParsedDocument,
    template: SubmitTemplate,
}

impl ParsedJob {
    pub fn document(&self) -> &ParsedDocument {
        &self.document
    }

    pub fn template(&self) -> &SubmitTemplate {
        &self.template
    }

    pub fn table(&self) -> &str {
        self.document.table()
    }

    pub fn exec(&self) -> Option<&str> {
        self.document.exec()
    }
}

#[derive(Debug, Clone)]
pub struct Processor {
    grammar: MarkerGrammar,
    transformer: TemplateTransformer,
    comment_scope: CommentScope,
}

impl Processor {
    pub fn new(config: &ShoebillConfig) -> Result<Self> {
        Ok(Self {
            grammar: MarkerGrammar::from_config(&config.markup)?,
            transformer: TemplateTransformer::from_config(&config.template, &config.artifacts),
            comment_scope: config.comments.scope,
        })
    }

    /// Load the embedded defaults and build a processor from them.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&load_defaults()?)
    }

    pub fn from_parts(
        grammar: MarkerGrammar,
        transformer: TemplateTransformer,
        comment_scope: CommentScope,
    ) -> Self {
        Self {
            grammar,
            transformer,
            comment_scope,
        }
    }

    pub fn grammar(&self) -> &MarkerGrammar {
        &self.grammar
    }

    pub fn transformer(&self) -> &TemplateTransformer {
        &self.transformer
    }

    /// Parse markup text: scan, assemble, transform.
    pub fn parse_text(&self, text: &str) -> Result<ParsedJob> {
        let text = normalize_line_endings(text);
        let document = assemble(&text, self.grammar.scan(&text))?;
        let template = self
            .transformer
            .transform(document.template(), document.exec().is_some());
        debug!(
            sections = document.len(),
            template_lines = template.lines().len(),
            "parsed markup"
        );
        Ok(ParsedJob { document, template })
    }

    /// Extract the comments of host-language source, then parse them as markup.
    ///
    /// Marker errors report the line of the host source, not of the joined comments.
    pub fn parse_source(&self, source: &str, language: HostLanguage) -> Result<ParsedJob> {
        let comments = extract_comments(language.comment_lexer(), source, self.comment_scope)?;
        debug!(%language, bytes = comments.text().len(), "parsing markup from comments");
        self.parse_text(comments.text()).map_err(|err| match err {
            ShoebillError::MalformedMarker { line, content } => ShoebillError::MalformedMarker {
                line: comments.source_line(line).unwrap_or(line),
                content,
            },
            other => other,
        })
    }

    pub fn parse_file(&self, path: impl AsRef<Path>, mode: SourceMode) -> Result<ParsedJob> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ShoebillError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), ?mode, "read source file");

        match mode {
            SourceMode::Markup => {
                let text = String::from_utf8(bytes).map_err(|err| ShoebillError::InvalidEncoding {
                    path: path.to_path_buf(),
                    valid_up_to: err.utf8_error().valid_up_to(),
                })?;
                self.parse_text(&text)
            }
            SourceMode::HostSource(language) => {
                let source = decode_host_source(&bytes)?;
                self.parse_source(&source, language)
            }
        }
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::from_parts(
            MarkerGrammar::default(),
            TemplateTransformer::default(),
            CommentScope::default(),
        )
    }
}

/// Host source that is not UTF-8 cannot be tokenized; report where decoding stopped.
fn decode_host_source(bytes: &[u8]) -> Result<String, TokenizationError> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text.to_string()),
        Err(err) => {
            let valid = &bytes[..err.valid_up_to()];
            // the prefix is valid by construction
            let prefix = std::str::from_utf8(valid).unwrap_or_default();
            let line = prefix.matches('\n').count() + 1;
            let column = prefix.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
            Err(TokenizationError::new(
                line,
                column,
                TokenizationErrorKind::InvalidUtf8,
            ))
        }
    }
}

/// Parse markup text with the default configuration.
pub fn parse_text(text: &str) -> Result<ParsedJob> {
    Processor::default().parse_text(text)
}

/// Parse a file with the default configuration.
pub fn parse_file(path: impl AsRef<Path>, mode: SourceMode) -> Result<ParsedJob> {
    Processor::default().parse_file(path, mode)
}
