//! Main module for shoebill library functionality

pub mod artifacts;
pub mod comments;
pub mod config;
pub mod error;
pub mod markup;
pub mod processor;
pub mod submit;
pub mod template;

#[cfg(test)]
pub mod testing;

pub use error::{Result, ShoebillError, TokenizationError, TokenizationErrorKind};
pub use processor::{parse_file, parse_text, ParsedJob, Processor, SourceMode};
