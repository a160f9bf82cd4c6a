//! Configuration loading for shoebill.
//!
//! `defaults/shoebill.default.toml` is embedded into the crate so that the
//! documented defaults and runtime behavior stay in sync. Callers layer
//! user-specific files on top of those defaults via [`Loader`] before
//! deserializing into [`ShoebillConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::shoebill::comments::HostLanguage;

const DEFAULT_TOML: &str = include_str!("../../defaults/shoebill.default.toml");

/// Top-level configuration consumed by the [`Processor`](crate::shoebill::processor::Processor).
#[derive(Debug, Clone, Deserialize)]
pub struct ShoebillConfig {
    pub markup: MarkupConfig,
    pub template: TemplateConfig,
    pub artifacts: ArtifactsConfig,
    pub comments: CommentsConfig,
}

/// Marker syntax.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkupConfig {
    pub prefix: String,
    pub end_keyword: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplateConfig {
    pub container_universe: String,
    pub rewrites: Vec<RewriteRuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RewriteRuleConfig {
    pub from: String,
    pub to: String,
}

/// File names of the derived artifacts. The template trailer and the
/// executable augmentation refer to these names.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    pub table_file: String,
    pub exec_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentsConfig {
    pub scope: CommentScope,
    /// Host language assumed when markup is read from a program
    pub language: HostLanguage,
}

/// Which lexical comments the extractor keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentScope {
    /// Every comment token, including indented and trailing comments.
    #[default]
    Anywhere,
    /// Only comments whose physical line starts with the comment introducer.
    LineStart,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ShoebillConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ShoebillConfig, ConfigError> {
    Loader::new().build()
}
