//! Submit template transformation
//!
//! The TEMPLATE body is an ordered list of `key = value` lines. Values are
//! opaque here; only attribute names are inspected. See [`transformer`] for the
//! order of passes.

pub mod rewrite;
pub mod transformer;

pub use rewrite::{attribute_key, RewriteRule, RewriteTable};
pub use transformer::{SubmitTemplate, TemplateTransformer};
