//! Attribute rewrite table
//!
//! A closed, ordered list of `from -> to` attribute names. Only the left-hand
//! side of a `key = value` line is compared, by exact string equality after
//! trimming; the rest of the line is kept byte for byte.

use crate::shoebill::config::RewriteRuleConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pub from: String,
    pub to: String,
}

impl RewriteRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl From<&RewriteRuleConfig> for RewriteRule {
    fn from(config: &RewriteRuleConfig) -> Self {
        Self::new(config.from.as_str(), config.to.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteTable {
    rules: Vec<RewriteRule>,
}

impl RewriteTable {
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Replacement for an attribute name, if the table has one.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.from == key)
            .map(|rule| rule.to.as_str())
    }

    /// Rewrite the attribute name of a single template line.
    pub fn rewrite_line(&self, line: &str) -> String {
        let Some((lhs, rhs)) = line.split_once('=') else {
            return line.to_string();
        };
        let key = lhs.trim();
        let Some(replacement) = self.lookup(key) else {
            return line.to_string();
        };
        let leading = lhs.len() - lhs.trim_start().len();
        let trailing = &lhs[leading + key.len()..];
        format!("{}{}{}={}", &lhs[..leading], replacement, trailing, rhs)
    }
}

impl Default for RewriteTable {
    fn default() -> Self {
        Self::new(vec![
            RewriteRule::new("RequestDisk", "request_disk"),
            RewriteRule::new("RequestMemory", "request_memory"),
            RewriteRule::new("RequestCpus", "request_cpus"),
            RewriteRule::new("TransferInputFiles", "transfer_input_files"),
            RewriteRule::new("TransferOutputFiles", "transfer_output_files"),
        ])
    }
}

/// The trimmed attribute name of a `key = value` line, if any.
pub fn attribute_key(line: &str) -> Option<&str> {
    let (lhs, _) = line.split_once('=')?;
    let key = lhs.trim();
    (!key.is_empty()).then_some(key)
}
