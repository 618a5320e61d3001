//! Fixer configuration.

use serde::Deserialize;

use crate::rules::Rule;

/// Which rewrites the fixer may apply.
///
/// The default enables every Layer-1 rule and the Layer-2 gate.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixerOptions {
    pub disabled_rules: Vec<Rule>,
    pub resolve_identifiers: bool,
}

impl Default for FixerOptions {
    fn default() -> Self {
        Self {
            disabled_rules: Vec::new(),
            resolve_identifiers: true,
        }
    }
}

impl FixerOptions {
    #[must_use]
    pub fn is_enabled(&self, rule: Rule) -> bool {
        !self.disabled_rules.contains(&rule)
    }

    /// Disable `rule`; disabling twice is a no-op.
    pub fn disable(&mut self, rule: Rule) {
        if self.is_enabled(rule) {
            self.disabled_rules.push(rule);
        }
    }
}
