//! Raw serde types for YAML rule files.

use serde::Deserialize;

/// One rule file = one rule group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRuleGroup {
    /// Selector regex matched against the command line; empty or absent
    /// makes the group a catch-all.
    #[serde(default)]
    pub cmd_regex: String,
    #[serde(default)]
    pub highlights: Vec<RawHighlight>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHighlight {
    pub regex: String,
    #[serde(default)]
    pub fg: String,
    #[serde(default)]
    pub bg: String,
}
