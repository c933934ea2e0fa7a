//! Highlight rules and rule-group selection.
//!
//! A [`RuleSet`] is an ordered list of [`RuleGroup`]s. Each group carries an
//! optional selector regex that is matched against the watched command line;
//! the first group whose selector is absent or matches wins. Group order and
//! rule order are both significant, so the set is immutable once built.

use regex::Regex;

use crate::style::Style;

/// One highlight: every match of `pattern` in an output line takes `style`.
#[derive(Debug, Clone)]
pub struct HighlightRule {
    pub pattern: Regex,
    pub style: Style,
}

/// An ordered set of highlight rules gated by a command selector.
///
/// `selector: None` is the catch-all: the group applies to any command.
#[derive(Debug, Clone, Default)]
pub struct RuleGroup {
    pub selector: Option<Regex>,
    pub rules: Vec<HighlightRule>,
}

impl RuleGroup {
    /// Whether this group applies to the given command line.
    ///
    /// Selector matching uses substring semantics; the pattern itself has to
    /// anchor if it wants full-line matching.
    pub fn applies_to(&self, command_line: &str) -> bool {
        match &self.selector {
            Some(selector) => selector.is_match(command_line),
            None => true,
        }
    }
}

/// Ordered rule groups for all watched commands.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    groups: Vec<RuleGroup>,
}

impl RuleSet {
    pub fn new(groups: Vec<RuleGroup>) -> Self {
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Pick the first group that applies to `command_line`.
    ///
    /// `None` is a normal outcome, not an error: the output renders unstyled.
    pub fn select(&self, command_line: &str) -> Option<&RuleGroup> {
        self.groups.iter().find(|group| group.applies_to(command_line))
    }
}
