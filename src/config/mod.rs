//! Rule-file configuration for cwatch.
//!
//! Rules live in YAML files: one file is one rule group with an optional
//! `cmd_regex` selector and a list of `highlights` (regex + fg/bg spec).
//! The core engine only ever sees the compiled [`crate::rules::RuleSet`].

mod io;
mod types;

pub use io::{default_rule_dir, default_rule_file, load};
pub use types::{RawHighlight, RawRuleGroup};
