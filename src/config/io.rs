//! Rule-file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::Regex;
use tracing::warn;

use super::types::RawRuleGroup;
use crate::rules::{HighlightRule, RuleGroup, RuleSet};
use crate::style::parse_style;

/// Default rule file (~/.config/cwatch/rules.yml)
pub fn default_rule_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("rules.yml"))
}

/// Default rule directory (~/.config/cwatch/rules.d)
pub fn default_rule_dir() -> Result<PathBuf> {
    Ok(config_dir()?.join("rules.d"))
}

fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(".config").join("cwatch"))
}

/// Load the rule set: every file in `rule_dir` in path order, then
/// `rule_file` appended last (the conventional catch-all position).
///
/// A file that fails to parse or validate invalidates only its own group:
/// it is skipped with a warning and the run continues. Missing paths are
/// silently fine.
pub fn load(rule_file: &Path, rule_dir: &Path) -> Result<RuleSet> {
    let mut groups = Vec::new();

    if rule_dir.is_dir() {
        let mut paths: Vec<PathBuf> = fs::read_dir(rule_dir)
            .with_context(|| format!("failed to read rule directory {}", rule_dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        for path in paths {
            match load_group(&path) {
                Ok(group) => groups.push(group),
                Err(err) => {
                    warn!(target: "config", path = %path.display(), "skipping rule file: {err:#}");
                }
            }
        }
    }

    if rule_file.is_file() {
        match load_group(rule_file) {
            Ok(group) => groups.push(group),
            Err(err) => {
                warn!(target: "config", path = %rule_file.display(), "skipping rule file: {err:#}");
            }
        }
    }

    Ok(RuleSet::new(groups))
}

fn load_group(path: &Path) -> Result<RuleGroup> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let raw: RawRuleGroup = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    group_from_raw(raw).with_context(|| format!("invalid rule file {}", path.display()))
}

fn group_from_raw(raw: RawRuleGroup) -> Result<RuleGroup> {
    let selector = if raw.cmd_regex.is_empty() {
        None
    } else {
        let regex = Regex::new(&raw.cmd_regex)
            .with_context(|| format!("couldn't compile regular expression {:?}", raw.cmd_regex))?;
        Some(regex)
    };

    let mut rules = Vec::with_capacity(raw.highlights.len());
    for highlight in raw.highlights {
        let pattern = Regex::new(&highlight.regex).with_context(|| {
            format!("couldn't compile regular expression {:?}", highlight.regex)
        })?;
        let style = parse_style(&highlight.fg, &highlight.bg)?;
        rules.push(HighlightRule { pattern, style });
    }

    Ok(RuleGroup { selector, rules })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use std::fs;
    use tempfile::tempdir;

    const KUBECTL_RULES: &str = "\
cmd_regex: \"kubectl\"
highlights:
  - regex: \"Running\"
    fg: \"green\"
  - regex: \"Error\"
    fg: \"white, bold\"
    bg: \"red\"
";

    #[test]
    fn loads_a_rule_file_with_styles() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("rules.yml");
        fs::write(&file, KUBECTL_RULES).unwrap();

        let rules = load(&file, &dir.path().join("missing.d")).unwrap();
        assert_eq!(rules.len(), 1);

        let group = rules.select("kubectl get pods").unwrap();
        assert_eq!(group.rules.len(), 2);
        assert_eq!(group.rules[0].style.fg, Color::Green);
        assert_eq!(group.rules[1].style.fg, Color::White);
        assert_eq!(group.rules[1].style.bg, Color::Red);
        assert!(group.rules[1].style.bold);
    }

    #[test]
    fn missing_paths_yield_an_empty_rule_set() {
        let dir = tempdir().unwrap();
        let rules = load(&dir.path().join("nope.yml"), &dir.path().join("nope.d")).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn directory_groups_come_sorted_with_the_main_file_last() {
        let dir = tempdir().unwrap();
        let rule_dir = dir.path().join("rules.d");
        fs::create_dir(&rule_dir).unwrap();
        fs::write(rule_dir.join("20-docker.yml"), "cmd_regex: \"docker\"\n").unwrap();
        fs::write(rule_dir.join("10-kubectl.yml"), "cmd_regex: \"kubectl\"\n").unwrap();
        let file = dir.path().join("rules.yml");
        fs::write(&file, "highlights: []\n").unwrap();

        let rules = load(&file, &rule_dir).unwrap();
        assert_eq!(rules.len(), 3);
        // The trailing catch-all from the main file picks up anything the
        // directory groups don't claim.
        assert!(rules.select("ls -la").unwrap().selector.is_none());
        let docker = rules.select("docker ps").unwrap();
        assert_eq!(docker.selector.as_ref().unwrap().as_str(), "docker");
    }

    #[test]
    fn broken_files_are_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        let rule_dir = dir.path().join("rules.d");
        fs::create_dir(&rule_dir).unwrap();
        fs::write(rule_dir.join("bad-yaml.yml"), "{ unterminated\n").unwrap();
        fs::write(
            rule_dir.join("bad-regex.yml"),
            "highlights:\n  - regex: \"[\"\n    fg: \"red\"\n",
        )
        .unwrap();
        fs::write(
            rule_dir.join("bad-color.yml"),
            "highlights:\n  - regex: \"x\"\n    fg: \"chartreuse-ish\"\n",
        )
        .unwrap();
        fs::write(rule_dir.join("good.yml"), "cmd_regex: \"ok\"\n").unwrap();

        let rules = load(&dir.path().join("none.yml"), &rule_dir).unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules.select("ok then").is_some());
    }

    #[test]
    fn bad_selector_invalidates_the_whole_group() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("rules.yml");
        fs::write(&file, "cmd_regex: \"(\"\nhighlights: []\n").unwrap();

        let rules = load(&file, &dir.path().join("nope.d")).unwrap();
        assert!(rules.is_empty());
    }
}
