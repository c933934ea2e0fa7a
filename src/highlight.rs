//! The highlighting engine: one output line in, styled cells out.

use crate::rules::RuleGroup;
use crate::style::Style;

/// One rendered character position: a Unicode code point plus its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

/// Turn a line of text into styled cells, one per code point.
///
/// Every cell starts with the default style. Each rule of `group` is then
/// applied in order: all non-overlapping matches of its pattern are found
/// over the whole line, and every cell inside a match range takes the rule's
/// style. Where ranges of different rules overlap, the later rule wins on
/// the overlapping characters.
pub fn highlight(line: &str, group: Option<&RuleGroup>) -> Vec<Cell> {
    let mut cells: Vec<Cell> = line
        .chars()
        .map(|ch| Cell {
            ch,
            style: Style::default(),
        })
        .collect();

    let Some(group) = group else {
        return cells;
    };

    // Match offsets are byte positions; map them to code-point indices so a
    // match never colors a fragment of a multi-byte character.
    let starts: Vec<usize> = line.char_indices().map(|(at, _)| at).collect();

    for rule in &group.rules {
        for found in rule.pattern.find_iter(line) {
            let from = starts.partition_point(|&at| at < found.start());
            let to = starts.partition_point(|&at| at < found.end());
            for cell in &mut cells[from..to] {
                cell.style = rule.style;
            }
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::HighlightRule;
    use crate::style::Color;
    use regex::Regex;

    fn rule(pattern: &str, style: Style) -> HighlightRule {
        HighlightRule {
            pattern: Regex::new(pattern).unwrap(),
            style,
        }
    }

    fn group(rules: Vec<HighlightRule>) -> RuleGroup {
        RuleGroup {
            selector: None,
            rules,
        }
    }

    fn chars(cells: &[Cell]) -> String {
        cells.iter().map(|c| c.ch).collect()
    }

    #[test]
    fn no_group_yields_default_styled_cells() {
        let cells = highlight("hello", None);
        assert_eq!(chars(&cells), "hello");
        assert!(cells.iter().all(|c| c.style == Style::default()));
    }

    #[test]
    fn empty_line_yields_no_cells() {
        assert!(highlight("", None).is_empty());
        assert!(highlight("", Some(&group(vec![]))).is_empty());
    }

    #[test]
    fn single_match_colors_exactly_its_range() {
        let green = Style {
            fg: Color::Green,
            ..Style::default()
        };
        let group = group(vec![rule("b", green)]);

        let cells = highlight("abc", Some(&group));
        assert_eq!(cells[0].style, Style::default());
        assert_eq!(cells[1].style, green);
        assert_eq!(cells[2].style, Style::default());
    }

    #[test]
    fn anchored_pattern_that_misses_is_a_noop() {
        let green = Style {
            fg: Color::Green,
            ..Style::default()
        };
        let group = group(vec![rule("^y", green)]);

        let cells = highlight("xyz", Some(&group));
        assert!(cells.iter().all(|c| c.style == Style::default()));
    }

    #[test]
    fn all_non_overlapping_matches_are_colored() {
        let red = Style {
            fg: Color::Red,
            ..Style::default()
        };
        let group = group(vec![rule("a", red)]);

        let cells = highlight("a b a", Some(&group));
        assert_eq!(cells[0].style, red);
        assert_eq!(cells[2].style, Style::default());
        assert_eq!(cells[4].style, red);
    }

    #[test]
    fn multibyte_line_gets_one_cell_per_code_point() {
        let marked = Style {
            fg: Color::Yellow,
            bold: true,
            ..Style::default()
        };
        let group = group(vec![rule("的狗", marked)]);

        let cells = highlight("我的狗", Some(&group));
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0], Cell { ch: '我', style: Style::default() });
        assert_eq!(cells[1], Cell { ch: '的', style: marked });
        assert_eq!(cells[2], Cell { ch: '狗', style: marked });
    }

    #[test]
    fn later_rule_wins_on_overlap() {
        let red = Style {
            fg: Color::Red,
            ..Style::default()
        };
        let green = Style {
            fg: Color::Green,
            ..Style::default()
        };
        let group = group(vec![rule("abc", red), rule("bcd", green)]);

        let cells = highlight("abcd", Some(&group));
        assert_eq!(cells[0].style, red);
        assert_eq!(cells[1].style, green);
        assert_eq!(cells[2].style, green);
        assert_eq!(cells[3].style, green);
    }

    #[test]
    fn zero_width_match_colors_nothing() {
        let red = Style {
            fg: Color::Red,
            ..Style::default()
        };
        let group = group(vec![rule("x*", red)]);

        let cells = highlight("ab", Some(&group));
        assert!(cells.iter().all(|c| c.style == Style::default()));
    }
}
