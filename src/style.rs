//! Cell styles and the fg/bg spec mini-language used by rule files.
//!
//! A spec string is a comma-separated list of case-insensitive names:
//! color names pick the foreground or background color (depending on which
//! field the spec came from), attribute names set attribute flags. An empty
//! spec is the terminal-default style.

use thiserror::Error;

/// The 16 named ANSI colors plus the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Style applied to a rendered cell.
///
/// The default is "terminal-default colors, no attributes".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub reverse: bool,
    pub blink: bool,
    pub strikethrough: bool,
}

/// Error raised for names a spec string does not recognize.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("unknown colour or attribute {0:?}")]
    UnknownName(String),
}

/// Parse the `fg:` and `bg:` spec strings of one highlight into a [`Style`].
pub fn parse_style(fg_spec: &str, bg_spec: &str) -> Result<Style, StyleError> {
    let mut style = Style::default();
    apply_spec(&mut style, fg_spec, true)?;
    apply_spec(&mut style, bg_spec, false)?;
    Ok(style)
}

fn apply_spec(style: &mut Style, spec: &str, foreground: bool) -> Result<(), StyleError> {
    if spec.trim().is_empty() {
        return Ok(());
    }

    for name in spec.split(',') {
        let name = name.trim().to_ascii_lowercase();
        if let Some(color) = color_by_name(&name) {
            if foreground {
                style.fg = color;
            } else {
                style.bg = color;
            }
            continue;
        }
        match name.as_str() {
            "bold" => style.bold = true,
            "dim" => style.dim = true,
            "italic" => style.italic = true,
            "underline" => style.underline = true,
            "reverse" => style.reverse = true,
            "blink" => style.blink = true,
            "strikethrough" => style.strikethrough = true,
            _ => return Err(StyleError::UnknownName(name)),
        }
    }

    Ok(())
}

fn color_by_name(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "bright-black" => Color::BrightBlack,
        "bright-red" => Color::BrightRed,
        "bright-green" => Color::BrightGreen,
        "bright-yellow" => Color::BrightYellow,
        "bright-blue" => Color::BrightBlue,
        "bright-magenta" => Color::BrightMagenta,
        "bright-cyan" => Color::BrightCyan,
        "bright-white" => Color::BrightWhite,
        _ => return None,
    };
    Some(color)
}
