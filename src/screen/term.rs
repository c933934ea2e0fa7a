//! Live terminal surface backed by crossterm.
//!
//! Owns the terminal session: raw mode and the alternate screen are entered
//! on construction and restored on drop, so a propagated error still leaves
//! the user's shell intact.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::style::{self, ContentStyle, StyledContent};
use crossterm::{cursor, execute, queue, terminal};

use super::Surface;
use crate::style::{Color, Style};

pub struct TermScreen {
    out: io::Stdout,
    cursor: Option<(u16, u16)>,
}

impl TermScreen {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let mut out = io::stdout();
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)
            .context("failed to enter alternate screen")?;
        Ok(Self { out, cursor: None })
    }
}

impl Drop for TermScreen {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Surface for TermScreen {
    fn clear(&mut self) {
        self.cursor = None;
        let _ = queue!(
            self.out,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All)
        );
    }

    fn size(&self) -> (usize, usize) {
        terminal::size()
            .map(|(width, height)| (width as usize, height as usize))
            .unwrap_or((80, 24))
    }

    fn set_cell(&mut self, col: usize, row: usize, ch: char, style: Style) {
        let (width, height) = self.size();
        if col >= width || row >= height {
            return;
        }
        let content = StyledContent::new(content_style(style), ch);
        let _ = queue!(
            self.out,
            cursor::MoveTo(col as u16, row as u16),
            style::PrintStyledContent(content)
        );
    }

    fn set_cursor(&mut self, col: usize, row: usize) {
        self.cursor = Some((col as u16, row as u16));
    }

    fn present(&mut self) -> Result<()> {
        // The visible cursor is positioned last so drawing order doesn't
        // leave it wherever the final cell happened to be.
        match self.cursor {
            Some((col, row)) => {
                let _ = queue!(self.out, cursor::MoveTo(col, row), cursor::Show);
            }
            None => {
                let _ = queue!(self.out, cursor::Hide);
            }
        }
        self.out.flush().context("failed to flush terminal output")
    }
}

fn content_style(style: Style) -> ContentStyle {
    let mut attributes = style::Attributes::default();
    if style.bold {
        attributes.set(style::Attribute::Bold);
    }
    if style.dim {
        attributes.set(style::Attribute::Dim);
    }
    if style.italic {
        attributes.set(style::Attribute::Italic);
    }
    if style.underline {
        attributes.set(style::Attribute::Underlined);
    }
    if style.reverse {
        attributes.set(style::Attribute::Reverse);
    }
    if style.blink {
        attributes.set(style::Attribute::SlowBlink);
    }
    if style.strikethrough {
        attributes.set(style::Attribute::CrossedOut);
    }

    ContentStyle {
        foreground_color: term_color(style.fg),
        background_color: term_color(style.bg),
        underline_color: None,
        attributes,
    }
}

fn term_color(color: Color) -> Option<style::Color> {
    use style::Color as Term;

    match color {
        Color::Default => None,
        Color::Black => Some(Term::Black),
        Color::Red => Some(Term::DarkRed),
        Color::Green => Some(Term::DarkGreen),
        Color::Yellow => Some(Term::DarkYellow),
        Color::Blue => Some(Term::DarkBlue),
        Color::Magenta => Some(Term::DarkMagenta),
        Color::Cyan => Some(Term::DarkCyan),
        Color::White => Some(Term::Grey),
        Color::BrightBlack => Some(Term::DarkGrey),
        Color::BrightRed => Some(Term::Red),
        Color::BrightGreen => Some(Term::Green),
        Color::BrightYellow => Some(Term::Yellow),
        Color::BrightBlue => Some(Term::Blue),
        Color::BrightMagenta => Some(Term::Magenta),
        Color::BrightCyan => Some(Term::Cyan),
        Color::BrightWhite => Some(Term::White),
    }
}
