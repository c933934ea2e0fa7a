//! In-memory display surface.
//!
//! Records what a renderer drew into a plain cell grid so tests can assert
//! on text and styles without a real terminal.

use std::fmt;

use anyhow::Result;
use unicode_width::UnicodeWidthChar;

use super::Surface;
use crate::highlight::Cell;
use crate::style::Style;

/// A cell-grid surface backed by nothing but memory.
#[derive(Debug, Clone)]
pub struct BufferScreen {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
    cursor: Option<(usize, usize)>,
}

impl BufferScreen {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![Cell::default(); width]; height],
            cursor: None,
        }
    }

    /// Change dimensions, dropping previous contents.
    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn cell(&self, col: usize, row: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn cursor(&self) -> Option<(usize, usize)> {
        self.cursor
    }

    /// Text of one row with trailing whitespace trimmed.
    pub fn row_text(&self, row: usize) -> String {
        self.cells[row]
            .iter()
            .map(|c| c.ch)
            .collect::<String>()
            .trim_end()
            .to_string()
    }
}

impl Surface for BufferScreen {
    fn clear(&mut self) {
        for row in &mut self.cells {
            for cell in row {
                *cell = Cell::default();
            }
        }
        self.cursor = None;
    }

    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn set_cell(&mut self, col: usize, row: usize, ch: char, style: Style) {
        if col >= self.width || row >= self.height {
            return;
        }
        self.cells[row][col] = Cell { ch, style };
        // The continuation column of a wide glyph carries no character of
        // its own but keeps the glyph's style.
        if ch.width().unwrap_or(0) == 2 && col + 1 < self.width {
            self.cells[row][col + 1] = Cell { ch: ' ', style };
        }
    }

    fn set_cursor(&mut self, col: usize, row: usize) {
        self.cursor = Some((col, row));
    }

    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

impl fmt::Display for BufferScreen {
    /// The visible content as text, with empty trailing lines removed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = (0..self.height).map(|row| self.row_text(row)).collect();
        while lines.last().map(|l| l.is_empty()).unwrap_or(false) {
            lines.pop();
        }
        write!(f, "{}", lines.join("\n"))
    }
}
