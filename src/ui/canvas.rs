use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorPair {
    Normal,
    Select,
    Edit,
    Alert,
}

/// Persistent screen contents.
///
/// Unlike a ratatui frame, what is written here stays until overwritten,
/// so rows drawn once (the settings list, the title) survive every later
/// redraw. The console copies the canvas into each frame it presents.
pub struct Canvas {
    buffer: Buffer,
    theme: Theme,
    pair: ColorPair,
    bold: bool,
    cursor: Position,
}

impl Canvas {
    pub fn new(width: u16, height: u16, theme: Theme) -> Self {
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, width, height)),
            theme,
            pair: ColorPair::Normal,
            bold: false,
            cursor: Position::new(0, 0),
        }
    }

    pub fn width(&self) -> u16 {
        self.buffer.area.width
    }

    pub fn height(&self) -> u16 {
        self.buffer.area.height
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn pair(&self) -> ColorPair {
        self.pair
    }

    pub fn set_pair(&mut self, pair: ColorPair) {
        self.pair = pair;
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    fn style(&self) -> Style {
        let style = self.theme.style(self.pair);
        if self.bold {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn move_to(&mut self, row: u16, col: u16) {
        self.cursor = Position::new(col.min(self.width()), row.min(self.height()));
    }

    /// Print `text` at (`row`, `col`) in the current color, clipped to the
    /// right edge. Leaves the cursor after the last printed cell.
    pub fn print_at(&mut self, row: u16, col: u16, text: &str) {
        if row >= self.height() || col >= self.width() {
            return;
        }
        let max_width = (self.width() - col) as usize;
        let style = self.style();
        let (end, _) = self.buffer.set_stringn(col, row, text, max_width, style);
        self.move_to(row, end);
    }

    /// Blank the whole row in the current color and park the cursor at its
    /// start.
    pub fn clear_row(&mut self, row: u16) {
        if row >= self.height() {
            return;
        }
        let style = self.style();
        for x in 0..self.width() {
            self.buffer[(x, row)].reset();
            self.buffer[(x, row)].set_style(style);
        }
        self.move_to(row, 0);
    }

    /// Blank the entire canvas in the current color.
    pub fn erase(&mut self) {
        for row in 0..self.height() {
            self.clear_row(row);
        }
        self.move_to(0, 0);
    }

    /// Text content of a row, for inspection.
    pub fn row_text(&self, row: u16) -> String {
        if row >= self.height() {
            return String::new();
        }
        (0..self.width())
            .map(|x| self.buffer[(x, row)].symbol())
            .collect()
    }

    pub fn style_at(&self, row: u16, col: u16) -> Style {
        self.buffer[(col, row)].style()
    }
}
