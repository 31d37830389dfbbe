use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthChar;

use crate::ui::canvas::Canvas;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

/// Single-line editor over a bounded buffer, shown in a fixed-width field.
pub struct LineInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
    /// Maximum length in chars.
    max_len: usize,
    /// Field width in terminal columns.
    width: usize,
    /// First visible char when the text is wider than the field.
    first: usize,
}

impl LineInput {
    pub fn new(text: &str, max_len: usize, width: usize) -> Self {
        let text: String = text.chars().take(max_len).collect();
        let mut input = Self {
            cursor: text.chars().count(),
            text,
            max_len,
            width: width.max(1),
            first: 0,
        };
        input.scroll_to_cursor();
        input
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Char('c') if ctrl => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Char('m') | KeyCode::Char('j') if ctrl => return InputResult::Submit,

            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Right => {
                let len = self.text.chars().count();
                if self.cursor < len {
                    self.cursor += 1;
                }
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.chars().count(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let byte_offset = self.char_to_byte(self.cursor - 1);
                    self.remove_char_at(byte_offset);
                    self.cursor -= 1;
                }
            }
            KeyCode::Delete => {
                let len = self.text.chars().count();
                if self.cursor < len {
                    let byte_offset = self.char_to_byte(self.cursor);
                    self.remove_char_at(byte_offset);
                }
            }
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.text.chars().count(),
            KeyCode::Char('u') if ctrl => {
                self.text.clear();
                self.cursor = 0;
            }
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Char(ch) if !ctrl => {
                if self.text.chars().count() < self.max_len {
                    let byte_offset = self.char_to_byte(self.cursor);
                    self.text.insert(byte_offset, ch);
                    self.cursor += 1;
                }
            }
            _ => {}
        }
        self.scroll_to_cursor();
        InputResult::Continue
    }

    /// Draw the visible window of the text over the field starting at
    /// (`row`, `col`), space-filled to exactly the field width in columns,
    /// and place the canvas cursor on the edit position.
    pub fn draw(&self, canvas: &mut Canvas, row: u16, col: u16) {
        let mut field = String::new();
        let mut used = 0;
        for ch in self.text.chars().skip(self.first) {
            let w = char_width(ch);
            if used + w > self.width {
                break;
            }
            field.push(ch);
            used += w;
        }
        field.extend(std::iter::repeat_n(' ', self.width - used));
        canvas.print_at(row, col, &field);
        let offset = self.columns(self.first, self.cursor) as u16;
        canvas.move_to(row, col.saturating_add(offset));
    }

    /// Keep the cell under the cursor inside the field.
    fn scroll_to_cursor(&mut self) {
        if self.cursor < self.first {
            self.first = self.cursor;
            return;
        }
        let under = self.text.chars().nth(self.cursor).map_or(1, char_width).max(1);
        while self.first < self.cursor && self.columns(self.first, self.cursor) + under > self.width
        {
            self.first += 1;
        }
    }

    /// Terminal columns taken by chars `from..to`.
    fn columns(&self, from: usize, to: usize) -> usize {
        self.text.chars().skip(from).take(to - from).map(char_width).sum()
    }

    fn remove_char_at(&mut self, byte_offset: usize) {
        if let Some(ch) = self.text[byte_offset..].chars().next() {
            self.text
                .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
        }
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    /// Delete word before cursor (unix-word-rubout: skip whitespace, then non-whitespace).
    fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;

        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }

        let start_byte = self.char_to_byte(pos);
        let end_byte = self.char_to_byte(self.cursor);
        self.text.replace_range(start_byte..end_byte, "");
        self.cursor = pos;
    }
}

fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}
