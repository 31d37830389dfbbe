use crossterm::event::KeyEvent;

use crate::store::setting::truncate_chars;
use crate::store::{MAX_VALUE_LEN, Setting, SettingsStore, StoreError};
use crate::ui::canvas::Canvas;
use crate::ui::layout::{VALUE_WIDTH, layout_row};
use crate::ui::line_input::{InputResult, LineInput};

/// Editable view of one setting at a fixed screen position.
pub struct SettingWidget {
    setting: Setting,
    row: u16,
    col: u16,
    editing: bool,
    /// Owns the value buffer.
    editor: LineInput,
}

impl SettingWidget {
    pub fn create(store: &dyn SettingsStore, setting: Setting, row: u16, col: u16) -> Self {
        let mut widget = Self {
            setting,
            row,
            col,
            editing: false,
            editor: LineInput::new("", MAX_VALUE_LEN, VALUE_WIDTH),
        };
        widget.load(store);
        widget
    }

    /// Re-read the value from the store, dropping any unsaved edit.
    pub fn load(&mut self, store: &dyn SettingsStore) {
        self.editing = false;

        let value = match store.read(&self.setting) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!("No value for {}: {}", self.setting.name, err);
                String::new()
            }
        };

        self.editor = LineInput::new(
            truncate_chars(&value, MAX_VALUE_LEN),
            MAX_VALUE_LEN,
            VALUE_WIDTH,
        );
    }

    pub fn save(&self, store: &mut dyn SettingsStore) -> Result<(), StoreError> {
        store.write(&self.setting, self.editor.value())
    }

    /// Draw the row in the canvas's current colour; in edit mode the editor
    /// is drawn over the value field.
    pub fn draw(&self, canvas: &mut Canvas) {
        let row = layout_row(self.setting.name, self.editor.value());
        canvas.print_at(self.row, self.col, &row.text);
        canvas.move_to(self.row, self.col + row.cursor_offset as u16);
        if self.editing {
            self.editor
                .draw(canvas, self.row, self.col + row.value_offset as u16);
        }
    }

    pub fn begin_edit(&mut self, key: KeyEvent) -> InputResult {
        self.editing = true;
        self.editor.handle(key)
    }

    pub fn setting(&self) -> &Setting {
        &self.setting
    }

    pub fn value(&self) -> &str {
        self.editor.value()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SettingType;
    use crate::store::memory::MemoryStore;
    use crate::ui::layout::{EMPTY_VALUE, ROW_WIDTH, VALUE_OFFSET};
    use crate::ui::theme::Theme;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::layout::Position;

    const HOST: Setting = Setting::new("hostname", SettingType::String, "Host name");
    const IP: Setting = Setting::new("ip", SettingType::Ipv4, "IPv4 address");

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn store() -> MemoryStore {
        MemoryStore::new(vec![HOST, IP])
    }

    /// Store whose reads always fail.
    struct BrokenStore(Vec<Setting>);

    impl SettingsStore for BrokenStore {
        fn settings(&self) -> &[Setting] {
            &self.0
        }
        fn read(&self, _: &Setting) -> Result<String, StoreError> {
            Err(StoreError::Io(std::io::Error::other("bus error")))
        }
        fn write(&mut self, _: &Setting, _: &str) -> Result<(), StoreError> {
            Ok(())
        }
        fn persist_all(&mut self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn create_loads_stored_value() {
        let mut store = store();
        store.write(&HOST, "pxe-box").unwrap();
        let widget = SettingWidget::create(&store, HOST, 3, 1);
        assert_eq!(widget.value(), "pxe-box");
        assert!(!widget.is_editing());
    }

    #[test]
    fn read_failure_yields_empty_browse_state() {
        let store = BrokenStore(vec![HOST]);
        let mut widget = SettingWidget::create(&store, HOST, 3, 1);
        assert_eq!(widget.value(), "");
        widget.begin_edit(key(KeyCode::Char('x')));
        widget.load(&store);
        assert_eq!(widget.value(), "");
        assert!(!widget.is_editing());
    }

    #[test]
    fn begin_edit_forwards_key() {
        let store = store();
        let mut widget = SettingWidget::create(&store, HOST, 3, 1);
        assert_eq!(
            widget.begin_edit(key(KeyCode::Char('a'))),
            InputResult::Continue
        );
        assert!(widget.is_editing());
        assert_eq!(widget.value(), "a");
        assert_eq!(widget.begin_edit(key(KeyCode::Enter)), InputResult::Submit);
    }

    #[test]
    fn save_returns_store_error_and_keeps_buffer() {
        let mut store = store();
        let mut widget = SettingWidget::create(&store, IP, 4, 1);
        for ch in "bogus".chars() {
            widget.begin_edit(key(KeyCode::Char(ch)));
        }
        let err = widget.save(&mut store).unwrap_err();
        assert!(matches!(err, StoreError::Invalid { .. }));
        assert_eq!(widget.value(), "bogus");
        assert!(widget.is_editing());
    }

    #[test]
    fn load_discards_unsaved_edit() {
        let mut store = store();
        store.write(&HOST, "orig").unwrap();
        let mut widget = SettingWidget::create(&store, HOST, 3, 1);
        widget.begin_edit(key(KeyCode::Char('!')));
        widget.load(&store);
        assert_eq!(widget.value(), "orig");
        assert!(!widget.is_editing());
    }

    #[test]
    fn draw_browse_row_and_cursor() {
        let store = store();
        let widget = SettingWidget::create(&store, HOST, 3, 1);
        let mut canvas = Canvas::new(80, 25, Theme::default());
        widget.draw(&mut canvas);
        let row = canvas.row_text(3);
        assert!(row.starts_with("  hostname....... <not specified>"));
        assert_eq!(
            canvas.cursor(),
            Position::new(1 + (VALUE_OFFSET + EMPTY_VALUE.len()) as u16, 3)
        );
    }

    #[test]
    fn draw_edit_mode_overlays_editor() {
        let store = store();
        let mut widget = SettingWidget::create(&store, HOST, 3, 1);
        widget.begin_edit(key(KeyCode::Char('z')));
        let mut canvas = Canvas::new(80, 25, Theme::default());
        widget.draw(&mut canvas);
        let row = canvas.row_text(3);
        assert_eq!(&row[1 + VALUE_OFFSET..2 + VALUE_OFFSET], "z");
        assert_eq!(canvas.cursor(), Position::new(1 + VALUE_OFFSET as u16 + 1, 3));
        // nothing beyond the value field and trailing gutter
        assert_eq!(row[1 + VALUE_OFFSET + VALUE_WIDTH..].trim(), "");
    }

    #[test]
    fn wide_value_stays_inside_its_row() {
        let mut store = store();
        store.write(&HOST, &"日".repeat(60)).unwrap();
        let mut canvas = Canvas::new(200, 25, Theme::default());
        canvas.print_at(3, 0, &"#".repeat(200));

        let mut widget = SettingWidget::create(&store, HOST, 3, 1);
        widget.draw(&mut canvas);
        let row_end = 1 + ROW_WIDTH as u16;
        for x in row_end..200 {
            assert_eq!(canvas.buffer()[(x, 3)].symbol(), "#", "browse, column {x}");
        }
        assert_eq!(canvas.cursor(), Position::new(1 + (VALUE_OFFSET + VALUE_WIDTH) as u16, 3));

        widget.begin_edit(key(KeyCode::End));
        widget.draw(&mut canvas);
        for x in row_end..200 {
            assert_eq!(canvas.buffer()[(x, 3)].symbol(), "#", "edit, column {x}");
        }
    }

    #[test]
    fn draw_is_idempotent() {
        let mut store = store();
        store.write(&IP, "10.1.1.1").unwrap();
        let widget = SettingWidget::create(&store, IP, 5, 1);
        let mut canvas = Canvas::new(80, 25, Theme::default());
        widget.draw(&mut canvas);
        let first = canvas.row_text(5);
        widget.draw(&mut canvas);
        assert_eq!(canvas.row_text(5), first);
    }
}
