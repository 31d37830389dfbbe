use std::io;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::session::SessionError;
use crate::store::{Setting, SettingsStore, StoreError};
use crate::ui::canvas::{Canvas, ColorPair};
use crate::ui::console::Console;
use crate::ui::layout::{SETTINGS_LIST_COL, SETTINGS_LIST_ROW};
use crate::ui::line_input::InputResult;
use crate::ui::message::{alert, draw_info_row, draw_instruction_row, draw_title_row};
use crate::ui::setting_widget::SettingWidget;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Edit,
}

/// What the loop should do after a key.
#[derive(Debug)]
pub enum Flow {
    Continue,
    Exit(Result<(), StoreError>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BrowseKey {
    Up,
    Down,
    Save,
    Other,
}

impl BrowseKey {
    fn classify(key: &KeyEvent) -> Self {
        match key.code {
            KeyCode::Up => BrowseKey::Up,
            KeyCode::Down => BrowseKey::Down,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => BrowseKey::Save,
            _ => BrowseKey::Other,
        }
    }
}

/// Navigation state: the fixed settings list, which one has focus, and the
/// single live widget for it. The mode is the widget's own editing flag.
pub struct App {
    settings: Vec<Setting>,
    current: usize,
    widget: SettingWidget,
    alert_delay: Duration,
}

impl App {
    /// Draw the title and every setting once, last to first, leaving focus on
    /// the first setting.
    pub fn start(
        store: &dyn SettingsStore,
        canvas: &mut Canvas,
        title: &str,
        alert_delay: Duration,
    ) -> Result<Self, StoreError> {
        let settings = store.settings().to_vec();
        let last = settings.len().checked_sub(1).ok_or(StoreError::NoSettings)?;

        draw_title_row(canvas, title);
        canvas.set_pair(ColorPair::Normal);

        let mut widget = widget_at(store, &settings, last);
        widget.draw(canvas);
        for index in (0..last).rev() {
            widget = widget_at(store, &settings, index);
            widget.draw(canvas);
        }

        Ok(Self {
            settings,
            current: 0,
            widget,
            alert_delay,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn mode(&self) -> Mode {
        if self.widget.is_editing() {
            Mode::Edit
        } else {
            Mode::Browse
        }
    }

    pub fn widget(&self) -> &SettingWidget {
        &self.widget
    }

    /// Redraw the info and instruction rows and the focused widget,
    /// highlighted for the current mode.
    pub fn redraw(&self, store: &dyn SettingsStore, canvas: &mut Canvas) {
        draw_info_row(canvas, &store.describe(self.widget.setting()));
        draw_instruction_row(canvas, self.widget.is_editing());

        let pair = match self.mode() {
            Mode::Edit => ColorPair::Edit,
            Mode::Browse => ColorPair::Select,
        };
        canvas.set_pair(pair);
        self.widget.draw(canvas);
        canvas.set_pair(ColorPair::Normal);
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        store: &mut dyn SettingsStore,
        canvas: &mut Canvas,
        console: &mut dyn Console,
    ) -> io::Result<Flow> {
        if self.widget.is_editing() {
            self.handle_edit_key(key, store, canvas, console)?;
            return Ok(Flow::Continue);
        }

        match BrowseKey::classify(&key) {
            BrowseKey::Down => {
                if self.current + 1 < self.settings.len() {
                    self.focus(self.current + 1, store, canvas);
                }
            }
            BrowseKey::Up => {
                if self.current > 0 {
                    self.focus(self.current - 1, store, canvas);
                }
            }
            BrowseKey::Save => return self.save_all(store, canvas, console).map(Flow::Exit),
            BrowseKey::Other => {
                tracing::debug!("Editing {}", self.widget.setting().name);
                self.widget.begin_edit(key);
            }
        }
        Ok(Flow::Continue)
    }

    fn handle_edit_key(
        &mut self,
        key: KeyEvent,
        store: &mut dyn SettingsStore,
        canvas: &mut Canvas,
        console: &mut dyn Console,
    ) -> io::Result<()> {
        match self.widget.begin_edit(key) {
            InputResult::Submit => {
                let name = self.widget.setting().name;
                match self.widget.save(store) {
                    Ok(()) => tracing::info!("Set {} = {:?}", name, self.widget.value()),
                    Err(err) => {
                        let text = format!(" Could not set {name}: {err} ");
                        alert(canvas, console, &text, self.alert_delay)?;
                    }
                }
                // Always show what the store now holds.
                self.widget.load(store);
            }
            InputResult::Cancel => {
                tracing::debug!("Discarded edit of {}", self.widget.setting().name);
                self.widget.load(store);
            }
            InputResult::Continue => {}
        }
        Ok(())
    }

    fn focus(&mut self, next: usize, store: &dyn SettingsStore, canvas: &mut Canvas) {
        // Unhighlight the row being left.
        self.widget.draw(canvas);
        self.widget = widget_at(store, &self.settings, next);
        self.current = next;
        tracing::debug!("Focus on {}", self.widget.setting().name);
    }

    fn save_all(
        &mut self,
        store: &mut dyn SettingsStore,
        canvas: &mut Canvas,
        console: &mut dyn Console,
    ) -> io::Result<Result<(), StoreError>> {
        match store.persist_all() {
            Ok(()) => {
                tracing::info!("Configuration saved");
                Ok(Ok(()))
            }
            Err(err) => {
                tracing::error!("Could not save options: {}", err);
                let text = format!(" Could not save options: {err} ");
                alert(canvas, console, &text, self.alert_delay)?;
                Ok(Err(err))
            }
        }
    }

    /// Run until the save command. The result is the outcome of the final
    /// save.
    pub fn run(
        &mut self,
        store: &mut dyn SettingsStore,
        canvas: &mut Canvas,
        console: &mut dyn Console,
    ) -> Result<(), SessionError> {
        loop {
            self.redraw(store, canvas);
            console.present(canvas)?;
            let key = console.next_key()?;
            if let Flow::Exit(result) = self.handle_key(key, store, canvas, console)? {
                return result.map_err(SessionError::Persist);
            }
        }
    }
}

fn widget_at(store: &dyn SettingsStore, settings: &[Setting], index: usize) -> SettingWidget {
    SettingWidget::create(
        store,
        settings[index],
        SETTINGS_LIST_ROW + index as u16,
        SETTINGS_LIST_COL,
    )
}
