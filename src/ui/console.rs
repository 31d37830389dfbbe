use std::io::{self, Stdout};
use std::thread;
use std::time::Duration;

use crossterm::event::KeyEvent;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::event;
use crate::ui::canvas::Canvas;

/// The display and keyboard a session runs on.
pub trait Console {
    /// Screen size as (columns, rows).
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Show the canvas, including its cursor position.
    fn present(&mut self, canvas: &Canvas) -> io::Result<()>;

    fn next_key(&mut self) -> io::Result<KeyEvent>;

    /// Block the session for `duration`.
    fn pause(&mut self, duration: Duration);

    /// Give the terminal back in the state it was found.
    fn restore(&mut self) -> io::Result<()>;
}

/// Console on the process's own terminal.
pub struct TerminalConsole {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalConsole {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }
}

impl Console for TerminalConsole {
    fn size(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }

    fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
        self.terminal.draw(|frame| {
            let area = frame.area().intersection(canvas.buffer().area);
            let buf = frame.buffer_mut();
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    buf[(x, y)] = canvas.buffer()[(x, y)].clone();
                }
            }
            frame.set_cursor_position(canvas.cursor());
        })?;
        Ok(())
    }

    fn next_key(&mut self) -> io::Result<KeyEvent> {
        event::next_key()
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalConsole {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
