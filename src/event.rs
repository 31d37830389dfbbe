use std::io;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Block until the next key press.
///
/// Release and repeat events, mouse input and resizes are skipped.
pub fn next_key() -> io::Result<KeyEvent> {
    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(key),
            Event::Resize(w, h) => tracing::debug!("Terminal resized to {w}x{h}"),
            _ => {}
        }
    }
}
