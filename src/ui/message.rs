use std::io;
use std::time::Duration;

use crate::ui::canvas::{Canvas, ColorPair};
use crate::ui::console::Console;
use crate::ui::layout::{
    ALERT_ROW, INFO_ROW, INSTRUCTION_PAD, INSTRUCTION_ROW, TITLE_ROW, centered_col,
};

/// Print `text` centred on `row`.
pub fn msg(canvas: &mut Canvas, row: u16, text: &str) {
    let col = centered_col(canvas.width(), text);
    canvas.print_at(row, col, text);
}

pub fn clear_msg(canvas: &mut Canvas, row: u16) {
    canvas.clear_row(row);
}

/// Show `text` on the alert row in the alert colour, hold it for `delay`,
/// then clear it. Nothing else runs while the alert is up.
pub fn alert(
    canvas: &mut Canvas,
    console: &mut dyn Console,
    text: &str,
    delay: Duration,
) -> io::Result<()> {
    tracing::warn!("Alert: {}", text.trim());
    clear_msg(canvas, ALERT_ROW);
    canvas.set_pair(ColorPair::Alert);
    msg(canvas, ALERT_ROW, text);
    console.present(canvas)?;
    console.pause(delay);
    canvas.set_pair(ColorPair::Normal);
    clear_msg(canvas, ALERT_ROW);
    Ok(())
}

pub fn draw_title_row(canvas: &mut Canvas, title: &str) {
    canvas.set_bold(true);
    msg(canvas, TITLE_ROW, title);
    canvas.set_bold(false);
}

pub fn draw_info_row(canvas: &mut Canvas, description: &str) {
    clear_msg(canvas, INFO_ROW);
    canvas.set_bold(true);
    msg(canvas, INFO_ROW, description);
    canvas.set_bold(false);
}

pub fn instruction_text(editing: bool) -> String {
    if editing {
        format!("Enter - accept changes{INSTRUCTION_PAD}Ctrl-C - discard changes")
    } else {
        "Ctrl-S - save configuration".to_string()
    }
}

pub fn draw_instruction_row(canvas: &mut Canvas, editing: bool) {
    clear_msg(canvas, INSTRUCTION_ROW);
    msg(canvas, INSTRUCTION_ROW, &instruction_text(editing));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::console::testing::ScriptedConsole;
    use crate::ui::theme::Theme;
    use ratatui::style::Color;

    fn canvas() -> Canvas {
        Canvas::new(40, 25, Theme::default())
    }

    #[test]
    fn msg_is_centred() {
        let mut c = canvas();
        msg(&mut c, 2, "hello");
        let row = c.row_text(2);
        assert_eq!(row.find("hello"), Some(17));
    }

    #[test]
    fn shorter_message_leaves_no_stale_text_after_clear() {
        let mut c = canvas();
        draw_info_row(&mut c, "a much longer description here");
        draw_info_row(&mut c, "short");
        assert_eq!(c.row_text(INFO_ROW).trim(), "short");
    }

    #[test]
    fn title_is_bold() {
        let mut c = canvas();
        draw_title_row(&mut c, "Title");
        let col = centered_col(40, "Title");
        assert!(
            c.style_at(TITLE_ROW, col)
                .add_modifier
                .contains(ratatui::style::Modifier::BOLD)
        );
    }

    #[test]
    fn instruction_row_tracks_mode() {
        let mut c = canvas();
        draw_instruction_row(&mut c, true);
        assert_eq!(
            c.row_text(INSTRUCTION_ROW).trim(),
            "Enter - accept changes     Ctrl-C - discard changes"
        );
        draw_instruction_row(&mut c, false);
        assert_eq!(
            c.row_text(INSTRUCTION_ROW).trim(),
            "Ctrl-S - save configuration"
        );
    }

    #[test]
    fn alert_shows_blocks_then_clears() {
        let mut c = canvas();
        let mut console = ScriptedConsole::new([]);
        let delay = Duration::from_millis(2000);
        alert(&mut c, &mut console, " Could not set ip: bad ", delay).unwrap();

        assert_eq!(console.pauses, vec![delay]);
        assert_eq!(console.alerts, vec!["Could not set ip: bad".to_string()]);
        // drawn in the alert colour while held
        assert_eq!(console.alert_colors, vec![Some(Color::Red)]);
        assert_eq!(c.row_text(ALERT_ROW).trim(), "");
        assert_eq!(c.pair(), ColorPair::Normal);
        assert_eq!(c.style_at(ALERT_ROW, 0).bg, Some(Color::Blue));
    }
}
