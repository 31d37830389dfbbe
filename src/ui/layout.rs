use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// Screen rows
pub const TITLE_ROW: u16 = 1;
pub const SETTINGS_LIST_ROW: u16 = 3;
pub const SETTINGS_LIST_COL: u16 = 1;
pub const INFO_ROW: u16 = 20;
pub const ALERT_ROW: u16 = 20;
pub const INSTRUCTION_ROW: u16 = 22;
pub const INSTRUCTION_PAD: &str = "     ";

// Setting row: gutter, name, gutter, value, gutter
pub const NAME_WIDTH: usize = 15;
pub const VALUE_WIDTH: usize = 60;
pub const VALUE_OFFSET: usize = 1 + NAME_WIDTH + 1;
pub const ROW_WIDTH: usize = VALUE_OFFSET + VALUE_WIDTH + 1;

pub const EMPTY_VALUE: &str = "<not specified>";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowLayout {
    /// Exactly [`ROW_WIDTH`] columns wide.
    pub text: String,
    /// Column of the value region, relative to the row start.
    pub value_offset: usize,
    /// Column just past the rendered value, relative to the row start.
    pub cursor_offset: usize,
}

/// Lay out one setting row: dot-padded name, space-padded value (or the
/// empty placeholder), both truncated to their region. Widths are terminal
/// columns, so wide characters take two.
pub fn layout_row(name: &str, value: &str) -> RowLayout {
    let name = truncate_width(name, NAME_WIDTH);
    let value = if value.is_empty() { EMPTY_VALUE } else { value };
    let value = truncate_width(value, VALUE_WIDTH);
    let value_cols = value.width();

    let mut text = String::with_capacity(ROW_WIDTH);
    text.push(' ');
    text.push_str(name);
    text.extend(std::iter::repeat_n('.', NAME_WIDTH - name.width()));
    text.push(' ');
    text.push_str(value);
    text.extend(std::iter::repeat_n(' ', VALUE_WIDTH - value_cols));
    text.push(' ');

    RowLayout {
        text,
        value_offset: VALUE_OFFSET,
        cursor_offset: VALUE_OFFSET + value_cols,
    }
}

/// Longest prefix of `text` that fits in `max` terminal columns.
pub fn truncate_width(text: &str, max: usize) -> &str {
    let mut used = 0;
    for (byte, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            return &text[..byte];
        }
        used += w;
    }
    text
}

/// Column at which `text` starts when centred on a row `width` wide.
pub fn centered_col(width: u16, text: &str) -> u16 {
    let len = text.chars().count().min(width as usize) as u16;
    (width - len) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_dot_padded_value_space_padded() {
        let row = layout_row("ip", "10.0.0.1");
        assert_eq!(row.text.chars().count(), ROW_WIDTH);
        assert!(row.text.starts_with(" ip............. 10.0.0.1 "));
        assert!(row.text.ends_with(' '));
        assert_eq!(row.cursor_offset, VALUE_OFFSET + 8);
    }

    #[test]
    fn long_name_truncated_without_dots() {
        let row = layout_row("really-long-setting-name-xyz", "");
        assert_eq!(&row.text[1..1 + NAME_WIDTH], "really-long-set");
        assert_eq!(&row.text[VALUE_OFFSET..VALUE_OFFSET + EMPTY_VALUE.len()], EMPTY_VALUE);
        assert_eq!(row.text.chars().count(), ROW_WIDTH);
    }

    #[test]
    fn exact_width_name_has_no_dots() {
        let name = "a".repeat(NAME_WIDTH);
        let row = layout_row(&name, "v");
        assert_eq!(&row.text[1..1 + NAME_WIDTH], name);
        assert_eq!(&row.text[1 + NAME_WIDTH..VALUE_OFFSET], " ");
    }

    #[test]
    fn long_value_truncated_to_field() {
        let value: String = ('a'..='z').cycle().take(100).collect();
        let row = layout_row("filename", &value);
        let shown = &row.text[VALUE_OFFSET..VALUE_OFFSET + VALUE_WIDTH];
        assert_eq!(shown, &value[..VALUE_WIDTH]);
        assert_eq!(row.cursor_offset, VALUE_OFFSET + VALUE_WIDTH);
        assert_eq!(row.text.chars().count(), ROW_WIDTH);
    }

    #[test]
    fn wide_value_fits_the_value_field() {
        let value = "日".repeat(VALUE_WIDTH);
        let row = layout_row("hostname", &value);
        assert_eq!(row.text.width(), ROW_WIDTH);
        assert_eq!(row.cursor_offset, VALUE_OFFSET + VALUE_WIDTH);
        assert!(row.text.ends_with(' '));

        // an odd column left over is padded, not split
        let row = layout_row("hostname", &format!("a{value}"));
        assert_eq!(row.text.width(), ROW_WIDTH);
        assert_eq!(row.cursor_offset, VALUE_OFFSET + VALUE_WIDTH - 1);
    }

    #[test]
    fn wide_name_padded_with_dots_by_columns() {
        let row = layout_row("名前", "x");
        assert!(row.text.starts_with(" 名前..........."));
        assert_eq!(row.text.width(), ROW_WIDTH);
    }

    #[test]
    fn truncate_width_counts_columns() {
        assert_eq!(truncate_width("日本語", 4), "日本");
        assert_eq!(truncate_width("日本語", 5), "日本");
        assert_eq!(truncate_width("héllo", 2), "hé");
        assert_eq!(truncate_width("abc", 10), "abc");
    }

    #[test]
    fn empty_value_cursor_follows_placeholder() {
        let row = layout_row("dns", "");
        assert_eq!(row.cursor_offset, VALUE_OFFSET + EMPTY_VALUE.len());
    }

    #[test]
    fn layout_is_deterministic() {
        assert_eq!(layout_row("gateway", "1.2.3.4"), layout_row("gateway", "1.2.3.4"));
    }

    #[test]
    fn centering() {
        assert_eq!(centered_col(80, "abcd"), 38);
        assert_eq!(centered_col(80, "abc"), 38);
        assert_eq!(centered_col(4, "too long for row"), 0);
    }
}
