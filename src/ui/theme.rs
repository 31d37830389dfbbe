use std::fs;
use std::str::FromStr;

use ratatui::style::{Color, Style};
use serde::{Deserialize, Serialize};

use crate::ui::canvas::ColorPair;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Foreground/background for each color pair. Values are `#rrggbb` or a
/// color name such as `blue` or `lightcyan`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub normal_fg: String,
    pub normal_bg: String,
    pub select_fg: String,
    pub select_bg: String,
    pub edit_fg: String,
    pub edit_bg: String,
    pub alert_fg: String,
    pub alert_bg: String,
}

const BUILTIN_THEMES: &[&str] = &["classic", "mono"];

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // Try user themes dir
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("optcon")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(err) => {
                        tracing::warn!("Bad theme file {}: {}", user_theme_path.display(), err)
                    }
                }
            }
        }

        Self::builtin(name)
    }

    fn builtin(name: &str) -> Option<Self> {
        let colors = match name {
            "classic" => ThemeColors::default(),
            "mono" => ThemeColors {
                normal_fg: "reset".to_string(),
                normal_bg: "reset".to_string(),
                select_fg: "black".to_string(),
                select_bg: "white".to_string(),
                edit_fg: "black".to_string(),
                edit_bg: "gray".to_string(),
                alert_fg: "white".to_string(),
                alert_bg: "black".to_string(),
            },
            _ => return None,
        };
        Some(Self {
            name: name.to_string(),
            colors,
        })
    }

    pub fn available_themes() -> Vec<String> {
        let mut themes: Vec<String> = BUILTIN_THEMES.iter().map(|t| t.to_string()).collect();
        if let Some(config_dir) = dirs::config_dir() {
            if let Ok(entries) = fs::read_dir(config_dir.join("optcon").join("themes")) {
                for entry in entries.flatten() {
                    let file_name = entry.file_name().to_string_lossy().to_string();
                    if let Some(name) = file_name.strip_suffix(".toml") {
                        if !themes.iter().any(|t| t == name) {
                            themes.push(name.to_string());
                        }
                    }
                }
            }
        }
        themes
    }

    pub fn style(&self, pair: ColorPair) -> Style {
        let c = &self.colors;
        let (fg, bg) = match pair {
            ColorPair::Normal => (&c.normal_fg, &c.normal_bg),
            ColorPair::Select => (&c.select_fg, &c.select_bg),
            ColorPair::Edit => (&c.edit_fg, &c.edit_bg),
            ColorPair::Alert => (&c.alert_fg, &c.alert_bg),
        };
        Style::default()
            .fg(ThemeColors::parse_color(fg))
            .bg(ThemeColors::parse_color(bg))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "classic".to_string(),
            colors: ThemeColors::default(),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            normal_fg: "white".to_string(),
            normal_bg: "blue".to_string(),
            select_fg: "white".to_string(),
            select_bg: "red".to_string(),
            edit_fg: "black".to_string(),
            edit_bg: "cyan".to_string(),
            alert_fg: "white".to_string(),
            alert_bg: "red".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(spec: &str) -> Color {
        let hex = spec.trim_start_matches('#');
        if spec.starts_with('#') && hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::from_str(spec).unwrap_or(Color::White)
    }
}
