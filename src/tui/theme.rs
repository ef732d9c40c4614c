use crossterm::style::{Attribute, Color, ContentStyle, StyledContent};

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub selected: Color,
    pub normal: Color,
    pub completed: Color,
    pub key_fg: Color,
    pub key_bg: Color,
    pub desc: Color,
    pub status: Color,
    pub error: Color,
    pub focused_border: Color,
    pub dim_border: Color,
    pub placeholder: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            selected: Color::AnsiValue(212),
            normal: Color::AnsiValue(252),
            completed: Color::AnsiValue(141),
            key_fg: Color::AnsiValue(230),
            key_bg: Color::AnsiValue(61),
            desc: Color::AnsiValue(241),
            status: Color::AnsiValue(252),
            error: Color::AnsiValue(196),
            focused_border: Color::AnsiValue(212),
            dim_border: Color::AnsiValue(241),
            placeholder: Color::AnsiValue(241),
        }
    }
}

/// Parse "#RRGGBB" into an RGB color, or a bare number into an ANSI-256 color
fn parse_color(value: &str) -> Option<Color> {
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb { r, g, b });
    }
    value.parse::<u8>().ok().map(Color::AnsiValue)
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_color(value) else {
                tracing::warn!(slot = %key, %value, "ignoring unparseable theme color");
                continue;
            };
            match key.as_str() {
                "selected" => theme.selected = color,
                "normal" => theme.normal = color,
                "completed" => theme.completed = color,
                "key_fg" => theme.key_fg = color,
                "key_bg" => theme.key_bg = color,
                "desc" => theme.desc = color,
                "status" => theme.status = color,
                "error" => theme.error = color,
                "focused_border" => theme.focused_border = color,
                "dim_border" => theme.dim_border = color,
                "placeholder" => theme.placeholder = color,
                _ => tracing::warn!(slot = %key, "unknown theme slot"),
            }
        }

        theme
    }

    /// Border/title color for a pane
    pub fn border_color(&self, focused: bool) -> Color {
        if focused {
            self.focused_border
        } else {
            self.dim_border
        }
    }
}

/// Foreground-only style
pub fn fg(color: Color) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(color),
        ..ContentStyle::default()
    }
}

/// Foreground + bold
pub fn fg_bold(color: Color) -> ContentStyle {
    let mut style = fg(color);
    style.attributes.set(Attribute::Bold);
    style
}

/// Render `text` with `style` as an escape-sequence string
pub fn paint(style: ContentStyle, text: &str) -> String {
    StyledContent::new(style, text).to_string()
}
