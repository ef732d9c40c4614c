use crate::tui::theme::Theme;

use super::pane::{blank_line, body_line, bottom_border, top_border};

/// Render a modal box `width` cells wide around `body`.
///
/// Height follows the body; one blank row pads it above and below. A popup
/// is always drawn in the focused color with a bold title.
pub fn render_popup(width: usize, title: &str, body: &[String], theme: &Theme) -> Vec<String> {
    let inner_width = width.saturating_sub(2);
    let color = theme.focused_border;

    let mut lines = Vec::with_capacity(body.len() + 4);
    lines.push(top_border(inner_width, title, color, true));
    lines.push(blank_line(inner_width, color));
    for row in body {
        lines.push(body_line(inner_width, row, color));
    }
    lines.push(blank_line(inner_width, color));
    lines.push(bottom_border(inner_width, color));
    lines
}
