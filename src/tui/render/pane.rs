use crossterm::style::Color;

use crate::tui::theme::{Theme, fg, fg_bold, paint};
use crate::util::ansi;
use crate::util::unicode::display_width;

const TOP_LEFT: &str = "╭";
const TOP_RIGHT: &str = "╮";
const BOTTOM_LEFT: &str = "╰";
const BOTTOM_RIGHT: &str = "╯";
const HORIZONTAL: &str = "─";
const VERTICAL: &str = "│";

/// Top border with the title embedded after the first fill cell.
///
/// When the title leaves no room for fill, the border degenerates to
/// corner + title + corner; the title is cut or padded so the line stays
/// `inner_width + 2` cells wide.
pub(super) fn top_border(inner_width: usize, title: &str, color: Color, bold: bool) -> String {
    let border = fg(color);
    let title_style = if bold { fg_bold(color) } else { fg(color) };
    let title = format!(" {} ", title);
    let title_width = display_width(&title);

    let mut line = paint(border, TOP_LEFT);
    if title_width + 1 >= inner_width {
        let shown = ansi::pad(&ansi::truncate(&title, inner_width), inner_width);
        line.push_str(&paint(title_style, &shown));
    } else {
        line.push_str(&paint(border, HORIZONTAL));
        line.push_str(&paint(title_style, &title));
        let fill = HORIZONTAL.repeat(inner_width - 1 - title_width);
        line.push_str(&paint(border, &fill));
    }
    line.push_str(&paint(border, TOP_RIGHT));
    line
}

/// One content row: border, a space, the content padded to
/// `inner_width - 2`, a space, border.
pub(super) fn body_line(inner_width: usize, content: &str, color: Color) -> String {
    let border = paint(fg(color), VERTICAL);
    let content_width = inner_width.saturating_sub(2);
    let content = ansi::pad(&ansi::truncate(content, content_width), content_width);
    let gap = if inner_width >= 2 { " " } else { "" };
    format!("{border}{gap}{content}{gap}{border}")
}

/// Empty row spanning the whole inner width.
pub(super) fn blank_line(inner_width: usize, color: Color) -> String {
    let border = paint(fg(color), VERTICAL);
    format!("{border}{}{border}", " ".repeat(inner_width))
}

pub(super) fn bottom_border(inner_width: usize, color: Color) -> String {
    let border = fg(color);
    let mut line = paint(border, BOTTOM_LEFT);
    line.push_str(&paint(border, &HORIZONTAL.repeat(inner_width)));
    line.push_str(&paint(border, BOTTOM_RIGHT));
    line
}

/// Render a bordered pane `total_width` cells wide with `inner_height`
/// content rows. `content` should already hold `inner_height` lines; missing
/// lines render blank and extra lines are dropped.
pub fn render_pane(
    total_width: usize,
    inner_height: usize,
    title: &str,
    focused: bool,
    content: &[String],
    theme: &Theme,
) -> Vec<String> {
    let inner_width = total_width.saturating_sub(2);
    let color = theme.border_color(focused);

    let mut lines = Vec::with_capacity(inner_height + 2);
    lines.push(top_border(inner_width, title, color, focused));
    for row in 0..inner_height {
        let text = content.get(row).map_or("", String::as_str);
        lines.push(body_line(inner_width, text, color));
    }
    lines.push(bottom_border(inner_width, color));
    lines
}
