use crossterm::style::{Attribute, ContentStyle};

use crate::tui::app::App;
use crate::tui::theme::{Theme, fg, fg_bold, paint};
use crate::util::ansi;

const HELP: &[(&str, &str)] = &[
    ("j/k", "nav"),
    ("ctrl+h/l", "switch"),
    ("enter", "toggle"),
    ("a", "add"),
    ("e", "edit"),
    ("d", "del"),
    ("l", "link"),
    ("o", "open"),
    ("q", "quit"),
];

fn key_style(theme: &Theme) -> ContentStyle {
    let mut style = fg(theme.key_fg);
    style.background_color = Some(theme.key_bg);
    style.attributes.set(Attribute::Bold);
    style
}

/// Key hint bar, cut to `width`
pub fn help_line(theme: &Theme, width: usize) -> String {
    let keys = key_style(theme);
    let desc = fg(theme.desc);
    let line = HELP
        .iter()
        .map(|(key, what)| {
            format!(
                "{} {}",
                paint(keys, &format!(" {key} ")),
                paint(desc, what)
            )
        })
        .collect::<Vec<_>>()
        .join("  ");
    ansi::truncate(&line, width)
}

/// Status message, error-styled with an `ERROR: ` prefix after a failure
pub fn status_line(app: &App, width: usize) -> String {
    let line = if app.status_err {
        paint(fg_bold(app.theme.error), &format!("ERROR: {}", app.status))
    } else {
        paint(fg(app.theme.status), &app.status)
    };
    ansi::truncate(&line, width)
}
