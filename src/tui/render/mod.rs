pub mod lists;
pub mod overlay;
pub mod pane;
pub mod popup;
pub mod status_row;

use crate::util::unicode::wrap_words;

use super::app::{App, Focus, Mode};
use super::editor::EDITOR_HEIGHT;

/// Popups are at least this wide (before the frame-width cap)
const POPUP_MIN_WIDTH: usize = 40;

/// Build the full frame as styled lines, one per terminal row.
pub fn render(app: &App) -> Vec<String> {
    if app.width == 0 {
        return vec!["Loading...".to_string()];
    }
    let width = app.width as usize;
    let height = app.height as usize;

    // help + status rows, then the pane borders
    let panel_height = height.saturating_sub(2).saturating_sub(2).max(1);
    let left_width = width / 3;
    let right_width = width - left_width;
    let normal = app.mode == Mode::Normal;

    let left = pane::render_pane(
        left_width,
        panel_height,
        "Projects",
        normal && app.focus == Focus::Projects,
        &lists::project_lines(app, left_width.saturating_sub(4), panel_height),
        &app.theme,
    );

    let todo_title = match app.current_project() {
        Some(project) => format!("Todos: {}", project.name),
        None => "Todos".to_string(),
    };
    let right = pane::render_pane(
        right_width,
        panel_height,
        &todo_title,
        normal && app.focus == Focus::Todos,
        &lists::todo_lines(app, right_width.saturating_sub(4), panel_height),
        &app.theme,
    );

    let mut frame: Vec<String> = left
        .into_iter()
        .zip(right)
        .map(|(mut l, r)| {
            l.push_str(&r);
            l
        })
        .collect();
    frame.push(status_row::help_line(&app.theme, width));
    frame.push(status_row::status_line(app, width));

    let popup_width = (width / 3)
        .max(POPUP_MIN_WIDTH)
        .min(width.saturating_sub(4));
    let (title, body) = match &app.mode {
        Mode::Normal => return frame,
        Mode::TextInput(target) => (
            target.title(),
            app.input
                .view(popup_width.saturating_sub(4), EDITOR_HEIGHT, &app.theme),
        ),
        Mode::ConfirmDelete { message, .. } => {
            ("Confirm", wrap_words(message, popup_width.saturating_sub(4)))
        }
    };

    let popup = popup::render_popup(popup_width, title, &body, &app.theme);
    overlay::overlay_center(frame, &popup, width, height)
}
