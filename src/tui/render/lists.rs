use crate::tui::app::App;
use crate::tui::theme::{fg, fg_bold, paint};
use crate::util::ansi;

const SELECTED_PREFIX: &str = "▶ ";
const PREFIX: &str = "  ";
const LINK_MARK: &str = " 🔗";

/// Index of the first visible row so `cursor` stays inside a `height` window.
fn scroll_start(cursor: usize, height: usize) -> usize {
    (cursor + 1).saturating_sub(height.max(1))
}

/// Cut rows to `width`, window them around `cursor`, and fill to `height`.
fn fit(rows: Vec<String>, cursor: usize, width: usize, height: usize) -> Vec<String> {
    let start = scroll_start(cursor, height);
    let mut out: Vec<String> = rows
        .iter()
        .skip(start)
        .take(height)
        .map(|row| ansi::truncate(row, width))
        .collect();
    out.resize(height, String::new());
    out
}

/// Content rows of the projects pane
pub fn project_lines(app: &App, width: usize, height: usize) -> Vec<String> {
    let theme = &app.theme;
    if app.store.projects.is_empty() {
        let row = paint(fg(theme.normal), "No projects yet. Press a to create one.");
        return fit(vec![row], 0, width, height);
    }

    let rows = app
        .store
        .projects
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let text = format!("{} ({})", project.name, project.todos.len());
            if i == app.project_cursor {
                paint(fg_bold(theme.selected), &format!("{SELECTED_PREFIX}{text}"))
            } else {
                paint(fg(theme.normal), &format!("{PREFIX}{text}"))
            }
        })
        .collect();
    fit(rows, app.project_cursor, width, height)
}

/// Content rows of the todos pane
pub fn todo_lines(app: &App, width: usize, height: usize) -> Vec<String> {
    let theme = &app.theme;
    let Some(project) = app.current_project() else {
        let row = paint(fg(theme.normal), "Select or create a project.");
        return fit(vec![row], 0, width, height);
    };
    if project.todos.is_empty() {
        let row = paint(fg(theme.normal), "No todos yet. Press a to add one.");
        return fit(vec![row], 0, width, height);
    }

    let rows = project
        .todos
        .iter()
        .enumerate()
        .map(|(i, todo)| {
            let selected = i == app.todo_cursor;
            let prefix = if selected { SELECTED_PREFIX } else { PREFIX };
            let check = if todo.completed { "[x]" } else { "[ ]" };
            let mut text = format!("{prefix}{check} {}", todo.title);
            if !todo.link.is_empty() {
                text.push_str(LINK_MARK);
            }

            // Completed wins over selected
            let style = if todo.completed {
                fg(theme.completed)
            } else if selected {
                fg_bold(theme.selected)
            } else {
                fg(theme.normal)
            };
            paint(style, &text)
        })
        .collect();
    fit(rows, app.todo_cursor, width, height)
}
