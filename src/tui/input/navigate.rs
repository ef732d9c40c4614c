use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, DeleteTarget, EditTarget, Effect, Focus, Mode};

use super::is_interrupt;

pub(super) fn handle_normal(app: &mut App, key: KeyEvent, effects: &mut Vec<Effect>) {
    if is_interrupt(&key) {
        effects.push(Effect::Quit);
        return;
    }

    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('q')) => {
            effects.push(Effect::Quit);
            return;
        }
        // Switch panes
        // Legacy terminals report Ctrl+H as Backspace
        (KeyModifiers::CONTROL, KeyCode::Char('h'))
        | (KeyModifiers::NONE, KeyCode::Backspace)
        | (_, KeyCode::Left) => {
            app.focus = Focus::Projects;
            app.set_status("Focus: projects");
        }
        (KeyModifiers::CONTROL, KeyCode::Char('l')) | (_, KeyCode::Right) => {
            if app.store.projects.is_empty() {
                app.set_error("No projects available");
                return;
            }
            app.focus = Focus::Todos;
            app.set_status("Focus: todos");
        }
        (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => move_cursor(app, -1),
        (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => move_cursor(app, 1),
        (_, KeyCode::Enter) => select_current(app, effects),
        (KeyModifiers::NONE, KeyCode::Char('a')) => begin_add(app),
        (KeyModifiers::NONE, KeyCode::Char('e')) => begin_edit(app),
        (KeyModifiers::NONE, KeyCode::Char('d')) => begin_delete(app),
        (KeyModifiers::NONE, KeyCode::Char('l')) => begin_set_link(app),
        (KeyModifiers::NONE, KeyCode::Char('o')) => open_link(app, effects),
        _ => {}
    }

    app.clamp_cursors();
}

/// Move the active pane's cursor by `delta`, then clamp.
fn move_cursor(app: &mut App, delta: isize) {
    match app.focus {
        Focus::Projects => {
            if app.store.projects.is_empty() {
                return;
            }
            app.project_cursor = app.project_cursor.saturating_add_signed(delta);
        }
        Focus::Todos => {
            if app.current_project().is_none_or(|p| p.todos.is_empty()) {
                return;
            }
            app.todo_cursor = app.todo_cursor.saturating_add_signed(delta);
        }
    }
    app.clamp_cursors();
}

/// Enter: open the project (Projects pane) or toggle the todo (Todos pane).
fn select_current(app: &mut App, effects: &mut Vec<Effect>) {
    if app.focus == Focus::Projects {
        let Some(project) = app.current_project() else {
            app.set_error("No projects available");
            return;
        };
        let message = format!("Opened \"{}\"", project.name);
        app.focus = Focus::Todos;
        app.clamp_cursors();
        app.set_status(message);
        return;
    }

    let (p, t) = (app.project_cursor, app.todo_cursor);
    let Some(todo) = app.store.project_mut(p).and_then(|proj| proj.todo_mut(t)) else {
        app.set_error("No todo selected");
        return;
    };
    todo.completed = !todo.completed;
    let message = if todo.completed {
        "Todo completed"
    } else {
        "Todo reopened"
    };
    app.set_status(message);
    effects.push(Effect::Persist);
}

/// Open the input popup for `target`, pre-filled with `value`.
fn open_input(app: &mut App, target: EditTarget, value: &str, placeholder: &str) {
    app.mode = Mode::TextInput(target);
    app.input.set_value(value);
    app.input.set_placeholder(placeholder);
    let status = match target {
        EditTarget::AddProject => "Add project",
        EditTarget::EditProject { .. } => "Edit project",
        EditTarget::AddTodo { .. } => "Add todo",
        EditTarget::EditTodo { .. } => "Edit todo",
        EditTarget::SetLink { .. } => "Set link",
    };
    app.set_status(status);
}

fn begin_add(app: &mut App) {
    if app.focus == Focus::Projects {
        open_input(app, EditTarget::AddProject, "", "Project name");
        return;
    }
    if app.current_project().is_none() {
        app.set_error("Create a project first");
        return;
    }
    let target = EditTarget::AddTodo {
        project: app.project_cursor,
    };
    open_input(app, target, "", "Todo title");
}

fn begin_edit(app: &mut App) {
    if app.focus == Focus::Projects {
        let Some(name) = app.current_project().map(|p| p.name.clone()) else {
            app.set_error("No project to edit");
            return;
        };
        let target = EditTarget::EditProject {
            project: app.project_cursor,
        };
        open_input(app, target, &name, "Project name");
        return;
    }

    let Some(title) = app.current_todo().map(|t| t.title.clone()) else {
        app.set_error("No todo to edit");
        return;
    };
    let target = EditTarget::EditTodo {
        project: app.project_cursor,
        todo: app.todo_cursor,
    };
    open_input(app, target, &title, "Todo title");
}

fn begin_set_link(app: &mut App) {
    if app.focus != Focus::Todos {
        return;
    }
    let Some(link) = app.current_todo().map(|t| t.link.clone()) else {
        app.set_error("No todo to set link on");
        return;
    };
    let target = EditTarget::SetLink {
        project: app.project_cursor,
        todo: app.todo_cursor,
    };
    open_input(app, target, &link, "https://github.com/...");
}

fn open_link(app: &mut App, effects: &mut Vec<Effect>) {
    if app.focus != Focus::Todos {
        return;
    }
    let Some(todo) = app.current_todo() else {
        app.set_error("No todo selected");
        return;
    };
    if todo.link.is_empty() {
        app.set_error("No link set (use l to add one)");
        return;
    }
    let link = todo.link.clone();
    tracing::info!(%link, "opening link");
    effects.push(Effect::OpenLink(link));
    app.set_status("Opening link");
}

fn begin_delete(app: &mut App) {
    let (target, message) = if app.focus == Focus::Projects {
        let Some(project) = app.current_project() else {
            app.set_error("No project to delete");
            return;
        };
        (
            DeleteTarget::Project {
                project: app.project_cursor,
            },
            format!("Delete project \"{}\"? (y/n)", project.name),
        )
    } else {
        let Some(todo) = app.current_todo() else {
            app.set_error("No todo to delete");
            return;
        };
        (
            DeleteTarget::Todo {
                project: app.project_cursor,
                todo: app.todo_cursor,
            },
            format!("Delete todo \"{}\"? (y/n)", todo.title),
        )
    };
    app.set_status(message.clone());
    app.mode = Mode::ConfirmDelete { target, message };
}
