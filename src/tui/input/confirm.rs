use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, DeleteTarget, Effect, Focus, Mode};

use super::is_interrupt;

/// Handle keys while a delete waits for y/n.
pub(super) fn handle_confirm(app: &mut App, key: KeyEvent, effects: &mut Vec<Effect>) {
    let Mode::ConfirmDelete { target, .. } = app.mode else {
        return;
    };

    if is_interrupt(&key) {
        effects.push(Effect::Quit);
        return;
    }

    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Char('y')) | (_, KeyCode::Enter) => {
            app.mode = Mode::Normal;
            if delete(app, target) {
                effects.push(Effect::Persist);
            }
        }
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.mode = Mode::Normal;
            app.set_status("Delete cancelled");
        }
        _ => {}
    }
}

/// Remove the target. Returns false when it no longer exists.
fn delete(app: &mut App, target: DeleteTarget) -> bool {
    match target {
        DeleteTarget::Project { project } => {
            if project >= app.store.projects.len() {
                app.set_error("No project to delete");
                return false;
            }
            let removed = app.store.projects.remove(project);
            tracing::debug!(name = %removed.name, "deleted project");
            app.focus = Focus::Projects;
            app.clamp_cursors();
            app.set_status(format!("Deleted project \"{}\"", removed.name));
        }
        DeleteTarget::Todo { project, todo } => {
            let Some(p) = app.store.project_mut(project) else {
                app.set_error("No todo to delete");
                return false;
            };
            if todo >= p.todos.len() {
                app.set_error("No todo to delete");
                return false;
            }
            let removed = p.todos.remove(todo);
            tracing::debug!(project, title = %removed.title, "deleted todo");
            app.clamp_cursors();
            app.set_status(format!("Deleted todo \"{}\"", removed.title));
        }
    }
    true
}
