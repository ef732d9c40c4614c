use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::{Project, Todo};
use crate::tui::app::{App, EditTarget, Effect, Mode};

use super::is_interrupt;

pub(super) fn handle_text_input(app: &mut App, key: KeyEvent, effects: &mut Vec<Effect>) {
    let Mode::TextInput(target) = app.mode else {
        return;
    };

    if is_interrupt(&key) {
        effects.push(Effect::Quit);
        return;
    }

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.mode = Mode::Normal;
            app.set_status("Input cancelled");
        }
        // Soft newline
        (KeyModifiers::CONTROL, KeyCode::Char('j')) | (KeyModifiers::SHIFT, KeyCode::Enter) => {
            app.input.insert_newline();
        }
        (_, KeyCode::Enter) => commit(app, target, effects),
        _ => app.input.handle_key(key),
    }
}

/// Collapse the buffer into a single trimmed line. Each line break, CRLF
/// included, becomes one space.
fn committed_value(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .replace('\r', "\n")
        .trim()
        .replace('\n', " ")
}

/// Apply the buffer to `target` and return to Normal mode.
fn commit(app: &mut App, target: EditTarget, effects: &mut Vec<Effect>) {
    let value = committed_value(app.input.value());
    app.mode = Mode::Normal;

    // A link may be cleared, every other target needs text.
    if value.is_empty() && !matches!(target, EditTarget::SetLink { .. }) {
        app.set_error("Empty input ignored");
        return;
    }

    match target {
        EditTarget::AddProject => {
            tracing::debug!(name = %value, "adding project");
            app.store.projects.push(Project::new(value));
            app.project_cursor = app.store.projects.len() - 1;
            app.todo_cursor = 0;
            app.set_status("Project created");
        }
        EditTarget::EditProject { project } => {
            let Some(p) = app.store.project_mut(project) else {
                app.set_error("No project to edit");
                return;
            };
            p.name = value;
            app.set_status("Project updated");
        }
        EditTarget::AddTodo { project } => {
            let Some(p) = app.store.project_mut(project) else {
                app.set_error("Create a project first");
                return;
            };
            tracing::debug!(project, title = %value, "adding todo");
            p.todos.push(Todo::new(value));
            app.todo_cursor = p.todos.len() - 1;
            app.set_status("Todo created");
        }
        EditTarget::EditTodo { project, todo } => {
            let Some(item) = app.store.project_mut(project).and_then(|p| p.todo_mut(todo)) else {
                app.set_error("No todo to edit");
                return;
            };
            item.title = value;
            app.set_status("Todo updated");
        }
        EditTarget::SetLink { project, todo } => {
            let Some(item) = app.store.project_mut(project).and_then(|p| p.todo_mut(todo)) else {
                app.set_error("No todo to set link on");
                return;
            };
            item.link = value;
            tracing::debug!(project, todo, "link updated");
            if item.link.is_empty() {
                app.set_status("Link cleared");
            } else {
                app.set_status("Link saved");
            }
        }
    }

    app.clamp_cursors();
    effects.push(Effect::Persist);
}

#[cfg(test)]
mod tests {
    use super::super::tests::{board, ch, ctrl, feed, key, type_text};
    use super::super::update;
    use super::committed_value;
    use crate::model::Store;
    use crate::tui::app::{App, AppEvent, Effect, Focus, Mode};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    #[test]
    fn committed_value_trims_and_flattens() {
        assert_eq!(committed_value("  a\nb \r\nc  "), "a b  c");
        assert_eq!(committed_value(" \n "), "");
    }

    #[test]
    fn crlf_collapses_to_one_space() {
        assert_eq!(committed_value("a\r\nb"), "a b");
        assert_eq!(committed_value("a\rb\r\n"), "a b");
    }

    #[test]
    fn add_first_project() {
        let (app, _) = update(App::new(Store::default()), ch('a'));
        let app = type_text(app, "Home");
        let (app, effects) = update(app, key(KeyCode::Enter));
        assert_eq!(app.store.projects.len(), 1);
        assert_eq!(app.store.projects[0].name, "Home");
        assert!(app.store.projects[0].todos.is_empty());
        assert_eq!(app.project_cursor, 0);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.status, "Project created");
        assert!(!app.status_err);
        assert_eq!(effects, vec![Effect::Persist]);
    }

    #[test]
    fn add_project_moves_cursor_to_it() {
        let (app, _) = update(board(), ch('a'));
        let app = type_text(app, "Side");
        let (app, _) = update(app, key(KeyCode::Enter));
        assert_eq!(app.store.projects.len(), 3);
        assert_eq!(app.project_cursor, 2);
        assert_eq!(app.todo_cursor, 0);
    }

    #[test]
    fn add_todo_and_toggle() {
        let mut start = App::new(Store::default());
        start.store.projects.push(crate::model::Project::new("Home"));
        let (app, effects) = feed(
            start,
            &[key(KeyCode::Enter), ch('a'), ch('M'), ch('i'), ch('l'), ch('k')],
        );
        assert!(effects.is_empty());
        assert_eq!(app.focus, Focus::Todos);
        let (app, effects) = update(app, key(KeyCode::Enter));
        assert_eq!(effects, vec![Effect::Persist]);
        assert_eq!(app.status, "Todo created");
        assert_eq!(app.store.projects[0].todos[0].title, "Milk");
        assert!(!app.store.projects[0].todos[0].completed);

        let (app, effects) = update(app, key(KeyCode::Enter));
        assert!(app.store.projects[0].todos[0].completed);
        assert_eq!(effects, vec![Effect::Persist]);
    }

    #[test]
    fn add_todo_selects_it() {
        let (app, _) = feed(board(), &[key(KeyCode::Right), ch('a')]);
        let app = type_text(app, "Ship");
        let (app, _) = update(app, key(KeyCode::Enter));
        assert_eq!(app.store.projects[0].todos.len(), 3);
        assert_eq!(app.todo_cursor, 2);
    }

    #[test]
    fn edit_project_renames() {
        let (app, _) = update(board(), ch('e'));
        let (app, _) = feed(app, &[ctrl('u')]);
        let app = type_text(app, "Office");
        let (app, effects) = update(app, key(KeyCode::Enter));
        assert_eq!(app.store.projects[0].name, "Office");
        assert_eq!(app.status, "Project updated");
        assert_eq!(effects, vec![Effect::Persist]);
    }

    #[test]
    fn edit_todo_retitles() {
        let (app, _) = feed(board(), &[key(KeyCode::Right), ch('e')]);
        let app = type_text(app, "!");
        let (app, _) = update(app, key(KeyCode::Enter));
        assert_eq!(app.store.projects[0].todos[0].title, "Write spec!");
        assert_eq!(app.status, "Todo updated");
    }

    #[test]
    fn empty_input_is_rejected() {
        let before = board();
        let (app, _) = update(before.clone(), ch('a'));
        let app = type_text(app, "   ");
        let (app, effects) = update(app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.status, "Empty input ignored");
        assert!(app.status_err);
        assert!(effects.is_empty());
        assert_eq!(app.store, before.store);
    }

    #[test]
    fn empty_input_is_rejected_for_every_text_target() {
        let open_add_project: &[AppEvent] = &[ch('a')];
        let open_edit_project: &[AppEvent] = &[ch('e')];
        let open_add_todo: &[AppEvent] = &[key(KeyCode::Right), ch('a')];
        let open_edit_todo: &[AppEvent] = &[key(KeyCode::Right), ch('e')];

        for open in [open_add_project, open_edit_project, open_add_todo, open_edit_todo] {
            let before = board();
            let (app, _) = feed(before.clone(), open);
            assert!(matches!(app.mode, Mode::TextInput(_)));
            let (app, _) = update(app, ctrl('u'));
            let app = type_text(app, "   ");
            let (app, effects) = update(app, key(KeyCode::Enter));

            assert_eq!(app.store, before.store, "{open:?}");
            assert_eq!(app.mode, Mode::Normal);
            assert_eq!(app.status, "Empty input ignored");
            assert!(app.status_err, "{open:?}");
            assert!(effects.is_empty(), "{open:?}");
        }
    }

    #[test]
    fn escape_cancels() {
        let (app, _) = update(board(), ch('a'));
        let app = type_text(app, "Nope");
        let (app, effects) = update(app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.status, "Input cancelled");
        assert_eq!(app.store.projects.len(), 2);
        assert!(effects.is_empty());
    }

    #[test]
    fn soft_newline_becomes_space_on_commit() {
        let (app, _) = update(board(), ch('a'));
        let app = type_text(app, "a");
        let (app, _) = update(app, ctrl('j'));
        let (app, _) = update(
            app,
            AppEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT)),
        );
        assert_eq!(app.input.value(), "a\n\n");
        let app = type_text(app, "b");
        let (app, _) = update(app, key(KeyCode::Enter));
        assert_eq!(app.store.projects[2].name, "a  b");
    }

    #[test]
    fn set_link_saves_and_clears() {
        let (app, _) = feed(board(), &[key(KeyCode::Right), ch('l')]);
        let app = type_text(app, " https://x.io ");
        let (app, effects) = update(app, key(KeyCode::Enter));
        assert_eq!(app.store.projects[0].todos[0].link, "https://x.io");
        assert_eq!(app.status, "Link saved");
        assert_eq!(effects, vec![Effect::Persist]);

        let (app, _) = feed(app, &[ch('l'), ctrl('u')]);
        let (app, effects) = update(app, key(KeyCode::Enter));
        assert_eq!(app.store.projects[0].todos[0].link, "");
        assert_eq!(app.status, "Link cleared");
        assert!(!app.status_err);
        assert_eq!(effects, vec![Effect::Persist]);
    }

    #[test]
    fn set_link_twice_is_idempotent() {
        let set = |app: App| {
            let (app, _) = feed(app, &[ch('l'), ctrl('u')]);
            let app = type_text(app, "https://x.io");
            update(app, key(KeyCode::Enter)).0
        };
        let (app, _) = update(board(), key(KeyCode::Right));
        let once = set(app);
        let twice = set(once.clone());
        assert_eq!(once.store, twice.store);
        assert_eq!(twice.store.projects[0].todos[0].link, "https://x.io");
        assert!(!once.status_err);
        assert!(!twice.status_err);
        assert_eq!(twice.status, "Link saved");
    }
}
