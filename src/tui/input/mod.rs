mod confirm;
mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, AppEvent, Effect, Mode};

/// Advance the state by one event. Returns the next state plus the side
/// effects the caller must execute, in order.
pub fn update(mut app: App, event: AppEvent) -> (App, Vec<Effect>) {
    let mut effects = Vec::new();
    match event {
        AppEvent::Resize(width, height) => {
            app.width = width;
            app.height = height;
        }
        AppEvent::Key(key) => handle_key(&mut app, key, &mut effects),
    }
    (app, effects)
}

/// Handle a key event in the current mode
fn handle_key(app: &mut App, key: KeyEvent, effects: &mut Vec<Effect>) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Normal => navigate::handle_normal(app, key, effects),
        Mode::TextInput(_) => edit::handle_text_input(app, key, effects),
        Mode::ConfirmDelete { .. } => confirm::handle_confirm(app, key, effects),
    }
}

/// Ctrl+C quits from every mode.
fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Map a base key to its US-layout shifted symbol.
/// Returns None if the key is not a shiftable symbol (or is already shifted).
fn shift_symbol(c: char) -> Option<char> {
    match c {
        '`' => Some('~'),
        '1' => Some('!'),
        '2' => Some('@'),
        '3' => Some('#'),
        '4' => Some('$'),
        '5' => Some('%'),
        '6' => Some('^'),
        '7' => Some('&'),
        '8' => Some('*'),
        '9' => Some('('),
        '0' => Some(')'),
        '-' => Some('_'),
        '=' => Some('+'),
        '[' => Some('{'),
        ']' => Some('}'),
        '\\' => Some('|'),
        ';' => Some(':'),
        '\'' => Some('"'),
        ',' => Some('<'),
        '.' => Some('>'),
        '/' => Some('?'),
        _ => None,
    }
}

/// Normalize key events from terminals using the kitty keyboard protocol.
///
/// Kitty protocol sends `Char(lowercase) + SHIFT` instead of `Char(UPPERCASE) + SHIFT`,
/// and `Char(base_symbol) + SHIFT` instead of `Char(shifted_symbol)`. For
/// traditional terminals this is a no-op.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        if c.is_ascii_lowercase() {
            key.code = KeyCode::Char(c.to_ascii_uppercase());
        } else if let Some(shifted) = shift_symbol(c) {
            key.code = KeyCode::Char(shifted);
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
    }
    key
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{Project, Store, Todo};
    use crate::tui::app::{DeleteTarget, EditTarget, Focus};
    use pretty_assertions::assert_eq;

    pub(crate) fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub(crate) fn ch(c: char) -> AppEvent {
        key(KeyCode::Char(c))
    }

    pub(crate) fn ctrl(c: char) -> AppEvent {
        AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    /// Feed events in order, collecting every effect.
    pub(crate) fn feed(app: App, events: &[AppEvent]) -> (App, Vec<Effect>) {
        let mut all = Vec::new();
        let app = events.iter().fold(app, |app, ev| {
            let (next, effects) = update(app, *ev);
            all.extend(effects);
            next
        });
        (app, all)
    }

    pub(crate) fn type_text(app: App, text: &str) -> App {
        let events: Vec<AppEvent> = text.chars().map(ch).collect();
        feed(app, &events).0
    }

    pub(crate) fn board() -> App {
        let mut work = Project::new("Work");
        work.todos.push(Todo::new("Write spec"));
        work.todos.push(Todo::new("Review"));
        App::new(Store {
            projects: vec![work, Project::new("Home")],
        })
    }

    #[test]
    fn resize_updates_viewport() {
        let (app, effects) = update(App::new(Store::default()), AppEvent::Resize(100, 30));
        assert_eq!((app.width, app.height), (100, 30));
        assert!(effects.is_empty());
    }

    #[test]
    fn interrupt_quits_from_every_mode() {
        let (_, effects) = update(board(), ctrl('c'));
        assert_eq!(effects, vec![Effect::Quit]);

        let (app, _) = update(board(), ch('a'));
        assert!(matches!(app.mode, Mode::TextInput(EditTarget::AddProject)));
        let (_, effects) = update(app, ctrl('c'));
        assert_eq!(effects, vec![Effect::Quit]);

        let (app, _) = update(board(), ch('d'));
        assert!(matches!(
            app.mode,
            Mode::ConfirmDelete {
                target: DeleteTarget::Project { project: 0 },
                ..
            }
        ));
        let (_, effects) = update(app, ctrl('c'));
        assert_eq!(effects, vec![Effect::Quit]);
    }

    #[test]
    fn q_types_into_input_instead_of_quitting() {
        let (app, _) = update(board(), ch('a'));
        let (app, effects) = update(app, ch('q'));
        assert!(effects.is_empty());
        assert_eq!(app.input.value(), "q");
    }

    #[test]
    fn bare_modifier_is_ignored() {
        use crossterm::event::ModifierKeyCode;
        let app = board();
        let (next, effects) = update(app.clone(), key(KeyCode::Modifier(ModifierKeyCode::LeftShift)));
        assert!(effects.is_empty());
        assert_eq!(next.status, app.status);
        assert_eq!(next.focus, Focus::Projects);
    }

    #[test]
    fn normalize_kitty_shifted_keys() {
        let k = normalize_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::SHIFT));
        assert_eq!(k.code, KeyCode::Char('A'));
        let k = normalize_key(KeyEvent::new(KeyCode::Char('/'), KeyModifiers::SHIFT));
        assert_eq!(k.code, KeyCode::Char('?'));
        assert_eq!(k.modifiers, KeyModifiers::NONE);
        let k = normalize_key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(k.code, KeyCode::Char('A'));
    }

    #[test]
    fn shifted_letters_reach_the_editor_uppercase() {
        let (app, _) = update(board(), ch('a'));
        let (app, _) = update(
            app,
            AppEvent::Key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::SHIFT)),
        );
        assert_eq!(app.input.value(), "W");
    }
}
