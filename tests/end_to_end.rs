//! Drives the state machine through whole user flows and executes the
//! persist effects against a real data file.

use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use focusboard::io::store_io::{load_store, save_store};
use focusboard::model::{Config, Project, Store};
use focusboard::tui::app::{App, AppEvent, Effect, Focus, Mode};
use focusboard::tui::input::update;
use focusboard::tui::render::{overlay, render};
use focusboard::util::ansi::{strip, visible_width};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn text(s: &str) -> Vec<AppEvent> {
    s.chars().map(|c| key(KeyCode::Char(c))).collect()
}

/// Minimal driver: apply events, saving on every Persist effect.
fn drive(mut app: App, events: &[AppEvent], data: &Path) -> App {
    for event in events {
        let (next, effects) = update(app, *event);
        app = next;
        for effect in effects {
            if effect == Effect::Persist {
                let result = save_store(data, &app.store);
                app.record_save(result);
            }
        }
    }
    app
}

fn start(data: &Path) -> App {
    App::from_load(load_store(data), &Config::default())
}

#[test]
fn first_project() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("todos.json");

    let mut events = vec![key(KeyCode::Char('a'))];
    events.extend(text("Work"));
    events.push(key(KeyCode::Enter));
    let app = drive(start(&data), &events, &data);

    assert_eq!(app.store.projects.len(), 1);
    assert_eq!(app.store.projects[0].name, "Work");
    assert!(app.store.projects[0].todos.is_empty());
    assert_eq!(app.project_cursor, 0);
    assert_eq!(load_store(&data).unwrap(), app.store);
}

#[test]
fn todo_lifecycle() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("todos.json");
    save_store(
        &data,
        &Store {
            projects: vec![Project::new("Work")],
        },
    )
    .unwrap();

    // add "Write spec"
    let mut events = vec![key(KeyCode::Enter), key(KeyCode::Char('a'))];
    events.extend(text("Write spec"));
    events.push(key(KeyCode::Enter));
    let app = drive(start(&data), &events, &data);
    let todo = &app.store.projects[0].todos[0];
    assert_eq!(app.store.projects[0].todos.len(), 1);
    assert_eq!(todo.title, "Write spec");
    assert!(!todo.completed);
    assert_eq!(todo.link, "");

    // toggle twice
    let app = drive(app, &[key(KeyCode::Enter)], &data);
    assert!(app.store.projects[0].todos[0].completed);
    assert!(load_store(&data).unwrap().projects[0].todos[0].completed);
    let app = drive(app, &[key(KeyCode::Enter)], &data);
    assert!(!app.store.projects[0].todos[0].completed);

    // set then clear the link
    let mut events = vec![key(KeyCode::Char('l'))];
    events.extend(text("https://example.com"));
    events.push(key(KeyCode::Enter));
    let app = drive(app, &events, &data);
    assert_eq!(app.store.projects[0].todos[0].link, "https://example.com");

    let clear = [
        key(KeyCode::Char('l')),
        AppEvent::Key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)),
        key(KeyCode::Enter),
    ];
    let app = drive(app, &clear, &data);
    assert_eq!(app.store.projects[0].todos[0].link, "");
    assert!(!app.status_err);
    assert_eq!(app.status, "Link cleared");

    let saved = std::fs::read_to_string(&data).unwrap();
    assert!(!saved.contains("\"link\""));
}

#[test]
fn delete_first_of_two_projects() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("todos.json");
    save_store(
        &data,
        &Store {
            projects: vec![Project::new("Work"), Project::new("Home")],
        },
    )
    .unwrap();

    let mut app = start(&data);
    app.focus = Focus::Todos;
    let app = drive(
        app,
        &[key(KeyCode::Left), key(KeyCode::Char('d')), key(KeyCode::Char('y'))],
        &data,
    );
    assert_eq!(app.store.projects.len(), 1);
    assert_eq!(app.store.projects[0].name, "Home");
    assert_eq!(app.focus, Focus::Projects);
    assert_eq!(app.project_cursor, 0);
    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(load_store(&data).unwrap().projects.len(), 1);
}

#[test]
fn cursor_stays_in_range_through_adds_and_deletes() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("todos.json");
    let mut app = start(&data);

    let check = |app: &App| {
        assert!(app.project_cursor < app.store.projects.len().max(1));
        if let Some(project) = app.current_project()
            && !project.todos.is_empty()
        {
            assert!(app.todo_cursor < project.todos.len());
        }
    };

    for name in ["a", "b", "c"] {
        let mut events = vec![key(KeyCode::Char('a'))];
        events.extend(text(name));
        events.push(key(KeyCode::Enter));
        app = drive(app, &events, &data);
        check(&app);
    }
    for _ in 0..4 {
        app = drive(
            app,
            &[key(KeyCode::Char('d')), key(KeyCode::Enter)],
            &data,
        );
        check(&app);
    }
    assert!(app.store.projects.is_empty());
}

#[test]
fn save_failure_keeps_edit() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("missing").join("todos.json");

    let mut events = vec![key(KeyCode::Char('a'))];
    events.extend(text("Work"));
    events.push(key(KeyCode::Enter));
    let app = drive(App::new(Store::default()), &events, &data);

    assert_eq!(app.store.projects.len(), 1);
    assert!(app.status_err);
    assert!(app.status.starts_with("save failed:"));
}

#[test]
fn corrupt_data_file_starts_empty_with_error() {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("todos.json");
    std::fs::write(&data, "{ not json").unwrap();

    let app = start(&data);
    assert!(app.store.projects.is_empty());
    assert!(app.status_err);
    assert!(app.status.starts_with("failed loading:"));
}

#[test]
fn popup_centered_over_frame() {
    let bg: Vec<String> = (0..20).map(|i| format!("{:<100}", format!("row {i}"))).collect();
    let popup: Vec<String> = (0..8).map(|_| "*".repeat(50)).collect();
    let out = overlay::overlay_center(bg.clone(), &popup, 100, 20);

    let (x_off, y_off) = overlay::centered_offsets(100, 20, 50, 8);
    assert_eq!((x_off, y_off), (25, 6));
    for (row, line) in out.iter().enumerate() {
        assert_eq!(visible_width(line), 100);
        if (y_off..y_off + 8).contains(&row) {
            assert_eq!(&line[..25], &bg[row][..25]);
            assert_eq!(&line[25..75], "*".repeat(50));
            assert_eq!(&line[75..], &bg[row][75..]);
        } else {
            assert_eq!(line, &bg[row]);
        }
    }
}

#[test]
fn rendered_frame_shows_board() {
    let mut app = App::new(Store {
        projects: vec![Project::new("Work")],
    });
    app.width = 80;
    app.height = 10;
    let (app, _) = update(app, key(KeyCode::Char('d')));
    let frame = render(&app);
    assert_eq!(frame.len(), 10);
    let plain: Vec<String> = frame.iter().map(|l| strip(l)).collect();
    assert!(plain[0].contains("Projects"));
    assert!(plain.iter().any(|l| l.contains("Confirm")));
    assert!(plain.iter().any(|l| l.contains("Delete project \"Work\"? (y/n)")));
    assert_eq!(plain[9], "Delete project \"Work\"? (y/n)");
}
