use std::io::{self, Write};
use std::path::Path;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::queue;

use crate::io::store_io::{StoreError, load_store, save_store};
use crate::model::{Config, Project, Store, Todo};
use crate::util::opener;

use super::editor::TextBuffer;
use super::input;
use super::render;
use super::theme::Theme;

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Projects,
    Todos,
}

/// What a text-input commit applies to, with the indices it was opened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    AddProject,
    EditProject { project: usize },
    AddTodo { project: usize },
    EditTodo { project: usize, todo: usize },
    SetLink { project: usize, todo: usize },
}

impl EditTarget {
    /// Popup title for this target
    pub fn title(&self) -> &'static str {
        match self {
            EditTarget::AddProject => "New project",
            EditTarget::EditProject { .. } => "Edit project",
            EditTarget::AddTodo { .. } => "New todo",
            EditTarget::EditTodo { .. } => "Edit todo",
            EditTarget::SetLink { .. } => "Set link",
        }
    }
}

/// What a confirmed delete removes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Project { project: usize },
    Todo { project: usize, todo: usize },
}

/// Current interaction mode; selects the key handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    TextInput(EditTarget),
    ConfirmDelete {
        target: DeleteTarget,
        /// Prompt shown in the confirmation popup
        message: String,
    },
}

/// Side effect requested by a state transition, executed by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the store to the data file
    Persist,
    /// Launch the platform handler for a URL without waiting on it
    OpenLink(String),
    Quit,
}

/// Input to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Main application state
#[derive(Debug, Clone)]
pub struct App {
    pub store: Store,
    pub focus: Focus,
    pub mode: Mode,
    pub project_cursor: usize,
    pub todo_cursor: usize,
    /// Viewport size; 0 until the first size is known
    pub width: u16,
    pub height: u16,
    pub status: String,
    /// Whether `status` reports a failure
    pub status_err: bool,
    pub input: TextBuffer,
    pub theme: Theme,
}

impl App {
    pub fn new(store: Store) -> Self {
        let mut app = App {
            store,
            focus: Focus::Projects,
            mode: Mode::Normal,
            project_cursor: 0,
            todo_cursor: 0,
            width: 0,
            height: 0,
            status: "Ready".to_string(),
            status_err: false,
            input: TextBuffer::new(crate::model::InputConfig::default().char_limit),
            theme: Theme::default(),
        };
        app.clamp_cursors();
        app
    }

    /// Build the initial state from a load attempt. A failed load starts
    /// empty with the error on the status line.
    pub fn from_load(result: Result<Store, StoreError>, config: &Config) -> Self {
        let mut app = match result {
            Ok(store) => App::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "failed loading store");
                let mut app = App::new(Store::default());
                app.set_error(format!("failed loading: {}", e));
                app
            }
        };
        app.input = TextBuffer::new(config.input.char_limit);
        app.theme = Theme::from_config(&config.ui);
        app
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_err = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_err = true;
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.store.project(self.project_cursor)
    }

    pub fn current_todo(&self) -> Option<&Todo> {
        self.current_project()?.todo(self.todo_cursor)
    }

    /// Prompt of the pending delete, while confirming one
    pub fn pending_delete_message(&self) -> Option<&str> {
        match &self.mode {
            Mode::ConfirmDelete { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Keep both cursors inside their lists (0 when a list is empty).
    pub fn clamp_cursors(&mut self) {
        let project_count = self.store.projects.len();
        if project_count == 0 {
            self.project_cursor = 0;
            self.todo_cursor = 0;
            return;
        }
        self.project_cursor = self.project_cursor.min(project_count - 1);

        let todo_count = self.store.projects[self.project_cursor].todos.len();
        if todo_count == 0 {
            self.todo_cursor = 0;
        } else {
            self.todo_cursor = self.todo_cursor.min(todo_count - 1);
        }
    }

    /// Report the outcome of a persist. The in-memory edit is kept either way.
    pub fn record_save(&mut self, result: Result<(), StoreError>) {
        match result {
            Ok(()) => tracing::debug!("store saved"),
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.set_error(format!("save failed: {}", e));
            }
        }
    }
}

/// Run the TUI against the data file at `data_path`
pub fn run(data_path: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::from_load(load_store(data_path), config);

    let kitty = config
        .ui
        .kitty_keyboard
        .unwrap_or_else(|| terminal::supports_keyboard_enhancement().unwrap_or(false));

    enable_raw_mode()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = restore_terminal(&mut io::stdout(), kitty);
        original_hook(panic_info);
    }));

    // Every exit past raw mode, setup failures included, goes through the restore below
    let mut stdout = io::stdout();
    let result = match enter_terminal(&mut stdout, kitty).and_then(|()| terminal::size()) {
        Ok((width, height)) => {
            app.width = width;
            app.height = height;
            run_event_loop(&mut stdout, app, data_path)
        }
        Err(e) => Err(e.into()),
    };

    let restored = restore_terminal(&mut stdout, kitty);
    let raw_off = disable_raw_mode();
    result?;
    restored?;
    raw_off?;
    Ok(())
}

/// Switch to the alternate screen, hide the cursor, push kitty flags
fn enter_terminal(out: &mut impl Write, kitty: bool) -> io::Result<()> {
    queue!(out, EnterAlternateScreen, Hide)?;
    if kitty {
        queue!(
            out,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    out.flush()
}

/// Undo `enter_terminal`. Safe to call after a partial setup.
fn restore_terminal(out: &mut impl Write, kitty: bool) -> io::Result<()> {
    if kitty {
        queue!(out, PopKeyboardEnhancementFlags)?;
    }
    queue!(out, Show, LeaveAlternateScreen)?;
    out.flush()
}

fn run_event_loop(
    out: &mut impl Write,
    mut app: App,
    data_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        draw(out, &app)?;

        let event = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
            Event::Resize(w, h) => AppEvent::Resize(w, h),
            _ => continue,
        };

        let (next, effects) = input::update(app, event);
        app = next;

        for effect in effects {
            match effect {
                Effect::Persist => {
                    let result = save_store(data_path, &app.store);
                    app.record_save(result);
                }
                Effect::OpenLink(url) => opener::open_url(&url),
                Effect::Quit => return Ok(()),
            }
        }
    }
}

/// Redraw the whole frame
fn draw(out: &mut impl Write, app: &App) -> io::Result<()> {
    let frame = render::render(app);
    queue!(out, Clear(ClearType::All))?;
    for (row, line) in frame.iter().enumerate() {
        queue!(
            out,
            MoveTo(0, row as u16),
            Print(line),
            SetAttribute(Attribute::Reset)
        )?;
    }
    out.flush()
}
