use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::{Attribute, ContentStyle};
use unicode_segmentation::UnicodeSegmentation;

use crate::util::unicode;

use super::theme::{Theme, fg, paint};

/// Rows shown by the input popup's editor
pub const EDITOR_HEIGHT: usize = 3;

/// Multi-line text buffer behind the input popup.
///
/// `cursor` is a byte offset that always sits on a grapheme boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    value: String,
    cursor: usize,
    placeholder: String,
    char_limit: usize,
}

/// One wrapped screen row: byte range into the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Row {
    start: usize,
    end: usize,
}

impl TextBuffer {
    pub fn new(char_limit: usize) -> Self {
        TextBuffer {
            value: String::new(),
            cursor: 0,
            placeholder: String::new(),
            char_limit,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Replace the contents and move the cursor to the end.
    pub fn set_value(&mut self, value: &str) {
        self.value.clear();
        self.cursor = 0;
        self.insert_str(value);
    }

    pub fn set_placeholder(&mut self, placeholder: &str) {
        self.placeholder = placeholder.to_string();
    }

    /// Insert at the cursor, dropping whatever would exceed the char limit.
    pub fn insert_str(&mut self, text: &str) {
        let room = self
            .char_limit
            .saturating_sub(self.value.chars().count());
        let mut accepted = String::new();
        for g in text.graphemes(true) {
            let n = g.chars().count();
            if accepted.chars().count() + n > room {
                break;
            }
            accepted.push_str(g);
        }
        self.value.insert_str(self.cursor, &accepted);
        self.cursor += accepted.len();
    }

    pub fn insert_newline(&mut self) {
        self.insert_str("\n");
    }

    fn line_start(&self) -> usize {
        self.value[..self.cursor].rfind('\n').map_or(0, |i| i + 1)
    }

    fn line_end(&self) -> usize {
        self.value[self.cursor..]
            .find('\n')
            .map_or(self.value.len(), |i| self.cursor + i)
    }

    fn move_vertical(&mut self, down: bool) {
        let start = self.line_start();
        let col = unicode::byte_offset_to_display_col(&self.value[start..], self.cursor - start);
        let (target_start, target_end) = if down {
            let end = self.line_end();
            if end == self.value.len() {
                self.cursor = end;
                return;
            }
            let next_start = end + 1;
            let next_end = self.value[next_start..]
                .find('\n')
                .map_or(self.value.len(), |i| next_start + i);
            (next_start, next_end)
        } else {
            if start == 0 {
                self.cursor = 0;
                return;
            }
            let prev_end = start - 1;
            let prev_start = self.value[..prev_end].rfind('\n').map_or(0, |i| i + 1);
            (prev_start, prev_end)
        };
        let line = &self.value[target_start..target_end];
        self.cursor = target_start + unicode::display_col_to_byte_offset(line, col);
    }

    /// Apply an editing key. Keys with no editing meaning are ignored.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => {
                self.cursor = self.line_start();
            }
            (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
                self.cursor = self.line_end();
            }
            // Kill to start of line
            (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
                let start = self.line_start();
                self.value.drain(start..self.cursor);
                self.cursor = start;
            }
            // Kill to end of line
            (m, KeyCode::Char('k')) if m.contains(KeyModifiers::CONTROL) => {
                let end = self.line_end();
                self.value.drain(self.cursor..end);
            }
            (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => {
                self.delete_word_back();
            }
            (m, KeyCode::Backspace) if m.contains(KeyModifiers::ALT) => {
                self.delete_word_back();
            }
            (m, KeyCode::Left) if m.contains(KeyModifiers::ALT) => {
                self.cursor = unicode::word_boundary_left(&self.value, self.cursor);
            }
            (m, KeyCode::Right) if m.contains(KeyModifiers::ALT) => {
                self.cursor = unicode::word_boundary_right(&self.value, self.cursor);
            }
            (_, KeyCode::Left) => {
                if let Some(prev) = unicode::prev_grapheme_boundary(&self.value, self.cursor) {
                    self.cursor = prev;
                }
            }
            (_, KeyCode::Right) => {
                if let Some(next) = unicode::next_grapheme_boundary(&self.value, self.cursor) {
                    self.cursor = next;
                }
            }
            (_, KeyCode::Home) => self.cursor = self.line_start(),
            (_, KeyCode::End) => self.cursor = self.line_end(),
            (_, KeyCode::Up) => self.move_vertical(false),
            (_, KeyCode::Down) => self.move_vertical(true),
            (_, KeyCode::Backspace) => {
                if let Some(prev) = unicode::prev_grapheme_boundary(&self.value, self.cursor) {
                    self.value.drain(prev..self.cursor);
                    self.cursor = prev;
                }
            }
            (_, KeyCode::Delete) => {
                if let Some(next) = unicode::next_grapheme_boundary(&self.value, self.cursor) {
                    self.value.drain(self.cursor..next);
                }
            }
            (m, KeyCode::Char(c))
                if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let mut buf = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut buf));
            }
            _ => {}
        }
    }

    fn delete_word_back(&mut self) {
        let start = unicode::word_boundary_left(&self.value, self.cursor);
        self.value.drain(start..self.cursor);
        self.cursor = start;
    }

    /// Hard-wrap every logical line to `width` cells. A cursor sitting at the
    /// end of a full row gets an extra empty row to live on.
    fn rows(&self, width: usize) -> Vec<Row> {
        let mut rows = Vec::new();
        let mut line_start = 0;
        for line in self.value.split('\n') {
            let mut row_start = line_start;
            let mut col = 0;
            for (i, g) in line.grapheme_indices(true) {
                let w = unicode::grapheme_width(g);
                if col + w > width && col > 0 {
                    rows.push(Row {
                        start: row_start,
                        end: line_start + i,
                    });
                    row_start = line_start + i;
                    col = 0;
                }
                col += w;
            }
            let line_end = line_start + line.len();
            rows.push(Row {
                start: row_start,
                end: line_end,
            });
            if col >= width && self.cursor == line_end {
                rows.push(Row {
                    start: line_end,
                    end: line_end,
                });
            }
            line_start = line_end + 1;
        }
        rows
    }

    /// Render exactly `height` rows of at most `width` cells, scrolled so the
    /// cursor row is visible. The cursor cell is drawn in reverse video.
    pub fn view(&self, width: usize, height: usize, theme: &Theme) -> Vec<String> {
        let width = width.max(1);
        let height = height.max(1);
        let text_style = fg(theme.normal);
        let mut cursor_style = text_style;
        cursor_style.attributes.set(Attribute::Reverse);

        let mut out = Vec::with_capacity(height);

        if self.value.is_empty() {
            let mut graphemes = self.placeholder.graphemes(true);
            let first = graphemes.next().unwrap_or(" ");
            let rest: String = graphemes.collect();
            let rest = crate::util::ansi::truncate(&rest, width.saturating_sub(1));
            let mut row = paint(cursor_style, first);
            if !rest.is_empty() {
                row.push_str(&paint(fg(theme.placeholder), &rest));
            }
            out.push(row);
        } else {
            let rows = self.rows(width);
            let cursor_row = rows
                .iter()
                .rposition(|r| r.start <= self.cursor && self.cursor <= r.end)
                .unwrap_or(0);
            let first = cursor_row.saturating_sub(height - 1);
            for (idx, row) in rows.iter().enumerate().skip(first).take(height) {
                out.push(self.render_row(*row, idx == cursor_row, text_style, cursor_style));
            }
        }

        out.resize(height, String::new());
        out
    }

    fn render_row(
        &self,
        row: Row,
        has_cursor: bool,
        text_style: ContentStyle,
        cursor_style: ContentStyle,
    ) -> String {
        let text = &self.value[row.start..row.end];
        if !has_cursor {
            return paint(text_style, text);
        }
        let at = self.cursor - row.start;
        let (before, rest) = text.split_at(at);
        let cell = rest.graphemes(true).next().unwrap_or(" ");
        let after = rest.get(cell.len()..).unwrap_or("");

        let mut out = String::new();
        if !before.is_empty() {
            out.push_str(&paint(text_style, before));
        }
        out.push_str(&paint(cursor_style, cell));
        if !after.is_empty() {
            out.push_str(&paint(text_style, after));
        }
        out
    }
}
