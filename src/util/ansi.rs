//! Escape-sequence-aware measuring and splicing of styled terminal lines.
//!
//! A styled line is a sequence of [`Segment`]s: runs of printable text and
//! zero-width escape tokens. The splicer only ever looks at that split, never
//! at what a token means, so any SGR producer works as long as its tokens
//! start with ESC and end with a standard terminator.

use unicode_segmentation::UnicodeSegmentation;

use super::unicode::{display_width, grapheme_width};

const ESC: char = '\x1b';
const RESET: &str = "\x1b[0m";

/// One piece of a styled line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Printable text (no escape bytes)
    Text(&'a str),
    /// A complete escape token, zero visual width
    Escape(&'a str),
}

/// Split a styled line into text runs and escape tokens.
pub fn segments(line: &str) -> Segments<'_> {
    Segments { rest: line }
}

pub struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if self.rest.is_empty() {
            return None;
        }
        let len = if self.rest.starts_with(ESC) {
            escape_len(self.rest)
        } else {
            self.rest.find(ESC).unwrap_or(self.rest.len())
        };
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        if head.starts_with(ESC) {
            Some(Segment::Escape(head))
        } else {
            Some(Segment::Text(head))
        }
    }
}

/// Byte length of the escape token at the start of `s` (which begins with ESC).
/// An unterminated token swallows the rest of the line.
fn escape_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    match bytes.get(1) {
        // CSI: parameters then a final byte in 0x40..=0x7e
        Some(b'[') => bytes[2..]
            .iter()
            .position(|b| (0x40..=0x7e).contains(b))
            .map_or(bytes.len(), |p| p + 3),
        // OSC / DCS / APC: terminated by BEL or ESC \
        Some(b']' | b'P' | b'_') => {
            let mut idx = 2;
            while idx < bytes.len() {
                if bytes[idx] == 0x07 {
                    return idx + 1;
                }
                if bytes[idx] == 0x1b && bytes.get(idx + 1) == Some(&b'\\') {
                    return idx + 2;
                }
                idx += 1;
            }
            bytes.len()
        }
        // Two-byte escape (ESC + one char)
        Some(_) => 1 + s[1..].chars().next().map_or(0, char::len_utf8),
        None => 1,
    }
}

/// Visual width of a styled line, escape tokens excluded.
pub fn visible_width(line: &str) -> usize {
    segments(line)
        .map(|seg| match seg {
            Segment::Text(t) => display_width(t),
            Segment::Escape(_) => 0,
        })
        .sum()
}

/// Printable text of a styled line with every escape token removed.
pub fn strip(line: &str) -> String {
    segments(line)
        .filter_map(|seg| match seg {
            Segment::Text(t) => Some(t),
            Segment::Escape(_) => None,
        })
        .collect()
}

/// Cut a styled line down to at most `max_width` visible cells. Escape tokens
/// up to the cut are kept, and a reset is appended when any were kept so the
/// dropped tail cannot leave a style open.
pub fn truncate(line: &str, max_width: usize) -> String {
    if visible_width(line) <= max_width {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len());
    let mut col = 0;
    let mut styled = false;
    'outer: for seg in segments(line) {
        match seg {
            Segment::Escape(e) => {
                out.push_str(e);
                styled = true;
            }
            Segment::Text(t) => {
                for g in t.graphemes(true) {
                    let w = grapheme_width(g);
                    if col + w > max_width {
                        break 'outer;
                    }
                    out.push_str(g);
                    col += w;
                }
            }
        }
    }
    if styled {
        out.push_str(RESET);
    }
    out
}

/// Pad a styled line with plain spaces up to `width` visible cells.
pub fn pad(line: &str, width: usize) -> String {
    let w = visible_width(line);
    if w >= width {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + width - w);
    out.push_str(line);
    out.extend(std::iter::repeat_n(' ', width - w));
    out
}

/// Splice `fg` into `bg` so its visible text starts at column `x_off`.
///
/// The background is padded to `total_width` first. Background cells in
/// `[x_off, x_off + fg_width)` are replaced; escape tokens positioned inside
/// that range are dropped, tokens before or after it are kept so the style in
/// effect around the splice still governs the surviving text. Background cells
/// at or past `total_width` are dropped. A wide background glyph cut by either
/// edge of the splice, or by `total_width`, is replaced by spaces for the
/// cells left uncovered.
pub fn splice(bg: &str, fg: &str, x_off: usize, total_width: usize) -> String {
    let bg = pad(bg, total_width);
    let fg_width = visible_width(fg);
    let fg_end = x_off + fg_width;

    let mut prefix = String::with_capacity(bg.len());
    let mut suffix = String::with_capacity(bg.len());
    let mut col = 0;

    for seg in segments(&bg) {
        match seg {
            Segment::Escape(e) => {
                if col < x_off {
                    prefix.push_str(e);
                } else if col >= fg_end {
                    suffix.push_str(e);
                }
            }
            Segment::Text(t) => {
                for g in t.graphemes(true) {
                    let w = grapheme_width(g);
                    let end = col + w;
                    let clip = end.min(total_width);
                    if end <= x_off && end <= total_width {
                        prefix.push_str(g);
                    } else if col >= fg_end && end <= total_width {
                        suffix.push_str(g);
                    } else {
                        // cut by a splice edge or by total_width: uncovered cells become spaces
                        let before = x_off.min(clip).saturating_sub(col);
                        let after = clip.saturating_sub(col.max(fg_end));
                        prefix.extend(std::iter::repeat_n(' ', before));
                        suffix.extend(std::iter::repeat_n(' ', after));
                    }
                    col = end;
                }
            }
        }
    }

    let mut out = prefix;
    out.push_str(fg);
    out.push_str(&suffix);
    out
}
