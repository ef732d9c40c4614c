use crate::util::ansi;

/// Top-left position that centers a `fg_width` x `fg_height` block on a
/// `bg_width` x `bg_height` frame. Returns `(x_off, y_off)`.
pub fn centered_offsets(
    bg_width: usize,
    bg_height: usize,
    fg_width: usize,
    fg_height: usize,
) -> (usize, usize) {
    (
        bg_width.saturating_sub(fg_width) / 2,
        bg_height.saturating_sub(fg_height) / 2,
    )
}

/// Composite `fg` centered over `bg`.
///
/// The background is padded or cut to exactly `bg_height` lines first.
/// Foreground rows that would land below the frame are skipped.
pub fn overlay_center(
    mut bg: Vec<String>,
    fg: &[String],
    bg_width: usize,
    bg_height: usize,
) -> Vec<String> {
    bg.resize(bg_height, String::new());

    let fg_width = fg.iter().map(|l| ansi::visible_width(l)).max().unwrap_or(0);
    let (x_off, y_off) = centered_offsets(bg_width, bg_height, fg_width, fg.len());

    for (i, line) in fg.iter().enumerate() {
        let Some(target) = bg.get_mut(y_off + i) else {
            break;
        };
        *target = ansi::splice(target, line, x_off, bg_width);
    }
    bg
}
