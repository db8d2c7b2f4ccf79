//! Placeholder bodies: loading and empty lists.

use crate::ui::helpers::{position_cursor, write_centered, write_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a blank row then the centered message and dimmed subtitle.
///
/// Returns the row after the subtitle.
pub fn render_empty_state(out: &mut String, row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    write_padded(out, "", cols);

    position_cursor(out, row + 1, 1);
    out.push_str(&Theme::fg(&theme.colors.empty_state_fg));
    write_centered(out, &empty.message, cols);
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    write_centered(out, &empty.subtitle, cols);
    out.push_str(Theme::reset());

    row + 3
}

/// Renders a single centered, dimmed line such as `Loading collections...`.
pub fn render_message(out: &mut String, row: usize, message: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    write_padded(out, "", cols);

    position_cursor(out, row + 1, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    write_centered(out, message, cols);
    out.push_str(Theme::reset());

    row + 2
}
