//! Footer with keybinding hints and a right-aligned status.

use crate::ui::helpers::{char_len, position_cursor, write_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer at `row`.
///
/// The status (page indicator, method) keeps its place at the right edge;
/// the hints are clipped first when the terminal is narrow.
pub fn render_footer(out: &mut String, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let status = if footer.status.is_empty() {
        String::new()
    } else {
        format!("{} ", footer.status)
    };
    let status_len = char_len(&status).min(cols);
    let hints_width = cols - status_len;

    position_cursor(out, row, 1);
    out.push_str(Theme::dim());
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    write_padded(out, &format!(" {}", footer.keybindings), hints_width);
    out.push_str(Theme::reset());

    out.push_str(&Theme::fg(&theme.colors.header_fg));
    write_padded(out, &status, status_len);
    out.push_str(Theme::reset());
    row + 1
}
