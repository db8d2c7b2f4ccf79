//! Title and breadcrumb rows.

use crate::ui::helpers::{position_cursor, write_centered, write_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centered bold title and, under it, the dimmed breadcrumb.
///
/// Returns the row after the breadcrumb.
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    write_centered(out, &header.title, cols);
    out.push_str(Theme::reset());

    position_cursor(out, row + 1, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    write_padded(out, &format!(" {}", header.breadcrumb), cols);
    out.push_str(Theme::reset());

    row + 2
}
