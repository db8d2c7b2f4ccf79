//! Frame components.
//!
//! Each renderer writes its rows into the frame buffer starting at a given
//! row and returns the next free row, so the layout in
//! [`renderer`](crate::ui::renderer) reads top to bottom.
//!
//! - [`render_header`]: title and breadcrumb
//! - [`render_banner`]: error/info notice
//! - [`render_input_bar`]: filter or edit box
//! - [`render_table_headers`], [`render_table_rows`]: list body
//! - [`render_empty_state`], [`render_message`]: placeholder bodies
//! - [`render_detail`]: endpoint detail body
//! - [`render_footer`]: hints and status

mod banner;
mod detail;
mod empty;
mod footer;
mod header;
mod input;
mod table;

pub use banner::render_banner;
pub use detail::render_detail;
pub use empty::{render_empty_state, render_message};
pub use footer::render_footer;
pub use header::render_header;
pub use input::render_input_bar;
pub use table::{render_table_headers, render_table_rows};

use crate::ui::helpers::{position_cursor, write_padded};
use crate::ui::theme::Theme;

/// Renders a full-width horizontal rule and returns the next row.
pub fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Blanks rows `from..=to` so stale content from the previous frame is
/// overwritten.
pub fn clear_rows(out: &mut String, from: usize, to: usize, cols: usize) {
    for row in from..=to {
        position_cursor(out, row, 1);
        write_padded(out, "", cols);
    }
}
