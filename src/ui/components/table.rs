//! Two-column resource table: title and subtext.

use crate::ui::helpers::{self, char_len, position_cursor, write_padded};
use crate::ui::renderer::TITLE_COLUMN_WIDTH;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Width of the title column including the gap before the subtext.
const NAME_COLUMN: usize = TITLE_COLUMN_WIDTH + 2;

/// Renders the bold column captions and returns the next row.
pub fn render_table_headers(
    out: &mut String,
    row: usize,
    columns: (&str, &str),
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    write_padded(out, &format!(" {:<width$}{}", columns.0, columns.1, width = NAME_COLUMN), cols);
    out.push_str(Theme::reset());
    row + 1
}

/// Renders one row per item, stopping after `last_row`. Returns the next
/// free row.
pub fn render_table_rows(
    out: &mut String,
    row: usize,
    items: &[DisplayItem],
    theme: &Theme,
    cols: usize,
    last_row: usize,
) -> usize {
    let mut current = row;
    for item in items {
        if current > last_row {
            break;
        }
        current = render_table_row(out, current, item, theme, cols);
    }
    current
}

fn render_table_row(out: &mut String, row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    out.push_str(&base);

    let marker = if item.is_selected { "▶" } else { " " };
    out.push_str(marker);

    let title_width = NAME_COLUMN.min(cols.saturating_sub(1));
    let title: String = item.title.chars().take(title_width).collect();
    helpers::render_highlighted_text(out, &title, &item.highlight_ranges, theme, item.is_selected);
    if !item.highlight_ranges.is_empty() && !item.is_selected {
        out.push_str(&base);
    }
    out.push_str(&" ".repeat(title_width.saturating_sub(char_len(&title))));

    if !item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
    }
    let remaining = cols.saturating_sub(1 + title_width);
    write_padded(out, &item.subtext, remaining);

    out.push_str(Theme::reset());
    row + 1
}
