//! Bordered text input box for filter queries and edit drafts.

use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::InputBarInfo;

/// Spaces left and right of the box.
const INPUT_BOX_MARGIN: usize = 2;

/// Renders the three-row input box at `row` and returns the row after it.
///
/// ```text
///   ┌──────────────────────────────┐
///   │ Filter: pla█                 │
///   └──────────────────────────────┘
/// ```
///
/// A validation error is appended after the text in the error color.
pub fn render_input_bar(out: &mut String, row: usize, input: &InputBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(INPUT_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(INPUT_BOX_MARGIN);
    let border = Theme::fg(&theme.colors.input_border);

    position_cursor(out, row, 1);
    out.push_str(&margin);
    out.push_str(&border);
    out.push('┌');
    out.push_str(&"─".repeat(inner_width));
    out.push('┐');
    out.push_str(Theme::reset());
    out.push_str(&margin);

    let text = format!(" {}: {}█", input.label, input.text);
    let error = input
        .error
        .as_ref()
        .map(|e| format!("  {e}"))
        .unwrap_or_default();
    let text: String = text.chars().take(inner_width).collect();
    let error: String = error
        .chars()
        .take(inner_width.saturating_sub(char_len(&text)))
        .collect();
    let padding = inner_width.saturating_sub(char_len(&text) + char_len(&error));

    position_cursor(out, row + 1, 1);
    out.push_str(&margin);
    out.push_str(&border);
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&text);
    out.push_str(&Theme::fg(&theme.colors.error_fg));
    out.push_str(&error);
    out.push_str(&" ".repeat(padding));
    out.push_str(&border);
    out.push('│');
    out.push_str(Theme::reset());
    out.push_str(&margin);

    position_cursor(out, row + 2, 1);
    out.push_str(&margin);
    out.push_str(&border);
    out.push('└');
    out.push_str(&"─".repeat(inner_width));
    out.push('┘');
    out.push_str(Theme::reset());
    out.push_str(&margin);

    row + 3
}
