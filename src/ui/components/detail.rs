//! Endpoint detail body: request fields, status line and response pane.

use crate::ui::helpers::{position_cursor, write_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const LABEL_WIDTH: usize = 9;

/// Renders the detail body starting at `row`, never writing past `last_row`.
///
/// ```text
///  Method   GET
///  URL      https://httpbin.org/get
///  Headers  Accept: application/json
///  Query    (none)
///  Body     (empty)
///  200 OK  143 ms
///  ── Response ──────────────────────
///  content-type: application/json
///  ...
/// ```
///
/// Returns the next free row.
pub fn render_detail(
    out: &mut String,
    row: usize,
    info: &DetailInfo,
    theme: &Theme,
    cols: usize,
    last_row: usize,
) -> usize {
    let mut current = row;
    let value_width = cols.saturating_sub(LABEL_WIDTH + 2);

    for (label, value) in &info.fields {
        if current > last_row {
            return current;
        }
        position_cursor(out, current, 1);
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.header_fg));
        write_padded(out, &format!(" {label}"), LABEL_WIDTH + 2);
        out.push_str(Theme::reset());
        let color = if label == "Method" {
            &theme.colors.method_fg
        } else {
            &theme.colors.text_normal
        };
        out.push_str(&Theme::fg(color));
        write_padded(out, value, value_width);
        out.push_str(Theme::reset());
        current += 1;
    }

    if current > last_row {
        return current;
    }
    position_cursor(out, current, 1);
    match &info.status {
        Some((line, success)) => {
            let color = if *success {
                &theme.colors.success_fg
            } else {
                &theme.colors.error_fg
            };
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(color));
            write_padded(out, &format!(" {line}"), cols);
            out.push_str(Theme::reset());
        }
        None => write_padded(out, "", cols),
    }
    current += 1;

    if current > last_row {
        return current;
    }
    position_cursor(out, current, 1);
    out.push_str(&Theme::fg(&theme.colors.border));
    let caption = " ── Response ";
    write_padded(out, &format!("{caption}{}", "─".repeat(cols)), cols);
    out.push_str(Theme::reset());
    current += 1;

    if let Some(placeholder) = &info.placeholder {
        if current <= last_row {
            position_cursor(out, current, 1);
            out.push_str(&Theme::fg(&theme.colors.text_dim));
            write_padded(out, &format!(" {placeholder}"), cols);
            out.push_str(Theme::reset());
            current += 1;
        }
        return current;
    }

    for line in &info.response_lines {
        if current > last_row {
            break;
        }
        position_cursor(out, current, 1);
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        write_padded(out, &format!(" {line}"), cols);
        out.push_str(Theme::reset());
        current += 1;
    }
    current
}
