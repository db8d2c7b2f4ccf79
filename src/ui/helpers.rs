//! Shared rendering utilities.
//!
//! Every helper writes into a frame buffer instead of stdout so a whole frame
//! can be flushed at once and inspected in tests. Text lengths are measured in
//! characters, never bytes.

use crate::ui::theme::Theme;
use std::fmt::Write;

/// Appends the escape sequence moving the cursor to `row`, `col` (1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut.
///
/// ```text
/// truncate("registry-service", 10) == "registr..."
/// truncate("short", 10)            == "short"
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if char_len(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut cut: String = text.chars().take(max - 3).collect();
    cut.push_str("...");
    cut
}

/// Writes `text` clipped to `width` and padded with spaces to exactly
/// `width` characters.
pub fn write_padded(out: &mut String, text: &str, width: usize) {
    let clipped: String = text.chars().take(width).collect();
    let len = char_len(&clipped);
    out.push_str(&clipped);
    out.push_str(&" ".repeat(width.saturating_sub(len)));
}

/// Writes `text` centered in a line of `width` characters.
pub fn write_centered(out: &mut String, text: &str, width: usize) {
    let clipped: String = text.chars().take(width).collect();
    let len = char_len(&clipped);
    let left = width.saturating_sub(len) / 2;
    out.push_str(&" ".repeat(left));
    out.push_str(&clipped);
    out.push_str(&" ".repeat(width.saturating_sub(left + len)));
}

/// Writes `text` with the given character ranges highlighted.
///
/// Ranges are `(start, end)` character indices, end exclusive, sorted and
/// non-overlapping. Ranges past the end of `text` are clamped. A selected row
/// keeps its selection colors, so highlighting is skipped.
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;

    for &(start, end) in ranges {
        let start = start.clamp(pos, chars.len());
        let end = end.clamp(start, chars.len());
        if start == end {
            continue;
        }

        out.extend(&chars[pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        pos = end;
    }

    out.extend(&chars[pos..]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("users", 10), "users");
        assert_eq!(truncate("exactly-10", 10), "exactly-10");
    }

    #[test]
    fn truncate_cuts_on_char_boundaries() {
        assert_eq!(truncate("registry-service", 10), "registr...");
        assert_eq!(truncate("żółć-gęślą-jaźń", 8), "żółć-...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn padded_and_centered_fill_width() {
        let mut out = String::new();
        write_padded(&mut out, "abc", 6);
        assert_eq!(out, "abc   ");

        let mut out = String::new();
        write_centered(&mut out, "ab", 6);
        assert_eq!(out, "  ab  ");

        let mut out = String::new();
        write_padded(&mut out, "abcdef", 3);
        assert_eq!(out, "abc");
    }

    #[test]
    fn highlight_survives_out_of_range_ranges() {
        let theme = Theme::default();
        let mut out = String::new();
        render_highlighted_text(&mut out, "api", &[(1, 2), (5, 9)], &theme, false);
        assert!(out.starts_with('a'));
        assert!(out.ends_with('i'));
        assert!(out.contains(&Theme::bg(&theme.colors.match_highlight_bg)));
    }

    #[test]
    fn selected_rows_are_not_highlighted() {
        let theme = Theme::default();
        let mut out = String::new();
        render_highlighted_text(&mut out, "api", &[(0, 1)], &theme, true);
        assert_eq!(out, "api");
    }
}
