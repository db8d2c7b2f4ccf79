//! One-line error or info notice under the header.

use crate::ui::helpers::{position_cursor, write_padded};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{BannerInfo, BannerKind};

/// Renders the banner row. The row is always consumed so the layout does not
/// jump when a banner appears or clears.
pub fn render_banner(out: &mut String, row: usize, banner: Option<&BannerInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    match banner {
        Some(banner) => {
            let (color, marker) = match banner.kind {
                BannerKind::Error => (&theme.colors.error_fg, "✗"),
                BannerKind::Info => (&theme.colors.info_fg, "ℹ"),
            };
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(color));
            write_padded(out, &format!(" {marker} {}", banner.message), cols);
            out.push_str(Theme::reset());
        }
        None => write_padded(out, "", cols),
    }
    row + 1
}
