//! Frame layout.
//!
//! ```text
//!  1  title
//!  2  breadcrumb
//!  3  ─────────
//!  4  banner (blank when none)
//!     input box (3 rows, filter/edit only)
//!     body: table header + rows, placeholder, or detail
//! -2  ─────────
//! -1  hints                    status
//! ```
//!
//! The whole frame is built into one `String` and written by the runtime in a
//! single flush. Every row is padded to the full width, so no clear-screen is
//! needed between frames.

use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

/// Rows used by everything except list rows: title, breadcrumb, two rules,
/// banner, table header and footer.
pub const CHROME_ROWS: usize = 7;

/// Height of the input box when a filter or draft is open.
pub const INPUT_BAR_ROWS: usize = 3;

/// Characters of a list title shown before truncation.
pub const TITLE_COLUMN_WIDTH: usize = 40;

/// Renders `vm` into an ANSI frame of `rows` by `cols` cells.
#[must_use]
pub fn render(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut out = String::with_capacity(rows * cols * 4);
    let footer_row = rows.max(CHROME_ROWS);
    let last_body_row = footer_row - 2;

    let mut row = components::render_header(&mut out, 1, &vm.header, theme, cols);
    row = components::render_border(&mut out, row, &theme.colors.border, cols);
    row = components::render_banner(&mut out, row, vm.banner.as_ref(), theme, cols);
    if let Some(input) = &vm.input_bar {
        row = components::render_input_bar(&mut out, row, input, theme, cols);
    }

    row = match &vm.body {
        Body::Loading(message) => components::render_message(&mut out, row, message, theme, cols),
        Body::Empty(empty) => components::render_empty_state(&mut out, row, empty, theme, cols),
        Body::List { columns, items } => {
            let next = components::render_table_headers(&mut out, row, *columns, theme, cols);
            components::render_table_rows(&mut out, next, items, theme, cols, last_body_row)
        }
        Body::Detail(info) => components::render_detail(&mut out, row, info, theme, cols, last_body_row),
    };

    components::clear_rows(&mut out, row, last_body_row, cols);
    components::render_border(&mut out, footer_row - 1, &theme.colors.border, cols);
    components::render_footer(&mut out, footer_row, &vm.footer, theme, cols);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::{
        BannerInfo, BannerKind, DetailInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo,
        InputBarInfo,
    };
    use std::collections::BTreeMap;

    /// Replays cursor moves and drops styling, yielding plain text per row.
    fn screen(frame: &str) -> BTreeMap<usize, String> {
        let mut screen = BTreeMap::new();
        let mut row = 0;
        let mut chars = frame.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' && chars.peek() == Some(&'[') {
                chars.next();
                let mut params = String::new();
                for p in chars.by_ref() {
                    if p.is_ascii_alphabetic() {
                        if p == 'H' {
                            row = params.split(';').next().unwrap().parse().unwrap();
                            screen.insert(row, String::new());
                        }
                        break;
                    }
                    params.push(p);
                }
            } else {
                screen.entry(row).or_insert_with(String::new).push(c);
            }
        }
        screen
    }

    fn list_vm(count: usize) -> UIViewModel {
        UIViewModel {
            header: HeaderInfo {
                title: "Collections".to_string(),
                breadcrumb: "Collections".to_string(),
            },
            banner: None,
            input_bar: None,
            body: Body::List {
                columns: ("NAME", "UPDATED"),
                items: (0..count)
                    .map(|i| DisplayItem {
                        title: format!("collection-{i}"),
                        subtext: "updated just now".to_string(),
                        is_selected: i == 1,
                        highlight_ranges: vec![],
                    })
                    .collect(),
            },
            footer: FooterInfo {
                keybindings: "j/k: move".to_string(),
                status: "Page 1/2 (12 total)".to_string(),
            },
        }
    }

    #[test]
    fn every_row_is_written_at_full_width() {
        let frame = render(&list_vm(3), &Theme::default(), 24, 80);
        let screen = screen(&frame);
        assert_eq!(screen.len(), 24);
        assert!(screen.values().all(|line| line.chars().count() == 80), "{screen:#?}");
    }

    #[test]
    fn list_layout() {
        let frame = render(&list_vm(3), &Theme::default(), 24, 80);
        let screen = screen(&frame);

        assert_eq!(screen[&1].trim(), "Collections");
        assert_eq!(screen[&2].trim(), "Collections");
        assert!(screen[&5].trim_start().starts_with("NAME"));
        assert!(screen[&6].contains("collection-0"));
        assert!(screen[&7].starts_with('▶'));
        assert!(screen[&24].trim_end().ends_with("Page 1/2 (12 total)"));
        assert!(screen[&24].trim_start().starts_with("j/k: move"));
    }

    #[test]
    fn list_rows_fill_exactly_the_available_space() {
        let rows = 20;
        let frame = render(&list_vm(100), &Theme::default(), rows, 60);
        let screen = screen(&frame);
        let listed = screen.values().filter(|l| l.contains("collection-")).count();
        assert_eq!(listed, rows - CHROME_ROWS);
        assert!(screen[&(rows - 1)].starts_with('─'));
    }

    #[test]
    fn banner_and_input_bar() {
        let mut vm = list_vm(1);
        vm.banner = Some(BannerInfo {
            kind: BannerKind::Error,
            message: "Storage error: disk full".to_string(),
        });
        vm.input_bar = Some(InputBarInfo {
            label: "New collection".to_string(),
            text: String::new(),
            error: Some("name must not be empty".to_string()),
        });
        let screen = screen(&render(&vm, &Theme::default(), 24, 80));

        assert!(screen[&4].contains("Storage error: disk full"));
        assert!(screen[&5].contains('┌'));
        assert!(screen[&6].contains("New collection: █"));
        assert!(screen[&6].contains("name must not be empty"));
        assert!(screen[&8].trim_start().starts_with("NAME"));
    }

    #[test]
    fn empty_state_is_centered() {
        let mut vm = list_vm(0);
        vm.body = Body::Empty(EmptyState {
            message: "No collections yet".to_string(),
            subtitle: "Press 'a' to create a collection".to_string(),
        });
        let screen = screen(&render(&vm, &Theme::default(), 24, 80));
        let line = &screen[&6];
        assert_eq!(line.trim(), "No collections yet");
        assert!(line.starts_with("   "));
    }

    #[test]
    fn detail_shows_fields_then_response() {
        let mut vm = list_vm(0);
        vm.body = Body::Detail(DetailInfo {
            fields: vec![
                ("Method".to_string(), "GET".to_string()),
                ("URL".to_string(), "https://httpbin.org/get".to_string()),
            ],
            status: Some(("200 OK  12 ms".to_string(), true)),
            response_lines: vec!["{".to_string(), "}".to_string()],
            placeholder: None,
        });
        let screen = screen(&render(&vm, &Theme::default(), 24, 80));
        assert!(screen[&5].contains("GET"));
        assert!(screen[&6].contains("https://httpbin.org/get"));
        assert!(screen[&7].contains("200 OK"));
        assert!(screen[&8].contains("Response"));
        assert_eq!(screen[&9].trim(), "{");
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let frame = render(&list_vm(5), &Theme::default(), 2, 3);
        assert!(!frame.is_empty());
    }
}
