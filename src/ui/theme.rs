//! Color schemes and ANSI escape sequence generation.
//!
//! Themes are TOML documents with a `name` and a `[colors]` table of hex
//! strings. Four Catppuccin flavors are compiled in; any other theme can be
//! loaded from a file.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: dark (default)
//! - `catppuccin-macchiato`: dark, warmer
//! - `catppuccin-frappe`: dark, muted
//! - `catppuccin-latte`: light
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#cba6f7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! input_border = "#cba6f7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! info_fg = "#89dceb"
//! success_fg = "#a6e3a1"
//! method_fg = "#fab387"
//! ```

use crate::domain::error::{ReqError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Names accepted by [`Theme::from_name`].
pub const BUILTIN_THEMES: [&str; 4] = [
    "catppuccin-mocha",
    "catppuccin-macchiato",
    "catppuccin-frappe",
    "catppuccin-latte",
];

/// Named color scheme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Title and column headers.
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, breadcrumb and secondary columns.
    pub text_dim: String,

    pub border: String,
    /// Frame of the filter and edit box.
    pub input_border: String,

    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Error banners and inline validation messages.
    pub error_fg: String,
    pub info_fg: String,
    /// 2xx status lines.
    pub success_fg: String,
    /// HTTP method in the detail view.
    pub method_fg: String,
}

impl Theme {
    /// Loads a compiled-in theme, or `None` for an unknown name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        match toml::from_str(toml_str) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::error!(name, error = %e, "built-in theme failed to parse");
                None
            }
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ReqError::Theme`] if the file cannot be read or does not
    /// describe a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ReqError::Theme(format!("cannot read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| ReqError::Theme(format!("invalid theme {}: {e}", path.display())))
    }

    /// Parses `#rrggbb`; anything malformed renders as white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .unwrap_or(255)
        };

        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Catppuccin Mocha built without the embedded TOML.
    fn mocha() -> Self {
        let hex = |s: &str| s.to_string();
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: hex("#cdd6f4"),
                header_bg: None,
                selection_fg: hex("#1e1e2e"),
                selection_bg: hex("#cba6f7"),
                text_normal: hex("#cdd6f4"),
                text_dim: hex("#6c7086"),
                border: hex("#45475a"),
                input_border: hex("#cba6f7"),
                match_highlight_fg: hex("#1e1e2e"),
                match_highlight_bg: hex("#f9e2af"),
                empty_state_fg: hex("#89b4fa"),
                error_fg: hex("#f38ba8"),
                info_fg: hex("#89dceb"),
                success_fg: hex("#a6e3a1"),
                method_fg: hex("#fab387"),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::mocha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn every_builtin_parses() {
        for name in BUILTIN_THEMES {
            let theme = Theme::from_name(name).unwrap_or_else(|| panic!("{name} should parse"));
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn embedded_mocha_matches_the_fallback() {
        assert_eq!(Theme::default(), Theme::mocha());
    }

    #[test]
    fn hex_conversion() {
        assert_eq!(Theme::fg("#cdd6f4"), "\u{1b}[38;2;205;214;244m");
        assert_eq!(Theme::bg("1e1e2e"), "\u{1b}[48;2;30;30;46m");
        assert_eq!(Theme::fg("#abc"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::fg("#zzzzzz"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn from_file_reports_theme_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = Theme::from_file(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ReqError::Theme(_))));

        let path = dir.path().join("partial.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "name = \"partial\"\n[colors]\nheader_fg = \"#ffffff\"").unwrap();
        assert!(matches!(Theme::from_file(&path), Err(ReqError::Theme(_))));
    }

    #[test]
    fn from_file_loads_custom_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut custom = Theme::mocha();
        custom.name = "custom".to_string();
        fs::write(&path, toml::to_string(&custom).unwrap()).unwrap();

        let loaded = Theme::from_file(&path).unwrap();
        assert_eq!(loaded, custom);
    }
}
