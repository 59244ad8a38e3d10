//! Theme management and ANSI escape sequence generation.
//!
//! Two built-in themes ship with the binary, `light` and `dark`; the stored
//! dark-mode preference picks between them. A custom theme can be loaded from
//! a TOML file with the same shape.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#1e3a8a"
//! selection_fg = "#ffffff"
//! selection_bg = "#2563eb"
//! text_normal = "#1f2937"
//! text_dim = "#6b7280"
//! border = "#d1d5db"
//! search_bar_border = "#2563eb"
//! match_highlight_fg = "#1f2937"
//! match_highlight_bg = "#fde68a"
//! empty_state_fg = "#2563eb"
//! error_fg = "#dc2626"
//! link_fg = "#1d4ed8"
//! tag_fg = "#047857"
//! ```

use crate::domain::error::{FindyError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#1f2937"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Highlighted dropdown row.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Secondary text: footer, meta lines, summary.
    pub text_dim: String,

    pub border: String,
    pub search_bar_border: String,

    /// Query matches inside titles, bodies and suggestions.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Validation and no-results messages.
    pub empty_state_fg: String,
    pub error_fg: String,
    pub link_fg: String,
    pub tag_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name (`light` or `dark`).
    ///
    /// # Example
    ///
    /// ```
    /// use findy::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("dark").unwrap();
    /// assert_eq!(theme.name, "dark");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "light" => include_str!("../../themes/light.toml"),
            "dark" => include_str!("../../themes/dark.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// The built-in theme for the given dark-mode preference.
    #[must_use]
    pub fn for_mode(dark_mode: bool) -> Self {
        let name = if dark_mode { "dark" } else { "light" };
        Self::from_name(name).unwrap_or_else(Self::monochrome)
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FindyError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| FindyError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| FindyError::Theme(format!("failed to parse {}: {e}", path.display())))
    }

    /// Grey-scale palette used if a built-in theme ever fails to parse.
    fn monochrome() -> Self {
        let c = |hex: &str| hex.to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: c("#ffffff"),
                header_bg: None,
                selection_fg: c("#000000"),
                selection_bg: c("#ffffff"),
                text_normal: c("#d0d0d0"),
                text_dim: c("#808080"),
                border: c("#606060"),
                search_bar_border: c("#ffffff"),
                match_highlight_fg: c("#000000"),
                match_highlight_bg: c("#d0d0d0"),
                empty_state_fg: c("#ffffff"),
                error_fg: c("#ffffff"),
                link_fg: c("#d0d0d0"),
                tag_fg: c("#a0a0a0"),
            },
        }
    }

    /// Converts a hex color to an RGB tuple; white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color escape (`\x1b[38;2;r;g;bm`).
    ///
    /// # Example
    ///
    /// ```
    /// use findy::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape (`\x1b[48;2;r;g;bm`).
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

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The light built-in theme.
    fn default() -> Self {
        Self::for_mode(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_themes_parse() {
        assert_eq!(Theme::for_mode(false).name, "light");
        assert_eq!(Theme::for_mode(true).name, "dark");
        assert_eq!(Theme::for_mode(true).colors.header_bg.as_deref(), Some("#111827"));
    }

    #[test]
    fn malformed_hex_falls_back_to_white() {
        assert_eq!(Theme::fg("#12"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::bg("zzzzzz"), "\u{1b}[48;2;255;255;255m");
    }

    #[test]
    fn theme_file_round_trips() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        let mut theme = Theme::default();
        theme.name = "custom".to_string();
        fs::write(&path, toml::to_string(&theme).unwrap()).unwrap();

        assert_eq!(Theme::from_file(&path).unwrap(), theme);
        assert!(matches!(
            Theme::from_file(dir.path().join("missing.toml")),
            Err(FindyError::Theme(_))
        ));
    }
}
