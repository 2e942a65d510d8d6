//! Theme provider
//!
//! Holds the active color scheme and the palette each screen renders with.
//! The scheme is shared read-mostly behind [`ThemeContext`] and only changes
//! through [`ThemeContext::toggle`] or [`ThemeContext::set`].

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// Light or dark appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Light => &Palette::LIGHT,
            Self::Dark => &Palette::DARK,
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for ColorScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(anyhow!("Invalid color scheme: {}", s)),
        }
    }
}

/// Named colors for one scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub tint: &'static str,
    /// Accent used for headings and selected chips
    pub tint1: &'static str,
    /// Accent used for secondary buttons
    pub tint2: &'static str,
    pub border_left_width: u8,
    pub card: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: "#F7F9FC",
        text: "#333333",
        tint: "#15803d",
        tint1: "#15803d",
        tint2: "#FFFFFF",
        border_left_width: 0,
        card: "#FFFFFF",
    };

    pub const DARK: Palette = Palette {
        background: "#212121",
        text: "#F0F0F0",
        tint: "#15803d",
        tint1: "#FFFFFF",
        tint2: "#15803d",
        border_left_width: 5,
        card: "rgba(255, 255, 255, 0.08)",
    };

    /// Wrap `text` in a 24-bit ANSI foreground escape for `color`.
    ///
    /// Colors that are not `#RRGGBB` leave the text unchanged.
    pub fn paint(color: &str, text: &str) -> String {
        match parse_hex(color) {
            Some((r, g, b)) => format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text),
            None => text.to_string(),
        }
    }

    /// Heading in the scheme's primary accent
    pub fn heading(&self, text: &str) -> String {
        Self::paint(self.tint1, text)
    }

    /// Card rule, indented by the left border width in dark mode
    pub fn card_prefix(&self) -> String {
        if self.border_left_width == 0 {
            String::new()
        } else {
            Self::paint(self.tint, "┃") + " "
        }
    }
}

/// Parse `#RRGGBB` (or `#RGB`) into its components
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let expand = |c: &str| channel(&c.repeat(2));
            Some((expand(&hex[0..1])?, expand(&hex[1..2])?, expand(&hex[2..3])?))
        }
        _ => None,
    }
}

/// Shared handle to the active scheme
#[derive(Debug, Clone, Default)]
pub struct ThemeContext {
    scheme: Arc<RwLock<ColorScheme>>,
}

impl ThemeContext {
    pub fn new(scheme: ColorScheme) -> Self {
        Self {
            scheme: Arc::new(RwLock::new(scheme)),
        }
    }

    pub fn scheme(&self) -> ColorScheme {
        match self.scheme.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn palette(&self) -> &'static Palette {
        self.scheme().palette()
    }

    pub fn set(&self, scheme: ColorScheme) {
        let mut guard = match self.scheme.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = scheme;
        tracing::debug!("Color scheme set to {}", scheme);
    }

    /// Switch between light and dark, returning the new scheme
    pub fn toggle(&self) -> ColorScheme {
        let mut guard = match self.scheme.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = guard.toggle();
        tracing::debug!("Color scheme toggled to {}", *guard);
        *guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_parse_and_display() {
        assert_eq!("Dark".parse::<ColorScheme>().unwrap(), ColorScheme::Dark);
        assert_eq!(" light ".parse::<ColorScheme>().unwrap(), ColorScheme::Light);
        assert!("sepia".parse::<ColorScheme>().is_err());
        assert_eq!(ColorScheme::Dark.to_string(), "dark");
    }

    #[test]
    fn test_palettes() {
        assert_eq!(ColorScheme::Light.palette().background, "#F7F9FC");
        assert_eq!(ColorScheme::Dark.palette().text, "#F0F0F0");
        assert_eq!(Palette::DARK.border_left_width, 5);
        assert_eq!(Palette::LIGHT.tint, Palette::DARK.tint);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#15803d"), Some((0x15, 0x80, 0x3d)));
        assert_eq!(parse_hex("#FFF"), Some((255, 255, 255)));
        assert_eq!(parse_hex("rgba(255, 255, 255, 0.08)"), None);
        assert_eq!(parse_hex("#12345"), None);
    }

    #[test]
    fn test_paint() {
        assert_eq!(Palette::paint("#000000", "x"), "\x1b[38;2;0;0;0mx\x1b[0m");
        assert_eq!(Palette::paint("transparent", "x"), "x");
        assert_eq!(Palette::LIGHT.card_prefix(), "");
        assert!(Palette::DARK.card_prefix().ends_with("┃\x1b[0m "));
    }

    #[test]
    fn test_context_is_shared() {
        let theme = ThemeContext::new(ColorScheme::Light);
        let other = theme.clone();

        assert_eq!(other.toggle(), ColorScheme::Dark);
        assert_eq!(theme.scheme(), ColorScheme::Dark);
        assert_eq!(theme.palette(), &Palette::DARK);

        theme.set(ColorScheme::Light);
        assert_eq!(other.scheme(), ColorScheme::Light);
    }
}
