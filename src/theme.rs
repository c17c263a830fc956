//! Theme configuration and colors.
//!
//! Theme palettes are provided by the `ratatui-themes` crate; `ThemeColors`
//! derives the handful of styles the grid, overlay and forms need.

use ratatui::style::{Color, Modifier, Style};
use ratatui_themes::{ThemeName, ThemePalette};
use serde::{Deserialize, Serialize};

/// Theme wrapper around `ThemeName` from ratatui-themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme(pub ThemeName);

impl Theme {
    /// Get the next theme in rotation
    #[must_use]
    pub fn next(&self) -> Self {
        Self(self.0.next())
    }

    /// Get the display name for the theme.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0.display_name()
    }

    /// Get the color palette for this theme
    #[must_use]
    pub fn colors(&self) -> ThemeColors {
        ThemeColors::from_palette(self.0.palette())
    }
}

impl From<ThemeName> for Theme {
    fn from(name: ThemeName) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Color set used by the UI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Primary background color
    pub bg: Color,
    /// Background for bars and popups
    pub bg_secondary: Color,
    /// Placeholder block color
    pub skeleton: Color,
    /// Primary foreground/text color
    pub fg: Color,
    /// Muted text color
    pub fg_muted: Color,
    /// Primary accent color
    pub primary: Color,
    /// Secondary accent color
    pub secondary: Color,
    /// Success state color
    pub success: Color,
    /// Warning state color
    pub warning: Color,
    /// Error state color
    pub error: Color,
    /// Border color (unfocused)
    pub border: Color,
    /// Border color (focused)
    pub border_focus: Color,
}

impl ThemeColors {
    /// Create `ThemeColors` from a `ThemePalette`
    #[must_use]
    pub fn from_palette(p: ThemePalette) -> Self {
        Self {
            bg: p.bg,
            bg_secondary: Self::adjust_brightness(p.bg, 10),
            skeleton: Self::adjust_brightness(p.bg, 28),
            fg: p.fg,
            fg_muted: p.muted,
            primary: p.accent,
            secondary: p.secondary,
            success: p.success,
            warning: p.warning,
            error: p.error,
            border: p.muted,
            border_focus: p.accent,
        }
    }

    /// Lighten an RGB color; other colors are returned unchanged
    fn adjust_brightness(color: Color, amount: u8) -> Color {
        if let Color::Rgb(r, g, b) = color {
            Color::Rgb(
                r.saturating_add(amount),
                g.saturating_add(amount),
                b.saturating_add(amount),
            )
        } else {
            color
        }
    }

    /// Default text style
    #[must_use]
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Muted text style
    #[must_use]
    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.fg_muted)
    }

    /// Primary accent style
    #[must_use]
    pub fn text_primary(&self) -> Style {
        Style::default().fg(self.primary)
    }

    /// Card and overlay title style
    #[must_use]
    pub fn title(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    /// Success style
    #[must_use]
    pub fn text_success(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Warning style
    #[must_use]
    pub fn text_warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Error style
    #[must_use]
    pub fn text_error(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Block border style
    #[must_use]
    pub fn block(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Focused block border style
    #[must_use]
    pub fn block_focus(&self) -> Style {
        Style::default().fg(self.border_focus)
    }

    /// Skeleton placeholder style
    #[must_use]
    pub fn skeleton(&self) -> Style {
        Style::default().fg(self.skeleton)
    }

    /// Key hint style (for shortcuts)
    #[must_use]
    pub fn key_hint(&self) -> Style {
        Style::default()
            .fg(self.secondary)
            .add_modifier(Modifier::BOLD)
    }

    /// Logo style
    #[must_use]
    pub fn logo(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_is_a_border_color_not_a_background() {
        let palette = ThemeName::default().palette();
        let colors = ThemeColors::from_palette(palette);

        assert_eq!(colors.block_focus().fg, Some(palette.accent));
        assert_eq!(colors.block_focus().bg, None);
        assert_eq!(colors.block().fg, Some(palette.muted));
    }

    #[test]
    fn test_adjust_brightness() {
        assert_eq!(
            ThemeColors::adjust_brightness(Color::Rgb(10, 250, 0), 28),
            Color::Rgb(38, 255, 28)
        );
        assert_eq!(ThemeColors::adjust_brightness(Color::Blue, 28), Color::Blue);
    }

    #[test]
    fn test_next_cycles_away() {
        let theme = Theme::default();
        assert_ne!(theme.next(), theme);
    }
}
