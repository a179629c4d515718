// SPDX-License-Identifier: MPL-2.0
//! Light/Dark/System theme selection.

use crate::ui::design_tokens::palette;
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};

/// Colors the gallery paints itself, on top of the Iced theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    pub surface: Color,
    pub card: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub chip: Color,
    pub chip_text: Color,
    pub focus_ring: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            surface: palette::GRAY_100,
            card: palette::WHITE,
            text_primary: palette::GRAY_900,
            text_secondary: palette::GRAY_700,
            chip: palette::NAVY_500,
            chip_text: palette::WHITE,
            focus_ring: palette::GOLD_500,
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            surface: palette::GRAY_900,
            card: Color::from_rgb(0.16, 0.16, 0.19),
            text_primary: palette::WHITE,
            text_secondary: palette::GRAY_200,
            chip: palette::NAVY_400,
            chip_text: palette::WHITE,
            focus_ring: palette::GOLD_400,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// For System mode, detects the actual system theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            // Default to dark on detection error
            ThemeMode::System => !matches!(dark_light::detect(), Ok(dark_light::Mode::Light)),
        }
    }

    /// The Iced theme for this mode.
    #[must_use]
    pub fn theme(self) -> Theme {
        if self.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    #[must_use]
    pub fn colors(self) -> ColorScheme {
        if self.is_dark() {
            ColorScheme::dark()
        } else {
            ColorScheme::light()
        }
    }
}
