// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{opacity, palette, radius, sizing};
use crate::ui::theming::ColorScheme;
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Page background behind the filter bar and grid.
pub fn page(colors: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let surface = colors.surface;
    let text = colors.text_primary;
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(surface)),
        text_color: Some(text),
        ..Default::default()
    }
}

/// Count badge and empty-state card.
pub fn card(colors: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let card = colors.card;
    let text = colors.text_secondary;
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(card)),
        text_color: Some(text),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Tag and player chips in the lightbox.
pub fn chip(colors: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let chip = colors.chip;
    let text = colors.chip_text;
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(chip)),
        text_color: Some(text),
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Dimmed full-window backdrop of the lightbox.
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::BACKDROP,
            ..palette::BLACK
        })),
        text_color: Some(palette::WHITE),
        ..Default::default()
    }
}

/// Outline drawn around a focused pick list or text input.
pub fn focus_frame(colors: &ColorScheme, focused: bool) -> impl Fn(&Theme) -> container::Style {
    let ring = if focused {
        colors.focus_ring
    } else {
        Color::TRANSPARENT
    };
    move |_theme: &Theme| container::Style {
        border: Border {
            color: ring,
            width: sizing::FOCUS_RING,
            radius: radius::SM.into(),
        },
        ..Default::default()
    }
}
