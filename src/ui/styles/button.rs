// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.
//!
//! Every style takes a `focused` flag: keyboard focus is tracked by the
//! gallery session, so the ring is drawn here rather than by the widget.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, WHITE},
    radius, shadow, sizing,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

fn focus_border(focused: bool, rad: f32) -> Border {
    if focused {
        Border {
            color: palette::GOLD_500,
            width: sizing::FOCUS_RING,
            radius: rad.into(),
        }
    } else {
        Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: rad.into(),
        }
    }
}

/// Filter bar actions (clear search, reset filters).
pub fn primary(focused: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let background = match status {
            button::Status::Hovered => palette::NAVY_400,
            button::Status::Pressed => palette::NAVY_600,
            button::Status::Disabled => palette::GRAY_400,
            button::Status::Active => palette::NAVY_500,
        };
        button::Style {
            background: Some(Background::Color(background)),
            text_color: WHITE,
            border: focus_border(focused, radius::SM),
            shadow: shadow::SM,
            snap: true,
        }
    }
}

/// Grid cell wrapping a thumbnail.
pub fn thumbnail(focused: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| button::Style {
        background: None,
        text_color: WHITE,
        border: focus_border(focused, radius::MD),
        shadow: match status {
            button::Status::Hovered => shadow::LG,
            _ => shadow::NONE,
        },
        snap: true,
    }
}

/// Close, previous, next and download controls on the dark backdrop.
pub fn lightbox_control(focused: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let alpha = match status {
            button::Status::Hovered => opacity::OVERLAY_MEDIUM,
            button::Status::Pressed => opacity::BACKDROP,
            _ => opacity::OVERLAY_SUBTLE,
        };
        button::Style {
            background: Some(Background::Color(Color { a: alpha, ..WHITE })),
            text_color: WHITE,
            border: focus_border(focused, radius::FULL),
            shadow: shadow::SM,
            snap: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focused_buttons_draw_a_ring() {
        let style = primary(true)(&Theme::Dark, button::Status::Active);
        assert_eq!(style.border.width, sizing::FOCUS_RING);
        let style = primary(false)(&Theme::Dark, button::Status::Active);
        assert_eq!(style.border.width, 0.0);
    }

    #[test]
    fn thumbnail_lifts_on_hover() {
        let hovered = thumbnail(false)(&Theme::Light, button::Status::Hovered);
        assert!(hovered.shadow.blur_radius > 0.0);
    }
}
