// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Routes native keyboard and touch events to the gallery session. Which
//! events are routed depends on whether the lightbox is open.

use super::Message;
use crate::application::gallery::GalleryKey;
use iced::keyboard::{self, key::Named, Key, Modifiers};
use iced::{event, touch, Event, Subscription};

/// Creates the event subscription for the current lightbox state.
///
/// - Lightbox open: every key press is routed (the overlay owns the
///   keyboard), plus touch start/end for swipe navigation.
/// - Lightbox closed: Tab is always routed so the focus ring keeps moving
///   even out of the search box; Enter/Space only when no widget consumed
///   them, so typing in the search box is left alone.
pub fn create_event_subscription(lightbox_open: bool) -> Subscription<Message> {
    if lightbox_open {
        event::listen_with(|event, _status, _window_id| match event {
            Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                Some(Message::Key(gallery_key(&key, modifiers)))
            }
            Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                Some(Message::TouchStarted(position.x))
            }
            Event::Touch(touch::Event::FingerLifted { position, .. }) => {
                Some(Message::TouchEnded(position.x))
            }
            _ => None,
        })
    } else {
        event::listen_with(|event, status, _window_id| {
            let Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) = event else {
                return None;
            };
            match gallery_key(&key, modifiers) {
                tab @ GalleryKey::Tab { .. } => Some(Message::Key(tab)),
                GalleryKey::Activate if status == event::Status::Ignored => {
                    Some(Message::Key(GalleryKey::Activate))
                }
                _ => None,
            }
        })
    }
}

/// Maps a physical key press to the keys the gallery understands.
#[must_use]
pub fn gallery_key(key: &Key, modifiers: Modifiers) -> GalleryKey {
    match key.as_ref() {
        Key::Named(Named::Tab) => GalleryKey::Tab {
            shift: modifiers.shift(),
        },
        Key::Named(Named::Escape) => GalleryKey::Escape,
        Key::Named(Named::ArrowLeft) => GalleryKey::ArrowLeft,
        Key::Named(Named::ArrowRight) => GalleryKey::ArrowRight,
        Key::Named(Named::Enter | Named::Space) => GalleryKey::Activate,
        _ => GalleryKey::Other,
    }
}
