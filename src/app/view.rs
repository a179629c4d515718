// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The gallery page is always rendered; the lightbox is stacked above it
//! while open.

use super::Message;
use crate::application::gallery::GallerySession;
use crate::application::lightbox::{ImageStatus, Stage};
use crate::i18n::I18n;
use crate::ui::theming::ColorScheme;
use crate::ui::{gallery, lightbox};
use iced::widget::{image, stack};
use iced::Element;
use std::collections::HashMap;

use crate::domain::media::MediaId;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub session: &'a GallerySession,
    pub thumbnails: &'a HashMap<MediaId, image::Handle>,
    pub picture: Option<&'a image::Handle>,
    pub download_status: Option<&'a str>,
    pub colors: &'a ColorScheme,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let page = gallery::view(gallery::ViewContext {
        i18n: ctx.i18n,
        session: ctx.session,
        thumbnails: ctx.thumbnails,
        colors: ctx.colors,
    })
    .map(Message::Gallery);

    let Some(presentation) = ctx.session.lightbox().presentation() else {
        return page;
    };

    // Only hand over a decoded picture once the load for this item settled
    let picture = match &presentation.stage {
        Stage::Image {
            status: ImageStatus::Ready | ImageStatus::Fallback,
            ..
        } => ctx.picture.cloned(),
        _ => None,
    };

    let overlay = lightbox::view(lightbox::ViewContext {
        i18n: ctx.i18n,
        presentation,
        focused: ctx.session.focused(),
        picture,
        download_status: ctx.download_status,
        colors: ctx.colors,
    })
    .map(Message::Lightbox);

    stack![page, overlay].into()
}
