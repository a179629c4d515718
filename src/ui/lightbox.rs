// SPDX-License-Identifier: MPL-2.0
//! Lightbox overlay.
//!
//! Rendered above the gallery inside an `opaque` layer, so the page behind
//! it can neither scroll nor receive clicks while the lightbox is open.
//! Releasing a click on the dimmed backdrop closes the lightbox; clicks on
//! the content panel are swallowed.

use crate::application::gallery::FocusTarget;
use crate::application::lightbox::{ImageStatus, Presentation, Stage};
use crate::i18n::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ColorScheme;
use fluent_bundle::FluentValue;
use iced::widget::{
    button, center, column, container, image, mouse_area, opaque, row, text, tooltip, Column, Row,
    Space,
};
use iced::{Alignment, ContentFit, Element, Length};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Close,
    Previous,
    Next,
    Download,
    BackdropReleased,
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub presentation: &'a Presentation,
    pub focused: Option<&'a FocusTarget>,
    /// Decoded image (or the placeholder) once the load finished.
    pub picture: Option<image::Handle>,
    /// Result line of the last download, if any.
    pub download_status: Option<&'a str>,
    pub colors: &'a ColorScheme,
}

/// "3 / 12", or nothing when the item is not in the Visible-Set.
#[must_use]
pub fn position_label(presentation: &Presentation, i18n: &I18n) -> Option<String> {
    let position = presentation.position?;
    Some(i18n.tr_with_args(
        "lightbox-position",
        &[
            ("position", FluentValue::from(position)),
            ("total", FluentValue::from(presentation.total)),
        ],
    ))
}

/// Caption, or the localized "Untitled".
#[must_use]
pub fn caption_label(presentation: &Presentation, i18n: &I18n) -> String {
    presentation
        .caption
        .clone()
        .unwrap_or_else(|| i18n.tr("lightbox-untitled"))
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let panel = container(
        column![header(&ctx), body(&ctx), details(&ctx)]
            .spacing(spacing::MD)
            .max_width(sizing::LIGHTBOX_MAX_WIDTH),
    )
    .padding(spacing::LG)
    .max_height(sizing::LIGHTBOX_MAX_HEIGHT);

    opaque(
        mouse_area(center(opaque(panel)).style(styles::container::backdrop))
            .on_release(Message::BackdropReleased),
    )
}

fn is_focused(ctx: &ViewContext<'_>, target: &FocusTarget) -> bool {
    ctx.focused == Some(target)
}

/// Glyph button with its localized name as tooltip.
fn control<'a>(
    ctx: &ViewContext<'a>,
    glyph: &'a str,
    name_key: &str,
    message: Message,
    target: &FocusTarget,
) -> Element<'a, Message> {
    let glyph_button = button(center(text(glyph).size(typography::TITLE_SM)))
        .width(sizing::LIGHTBOX_BUTTON)
        .height(sizing::LIGHTBOX_BUTTON)
        .on_press(message)
        .style(styles::button::lightbox_control(is_focused(ctx, target)));

    tooltip(
        glyph_button,
        container(text(ctx.i18n.tr(name_key)).size(typography::CAPTION))
            .padding([spacing::XXS, spacing::XS])
            .style(styles::container::chip(ctx.colors)),
        tooltip::Position::Bottom,
    )
    .gap(4)
    .into()
}

fn header<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let counter = position_label(ctx.presentation, ctx.i18n).unwrap_or_default();
    row![
        text(counter).size(typography::BODY),
        Space::new().width(Length::Fill),
        control(
            ctx,
            "✕",
            "lightbox-close",
            Message::Close,
            &FocusTarget::LightboxClose
        ),
    ]
    .align_y(Alignment::Center)
    .into()
}

fn body<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let stage: Element<'a, Message> = match &ctx.presentation.stage {
        Stage::Video { embed_url } => column![
            text(ctx.i18n.tr("lightbox-video-embed")).size(typography::TITLE_SM),
            text(embed_url.clone()).size(typography::CAPTION),
        ]
        .spacing(spacing::XS)
        .align_x(Alignment::Center)
        .into(),
        Stage::Image { status, alt, .. } => match (&ctx.picture, status) {
            (Some(handle), ImageStatus::Ready | ImageStatus::Fallback) => image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            // Alt text stands in for the picture until one can be shown
            (None, ImageStatus::Fallback) => {
                alt_text(ctx.i18n.tr("lightbox-image-failed"), alt)
            }
            _ => alt_text(ctx.i18n.tr("lightbox-loading-image"), alt),
        },
    };

    row![
        control(
            ctx,
            "‹",
            "lightbox-previous",
            Message::Previous,
            &FocusTarget::LightboxPrevious
        ),
        center(stage).width(Length::Fill).height(Length::Fill),
        control(
            ctx,
            "›",
            "lightbox-next",
            Message::Next,
            &FocusTarget::LightboxNext
        ),
    ]
    .spacing(spacing::MD)
    .align_y(Alignment::Center)
    .height(Length::Fill)
    .into()
}

fn alt_text<'a>(status: String, alt: &str) -> Element<'a, Message> {
    let mut lines = column![text(status)]
        .spacing(spacing::XS)
        .align_x(Alignment::Center);
    if !alt.is_empty() {
        lines = lines.push(text(alt.to_string()).size(typography::CAPTION));
    }
    lines.into()
}

fn chips<'a>(values: &[String], colors: &ColorScheme) -> Element<'a, Message> {
    Row::with_children(values.iter().map(|value| {
        container(text(value.clone()).size(typography::CAPTION))
            .padding([spacing::XXS, spacing::XS])
            .style(styles::container::chip(colors))
            .into()
    }))
    .spacing(spacing::XS)
    .wrap()
    .into()
}

fn details<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let presentation = ctx.presentation;
    let mut info = Column::new()
        .spacing(spacing::XS)
        .push(text(caption_label(presentation, ctx.i18n)).size(typography::TITLE_SM));

    if let Some(match_label) = &presentation.match_label {
        info = info.push(text(match_label.clone()).size(typography::BODY));
    }

    let mut meta = row![text(ctx.i18n.tr_with_args(
        "lightbox-season",
        &[("season", FluentValue::from(presentation.season.as_str()))],
    ))
    .size(typography::CAPTION)]
    .spacing(spacing::MD);
    if let Some(date) = &presentation.date {
        meta = meta.push(text(date.clone()).size(typography::CAPTION));
    }
    info = info.push(meta);

    if !presentation.tags.is_empty() {
        info = info.push(chips(&presentation.tags, ctx.colors));
    }
    if !presentation.players.is_empty() {
        info = info.push(chips(&presentation.players, ctx.colors));
    }

    let mut footer = row![info.width(Length::Fill)]
        .spacing(spacing::MD)
        .align_y(Alignment::End);

    if presentation.stage.download().is_some() {
        let focused = is_focused(ctx, &FocusTarget::LightboxDownload);
        let mut actions = column![button(text(ctx.i18n.tr("lightbox-download")))
            .on_press(Message::Download)
            .style(styles::button::primary(focused))]
        .spacing(spacing::XXS)
        .align_x(Alignment::End);
        if let Some(status) = ctx.download_status {
            actions = actions.push(text(status).size(typography::CAPTION));
        }
        footer = footer.push(actions);
    }

    footer.into()
}
