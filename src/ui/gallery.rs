// SPDX-License-Identifier: MPL-2.0
//! Gallery page: filter bar, count badge and the thumbnail grid.
//!
//! The view is a pure function of the [`GallerySession`]; user input is
//! reported as [`Message`]s that the application turns into session calls.

use crate::application::gallery::{FilterKind, FocusTarget, GallerySession};
use crate::domain::media::{FilterDimension, MediaId, ALL};
use crate::i18n::I18n;
use crate::ui::design_tokens::{opacity, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ColorScheme;
use fluent_bundle::FluentValue;
use iced::widget::{
    button, center, column, container, image, pick_list, row, scrollable, stack, text,
    text_input, Id, Row,
};
use iced::{ContentFit, Element, Length};
use std::collections::HashMap;
use std::fmt;

/// Widget id of the search box, used to move real keyboard focus into it.
pub const SEARCH_INPUT_ID: &str = "gallery-search";

#[derive(Debug, Clone)]
pub enum Message {
    SearchChanged(String),
    ClearSearch,
    FilterSelected(FilterKind, FilterOption),
    ResetFilters,
    ThumbnailPressed(MediaId),
}

/// One dropdown entry: the raw filter value and its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl fmt::Display for FilterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Dropdown entries for `kind`, led by the localized "All" entry.
#[must_use]
pub fn filter_options(kind: FilterKind, session: &GallerySession, i18n: &I18n) -> Vec<FilterOption> {
    let all_key = match kind {
        FilterKind::Season => "filter-all-seasons",
        FilterKind::Tag => "filter-all-tags",
        FilterKind::Player => "filter-all-players",
    };
    let mut options = vec![FilterOption {
        value: ALL.to_string(),
        label: i18n.tr(all_key),
    }];

    match kind {
        FilterKind::Season => {
            options.extend(session.season_options().iter().map(|season| FilterOption {
                value: season.as_str().to_string(),
                label: i18n.tr_with_args(
                    "filter-season-option",
                    &[("season", FluentValue::from(season.as_str()))],
                ),
            }));
        }
        FilterKind::Tag | FilterKind::Player => {
            let values = if kind == FilterKind::Tag {
                session.tag_options()
            } else {
                session.player_options()
            };
            options.extend(values.iter().map(|value| FilterOption {
                value: value.clone(),
                label: value.clone(),
            }));
        }
    }
    options
}

/// Localized "N image(s)" label for the current Visible-Set.
#[must_use]
pub fn count_label(session: &GallerySession, i18n: &I18n) -> String {
    i18n.tr_with_args(
        "gallery-count",
        &[("count", FluentValue::from(session.filters().visible_count()))],
    )
}

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub session: &'a GallerySession,
    pub thumbnails: &'a HashMap<MediaId, image::Handle>,
    pub colors: &'a ColorScheme,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let content = column![filter_bar(&ctx), count_badge(&ctx), grid(&ctx)]
        .spacing(spacing::MD)
        .padding(spacing::LG);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::page(ctx.colors))
        .into()
}

fn is_focused(session: &GallerySession, target: &FocusTarget) -> bool {
    session.focused() == Some(target)
}

fn filter_bar<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let session = ctx.session;
    let query = session.filters().state().search_query.as_str();

    let search = container(
        text_input(&ctx.i18n.tr("filter-search-placeholder"), query)
            .id(Id::new(SEARCH_INPUT_ID))
            .on_input_maybe((!session.lightbox().is_open()).then_some(Message::SearchChanged))
            .padding(spacing::XS)
            .width(sizing::SEARCH_WIDTH),
    )
    .style(styles::container::focus_frame(
        ctx.colors,
        is_focused(session, &FocusTarget::Search),
    ));

    let mut bar = row![search].spacing(spacing::SM);

    if !query.is_empty() {
        bar = bar.push(
            button(text(ctx.i18n.tr("filter-clear-search")))
                .on_press(Message::ClearSearch)
                .style(styles::button::primary(is_focused(
                    session,
                    &FocusTarget::ClearSearch,
                ))),
        );
    }

    for kind in [FilterKind::Season, FilterKind::Tag, FilterKind::Player] {
        bar = bar.push(filter_pick_list(ctx, kind));
    }

    bar = bar.push(
        button(text(ctx.i18n.tr("filter-reset")))
            .on_press(Message::ResetFilters)
            .style(styles::button::primary(is_focused(
                session,
                &FocusTarget::ResetFilters,
            ))),
    );

    bar.wrap().into()
}

fn filter_pick_list<'a>(ctx: &ViewContext<'a>, kind: FilterKind) -> Element<'a, Message> {
    let options = filter_options(kind, ctx.session, ctx.i18n);
    let current = ctx.session.filters().state().get(FilterDimension::from(kind));
    let selected = options
        .iter()
        .find(|option| option.value == current.as_value())
        .cloned();

    container(
        pick_list(options, selected, move |option| {
            Message::FilterSelected(kind, option)
        })
        .width(sizing::PICK_LIST_WIDTH),
    )
    .style(styles::container::focus_frame(
        ctx.colors,
        is_focused(ctx.session, &FocusTarget::Filter(kind)),
    ))
    .into()
}

fn count_badge<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    container(text(count_label(ctx.session, ctx.i18n)).size(typography::CAPTION))
        .padding([spacing::XXS, spacing::XS])
        .style(styles::container::card(ctx.colors))
        .into()
}

fn grid<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let session = ctx.session;

    if session.catalog().is_empty() || session.filters().visible_count() == 0 {
        let key = if session.catalog().is_empty() {
            "gallery-empty-catalog"
        } else {
            "gallery-no-results"
        };
        return container(text(ctx.i18n.tr(key)).size(typography::TITLE_SM))
            .padding(spacing::XL)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .style(styles::container::card(ctx.colors))
            .into();
    }

    let alpha = if session.filters().is_fading() {
        opacity::FADED
    } else {
        opacity::OPAQUE
    };

    let cells = session
        .filters()
        .visible_set()
        .iter()
        .filter_map(|id| {
            let item = session.catalog().get(id)?;
            let handle = ctx.thumbnails.get(id)?;

            let picture = image(handle.clone())
                .width(sizing::THUMBNAIL_WIDTH)
                .height(sizing::THUMBNAIL_HEIGHT)
                .content_fit(ContentFit::Cover)
                .opacity(alpha);

            let face: Element<'a, Message> = if item.kind.is_video() {
                stack![picture, center(text("▶").size(typography::TITLE_LG))].into()
            } else {
                picture.into()
            };

            let focused = is_focused(session, &FocusTarget::Thumbnail(id.clone()));
            Some(
                button(face)
                    .padding(0)
                    .on_press(Message::ThumbnailPressed(id.clone()))
                    .style(styles::button::thumbnail(focused))
                    .into(),
            )
        });

    scrollable(
        Row::with_children(cells)
            .spacing(spacing::MD)
            .wrap(),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::gallery::GallerySettings;
    use crate::media::Catalog;
    use crate::app::config::Config;

    const CATALOG: &str = r#"{
        "seasons": {
            "2": { "images": [
                { "id": "s2_image_1", "full": "/static/a.webp", "alt": "a",
                  "tags": ["final"], "players": ["Zed", "Amy"] }
            ] },
            "1": { "images": [
                { "id": "s1_image_1", "full": "/static/b.webp", "alt": "b",
                  "tags": ["derby", "final"] }
            ] }
        }
    }"#;

    fn session() -> GallerySession {
        let catalog = Catalog::from_json_str(CATALOG).expect("valid catalog");
        GallerySession::new(catalog, GallerySettings::default())
    }

    fn i18n() -> I18n {
        I18n::new(Some("en-US".to_string()), &Config::default())
    }

    #[test]
    fn season_options_lead_with_all_and_follow_season_order() {
        let options = filter_options(FilterKind::Season, &session(), &i18n());
        let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["all", "1", "2"]);
        assert_eq!(options[0].label, "All Seasons");
        assert_eq!(options[1].label, "Season 1");
    }

    #[test]
    fn player_options_are_sorted_names() {
        let options = filter_options(FilterKind::Player, &session(), &i18n());
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["All Players", "Amy", "Zed"]);
    }

    #[test]
    fn count_label_reflects_visible_set() {
        let mut session = session();
        assert_eq!(count_label(&session, &i18n()), "2 images");

        let commands = session.set_filter(FilterDimension::Tag, "derby");
        let Some(crate::application::gallery::Command::ScheduleFade(ticket)) = commands.first()
        else {
            panic!("expected a fade to be scheduled");
        };
        session.fade_elapsed(ticket.generation);
        assert_eq!(count_label(&session, &i18n()), "1 image");
    }
}
