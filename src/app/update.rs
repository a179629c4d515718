// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! The gallery session decides *what* happens and answers with
//! [`Command`]s; this module turns those commands into Iced tasks (timers,
//! background decodes, file copies) and feeds their results back.

use super::{paths, Message};
use crate::application::gallery::{Command, FocusTarget, GallerySession};
use crate::application::lightbox::{Direction, Download, LoadRequest, LoadToken, FALLBACK_IMAGE};
use crate::application::timer::Ticket;
use crate::domain::media::FilterDimension;
use crate::error::Error;
use crate::i18n::I18n;
use crate::media::{load_image_async, AssetResolver, ImageData, ImagePrefetchCache};
use crate::ui::{gallery, lightbox};
use fluent_bundle::FluentValue;
use iced::widget::{image, Id};
use iced::Task;
use std::path::PathBuf;

/// Mutable view of the application state needed by the handlers.
pub struct UpdateContext<'a> {
    pub i18n: &'a I18n,
    pub session: &'a mut GallerySession,
    pub assets: &'a AssetResolver,
    pub prefetch: &'a mut ImagePrefetchCache,
    /// Decoded image of the lightbox item, once its load succeeded.
    pub picture: &'a mut Option<image::Handle>,
    pub download_status: &'a mut Option<String>,
}

pub fn update(ctx: &mut UpdateContext<'_>, message: Message) -> Task<Message> {
    let focused_before = ctx.session.focused().cloned();
    let was_open = ctx.session.lightbox().is_open();

    let task = match message {
        Message::Gallery(message) => handle_gallery_message(ctx, message),
        Message::Lightbox(message) => handle_lightbox_message(ctx, message),
        Message::Key(key) => {
            let commands = ctx.session.key_pressed(key);
            run_commands(ctx, commands)
        }
        Message::TouchStarted(x) => {
            ctx.session.touch_started(x);
            Task::none()
        }
        Message::TouchEnded(x) => {
            let commands = ctx.session.touch_ended(x);
            run_commands(ctx, commands)
        }
        Message::SearchDebounceElapsed(generation) => {
            let commands = ctx.session.search_debounce_elapsed(generation);
            run_commands(ctx, commands)
        }
        Message::FadeElapsed(generation) => {
            if let Some(outcome) = ctx.session.fade_elapsed(generation) {
                tracing::debug!(
                    visible = outcome.visible_count,
                    no_results = outcome.no_results(),
                    "grid refreshed"
                );
            }
            Task::none()
        }
        Message::FocusElapsed(generation) => {
            ctx.session.focus_elapsed(generation);
            Task::none()
        }
        Message::ImageLoaded { token, result } => handle_image_loaded(ctx, token, result),
        Message::ImagePrefetched { path, result } => {
            handle_image_prefetched(ctx, path, result);
            Task::none()
        }
        Message::DownloadFinished(result) => {
            handle_download_finished(ctx, result);
            Task::none()
        }
    };

    if was_open && !ctx.session.lightbox().is_open() {
        *ctx.picture = None;
        *ctx.download_status = None;
    }

    Task::batch([task, focus_task(focused_before.as_ref(), ctx.session.focused())])
}

/// Moves real keyboard focus into the search box when the gallery's focus
/// ring lands on it; every other target is drawn by the views.
fn focus_task(before: Option<&FocusTarget>, after: Option<&FocusTarget>) -> Task<Message> {
    if after == Some(&FocusTarget::Search) && before != after {
        iced::widget::operation::focus(Id::new(gallery::SEARCH_INPUT_ID))
    } else {
        Task::none()
    }
}

fn handle_gallery_message(ctx: &mut UpdateContext<'_>, message: gallery::Message) -> Task<Message> {
    let commands = match message {
        gallery::Message::SearchChanged(query) => {
            ctx.session.focus(FocusTarget::Search);
            ctx.session.set_search_query(&query)
        }
        gallery::Message::ClearSearch => {
            ctx.session.focus(FocusTarget::ClearSearch);
            ctx.session.clear_search()
        }
        gallery::Message::FilterSelected(kind, option) => {
            ctx.session.focus(FocusTarget::Filter(kind));
            ctx.session
                .set_filter(FilterDimension::from(kind), &option.value)
        }
        gallery::Message::ResetFilters => {
            ctx.session.focus(FocusTarget::ResetFilters);
            ctx.session.reset_filters()
        }
        gallery::Message::ThumbnailPressed(id) => ctx.session.open_thumbnail(&id),
    };
    run_commands(ctx, commands)
}

fn handle_lightbox_message(ctx: &mut UpdateContext<'_>, message: lightbox::Message) -> Task<Message> {
    let commands = match message {
        lightbox::Message::Close => ctx.session.close(),
        lightbox::Message::BackdropReleased => ctx.session.backdrop_clicked(),
        lightbox::Message::Previous => ctx.session.navigate(Direction::Previous),
        lightbox::Message::Next => ctx.session.navigate(Direction::Next),
        lightbox::Message::Download => ctx.session.download().into_iter().collect(),
    };
    run_commands(ctx, commands)
}

/// Turns session commands into a batch of Iced tasks.
pub fn run_commands(ctx: &mut UpdateContext<'_>, commands: Vec<Command>) -> Task<Message> {
    let tasks: Vec<Task<Message>> = commands
        .into_iter()
        .map(|command| match command {
            Command::ScheduleSearch(ticket) => sleep(ticket, Message::SearchDebounceElapsed),
            Command::ScheduleFade(ticket) => sleep(ticket, Message::FadeElapsed),
            Command::ScheduleFocus(ticket) => sleep(ticket, Message::FocusElapsed),
            Command::LoadImage(request) => load_lightbox_image(ctx, request),
            Command::Preload(addresses) => preload(ctx, &addresses),
            Command::Download(download) => start_download(ctx.assets, download),
        })
        .collect();
    Task::batch(tasks)
}

fn sleep(ticket: Ticket, on_elapsed: fn(u64) -> Message) -> Task<Message> {
    let Ticket { generation, delay } = ticket;
    // The timer is created inside the future so building the task needs no runtime
    Task::perform(
        async move { tokio::time::sleep(delay).await },
        move |()| on_elapsed(generation),
    )
}

fn load_lightbox_image(ctx: &mut UpdateContext<'_>, request: LoadRequest) -> Task<Message> {
    *ctx.picture = None;
    *ctx.download_status = None;
    let LoadRequest { token, id, url } = request;

    let Some(path) = ctx.assets.resolve(&url) else {
        tracing::warn!(%id, url, "image is not available locally");
        return Task::done(Message::ImageLoaded {
            token,
            result: Err(Error::Image(format!("Asset '{url}' is not available locally"))),
        });
    };

    if let Some(data) = ctx.prefetch.get(&path) {
        tracing::debug!(%id, "lightbox image served from prefetch cache");
        return Task::done(Message::ImageLoaded {
            token,
            result: Ok(data),
        });
    }

    Task::perform(load_image_async(path), move |(_, result)| Message::ImageLoaded {
        token,
        result,
    })
}

fn preload(ctx: &UpdateContext<'_>, addresses: &[String]) -> Task<Message> {
    let paths: Vec<PathBuf> = addresses
        .iter()
        .filter_map(|address| ctx.assets.resolve(address))
        .collect();
    let tasks: Vec<Task<Message>> = ctx
        .prefetch
        .paths_to_prefetch(&paths)
        .into_iter()
        .map(|path| {
            Task::perform(load_image_async(path), |(path, result)| {
                Message::ImagePrefetched { path, result }
            })
        })
        .collect();
    Task::batch(tasks)
}

fn start_download(assets: &AssetResolver, download: Download) -> Task<Message> {
    let Some(directory) = paths::get_download_dir() else {
        return Task::done(Message::DownloadFinished(Err(Error::Io(
            "No download directory available".to_string(),
        ))));
    };
    let assets = assets.clone();
    let Download { href, filename } = download;

    Task::perform(
        async move {
            tokio::task::spawn_blocking(move || assets.save_copy(&href, &directory, &filename))
                .await
                .unwrap_or_else(|e| Err(Error::Io(format!("Download task failed: {e}"))))
        },
        Message::DownloadFinished,
    )
}

pub fn handle_image_loaded(
    ctx: &mut UpdateContext<'_>,
    token: LoadToken,
    result: Result<ImageData, Error>,
) -> Task<Message> {
    match result {
        Ok(data) => {
            if ctx.session.image_loaded(token, true) {
                *ctx.picture = Some(data.handle);
            }
        }
        Err(err) => {
            if ctx.session.image_loaded(token, false) {
                tracing::debug!("lightbox image error: {err}");
                *ctx.picture = fallback_picture(ctx.assets);
            }
        }
    }
    Task::none()
}

/// Placeholder shown after a failed load, when the logo exists locally.
fn fallback_picture(assets: &AssetResolver) -> Option<image::Handle> {
    assets
        .resolve(FALLBACK_IMAGE)
        .filter(|path| path.exists())
        .map(image::Handle::from_path)
}

fn handle_image_prefetched(ctx: &mut UpdateContext<'_>, path: PathBuf, result: Result<ImageData, Error>) {
    match result {
        Ok(data) => {
            if !ctx.prefetch.insert(path.clone(), data) {
                tracing::debug!(path = %path.display(), "prefetched image not cached");
            }
        }
        Err(err) => tracing::debug!(path = %path.display(), "prefetch failed: {err}"),
    }
}

fn handle_download_finished(ctx: &mut UpdateContext<'_>, result: Result<PathBuf, Error>) {
    let status = match result {
        Ok(path) => ctx.i18n.tr_with_args(
            "notification-download-success",
            &[("path", FluentValue::from(path.display().to_string()))],
        ),
        Err(err) => {
            tracing::warn!("download failed: {err}");
            ctx.i18n.tr("notification-download-error")
        }
    };
    *ctx.download_status = Some(status);
}
