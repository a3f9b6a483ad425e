// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! View state machines.
//!
//! A view owns the subscriptions of its reads and the state of its writes.
//! Loads and writes are handed out as `'static` futures, so the caller decides
//! whether to await or spawn them. Write futures resolve to the route to
//! navigate to once the write succeeded and the cache has been invalidated.

mod detail;
mod draft;
mod edit_event;
mod leaf;
mod list;
mod new_event;
mod search;

use std::sync::Arc;

use eventful_api::{EventQuery, Image};

use crate::query::{QueryClient, QueryError, QueryKey, QueryObserver, QueryState};
use crate::source::SharedApi;

pub use crate::views::detail::{EventDetailView, EventDetails};
pub use crate::views::draft::{DraftError, validate};
pub use crate::views::edit_event::EditEventView;
pub use crate::views::leaf::{ErrorBlock, EventItem, ImagePicker, LOADING_TEXT};
pub use crate::views::list::EventListView;
pub use crate::views::new_event::{NewEventView, SUBMITTING_TEXT};
pub use crate::views::search::{SEARCH_PROMPT, SearchView};

/// What a view shows for one of its reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content<T> {
    /// The read is disabled, the text asks for input.
    Prompt(&'static str),
    /// Waiting for the first result.
    Loading(&'static str),
    /// The read failed.
    Error(ErrorBlock),
    /// The result.
    Ready(T),
}

impl<T> Content<T> {
    /// The result, if ready.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    /// The error block, if the read failed.
    pub fn error(&self) -> Option<&ErrorBlock> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Maps a read state to content, with the view's error wording.
fn content_of<T, U>(
    state: QueryState<T>,
    loading: &'static str,
    error_title: &str,
    error_fallback: &str,
    ready: impl FnOnce(&T) -> U,
) -> Content<U> {
    match state {
        QueryState::Idle | QueryState::Pending => Content::Loading(loading),
        QueryState::Error(err) => {
            Content::Error(ErrorBlock::from_api(error_title, &err, error_fallback))
        }
        QueryState::Ready(value) => Content::Ready(ready(&value)),
    }
}

fn fetch_events(
    api: &SharedApi,
    client: &QueryClient,
    key: QueryKey,
    query: EventQuery,
) -> impl Future<Output = Result<Arc<Vec<eventful_api::Event>>, QueryError>> + Send + 'static {
    let api = api.clone();
    let client = client.clone();
    async move {
        client
            .fetch_query(key, move |signal| async move {
                api.fetch_events(&query, &signal).await
            })
            .await
    }
}

fn fetch_images(
    api: &SharedApi,
    client: &QueryClient,
) -> impl Future<Output = Result<Arc<Vec<Image>>, QueryError>> + Send + 'static {
    let api = api.clone();
    let client = client.clone();
    async move {
        client
            .fetch_query(QueryKey::images(), move |signal| async move {
                api.fetch_selectable_images(&signal).await
            })
            .await
    }
}

/// Image options of an event form, with `selected` preselected.
fn image_picker(images: &QueryObserver, selected: &str) -> Content<ImagePicker> {
    content_of(
        images.state::<Vec<Image>>(),
        LOADING_TEXT,
        "Failed to load selectable images",
        "Please try again later.",
        |options| ImagePicker::new(options.clone(), selected),
    )
}
