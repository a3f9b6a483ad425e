// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use eventful_api::{Event, EventId};

use crate::datetime::{human_datetime, iso_datetime};
use crate::query::{Mutation, MutationState, QueryClient, QueryError, QueryKey, QueryObserver};
use crate::router::Route;
use crate::source::{EventsApi, SharedApi};
use crate::views::leaf::{ErrorBlock, image_url};
use crate::views::{Content, content_of};

const LOADING_DETAILS: &str = "Fetching event details...";

/// Everything the detail page shows about an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub location: String,
    /// `May 12, 2025 @ 14:00`, or the raw date and time.
    pub when: String,
    /// `2025-05-12T14:00`, if date and time parse.
    pub datetime: Option<String>,
    pub image_url: Option<String>,
}

impl EventDetails {
    #[must_use]
    pub fn new(event: &Event, api: &dyn EventsApi) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            when: human_datetime(&event.date, &event.time),
            datetime: iso_datetime(&event.date, &event.time),
            image_url: image_url(api, &event.image),
        }
    }
}

/// Detail page of one event, with deletion.
#[derive(Debug)]
pub struct EventDetailView {
    api: SharedApi,
    client: QueryClient,
    id: EventId,
    event: QueryObserver,
    delete: Mutation<()>,
}

impl EventDetailView {
    pub(crate) fn new(api: SharedApi, client: QueryClient, id: EventId) -> Self {
        let event = client.observe(QueryKey::event(&id));
        Self {
            api,
            client,
            id,
            event,
            delete: Mutation::new(),
        }
    }

    /// The id from the route.
    #[must_use]
    pub fn id(&self) -> &EventId {
        &self.id
    }

    /// Loads the event into the cache.
    pub fn load(&self) -> impl Future<Output = Result<Arc<Event>, QueryError>> + Send + 'static {
        let api = self.api.clone();
        let client = self.client.clone();
        let id = self.id.clone();
        async move {
            client
                .fetch_query(QueryKey::event(&id), move |signal| async move {
                    api.fetch_event(&id, &signal).await
                })
                .await
        }
    }

    /// Whether the event should be (re)loaded. Never after it was deleted.
    #[must_use]
    pub fn needs_load(&self) -> bool {
        !matches!(self.delete.state(), MutationState::Success(_)) && self.event.needs_fetch()
    }

    /// The loaded event.
    #[must_use]
    pub fn event(&self) -> Option<Arc<Event>> {
        self.event.state::<Event>().data().cloned()
    }

    #[must_use]
    pub fn content(&self) -> Content<EventDetails> {
        content_of(
            self.event.state::<Event>(),
            LOADING_DETAILS,
            "Failed to load event",
            "Failed to fetch event data, please try again",
            |event| EventDetails::new(event, self.api.as_ref()),
        )
    }

    /// Deletes the event, then invalidates every events query.
    ///
    /// Resolves to the list route on success and to `None` on failure, which
    /// is then reported by [`delete_error`](Self::delete_error).
    pub fn delete(&self) -> impl Future<Output = Option<Route>> + Send + 'static {
        let api = self.api.clone();
        let client = self.client.clone();
        let mutation = self.delete.clone();
        let id = self.id.clone();
        async move {
            match mutation.mutate(api.delete_event(&id)).await {
                Ok(_) => {
                    tracing::info!(%id, "event deleted");
                    client.invalidate_queries(&QueryKey::events());
                    Some(Route::Events)
                }
                Err(err) => {
                    tracing::warn!(%id, %err, "failed to delete event");
                    None
                }
            }
        }
    }

    /// Whether the deletion is in flight.
    #[must_use]
    pub fn is_deleting(&self) -> bool {
        self.delete.is_pending()
    }

    /// Error of the last failed deletion.
    #[must_use]
    pub fn delete_error(&self) -> Option<ErrorBlock> {
        self.delete.state().error().map(|err| {
            ErrorBlock::from_api(
                "Failed to delete event",
                err,
                "Failed to delete event, please try again later",
            )
        })
    }
}
