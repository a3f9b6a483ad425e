// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use eventful_api::{Event, EventQuery};

use crate::query::{QueryClient, QueryError, QueryKey, QueryObserver};
use crate::source::SharedApi;
use crate::views::leaf::{EventItem, LOADING_TEXT};
use crate::views::{Content, content_of, fetch_events};

/// The "recently added" list of all events.
#[derive(Debug)]
pub struct EventListView {
    api: SharedApi,
    client: QueryClient,
    events: QueryObserver,
}

impl EventListView {
    pub(crate) fn new(api: SharedApi, client: QueryClient) -> Self {
        let events = client.observe(QueryKey::events());
        Self {
            api,
            client,
            events,
        }
    }

    /// Loads the list into the cache.
    pub fn load(
        &self,
    ) -> impl Future<Output = Result<Arc<Vec<Event>>, QueryError>> + Send + 'static {
        fetch_events(&self.api, &self.client, QueryKey::events(), EventQuery::all())
    }

    /// Whether the list was never loaded or has been invalidated.
    #[must_use]
    pub fn needs_load(&self) -> bool {
        self.events.needs_fetch()
    }

    /// Whether a load is in flight.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.events.is_fetching()
    }

    /// The loaded events, in server order.
    #[must_use]
    pub fn events(&self) -> Option<Arc<Vec<Event>>> {
        self.events.state::<Vec<Event>>().data().cloned()
    }

    #[must_use]
    pub fn content(&self) -> Content<Vec<EventItem>> {
        content_of(
            self.events.state::<Vec<Event>>(),
            LOADING_TEXT,
            "An error occurred",
            "Failed to fetch events.",
            |events| {
                events
                    .iter()
                    .map(|e| EventItem::new(e, self.api.as_ref()))
                    .collect()
            },
        )
    }
}
