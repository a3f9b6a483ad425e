// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use eventful_api::{Event, EventQuery};

use crate::query::{QueryClient, QueryError, QueryKey, QueryObserver};
use crate::source::SharedApi;
use crate::views::leaf::{EventItem, LOADING_TEXT};
use crate::views::{Content, content_of, fetch_events};

/// Shown until a search term is submitted.
pub const SEARCH_PROMPT: &str = "Please enter a search term and to find events.";

/// Search over events.
///
/// The read stays disabled until a non-empty term is submitted. Each term has
/// its own cache entry under `["events", {search: term}]`.
#[derive(Debug)]
pub struct SearchView {
    api: SharedApi,
    client: QueryClient,
    active: Option<(String, QueryObserver)>,
}

impl SearchView {
    pub(crate) fn new(api: SharedApi, client: QueryClient) -> Self {
        Self {
            api,
            client,
            active: None,
        }
    }

    /// Submits a search term. A blank term disables the search again.
    ///
    /// Returns whether the term changed.
    pub fn submit(&mut self, term: &str) -> bool {
        let term = term.trim();
        if self.term() == Some(term) || (term.is_empty() && self.active.is_none()) {
            return false;
        }

        if let Some((previous, _)) = self.active.take() {
            self.client.cancel_queries(&QueryKey::search(&previous));
        }
        if !term.is_empty() {
            let observer = self.client.observe(QueryKey::search(term));
            self.active = Some((term.to_string(), observer));
        }
        tracing::info!(term, "search submitted");
        true
    }

    /// The submitted term, if the search is enabled.
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        self.active.as_ref().map(|(term, _)| term.as_str())
    }

    /// Loads the results of the submitted term, `None` while disabled.
    pub fn load(
        &self,
    ) -> Option<impl Future<Output = Result<Arc<Vec<Event>>, QueryError>> + Send + 'static> {
        let term = self.term()?;
        Some(fetch_events(
            &self.api,
            &self.client,
            QueryKey::search(term),
            EventQuery::search(term),
        ))
    }

    /// Whether the enabled search was never loaded or has been invalidated.
    #[must_use]
    pub fn needs_load(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|(_, observer)| observer.needs_fetch())
    }

    /// The results of the submitted term.
    #[must_use]
    pub fn events(&self) -> Option<Arc<Vec<Event>>> {
        let (_, observer) = self.active.as_ref()?;
        observer.state::<Vec<Event>>().data().cloned()
    }

    #[must_use]
    pub fn content(&self) -> Content<Vec<EventItem>> {
        let Some((_, observer)) = &self.active else {
            return Content::Prompt(SEARCH_PROMPT);
        };
        content_of(
            observer.state::<Vec<Event>>(),
            LOADING_TEXT,
            "An error occurred",
            "Failed to fetch events",
            |events| {
                events
                    .iter()
                    .map(|e| EventItem::new(e, self.api.as_ref()))
                    .collect()
            },
        )
    }
}
