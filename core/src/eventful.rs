// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use eventful_api::{ApiError, EventId, EventsClient};

use crate::config::Config;
use crate::query::{QueryClient, QueryOptions};
use crate::source::SharedApi;
use crate::views::{EditEventView, EventDetailView, EventListView, NewEventView, SearchView};

/// The application root.
///
/// Owns the API client and the query cache, and binds views to them. Every
/// view created from the same root shares one cache.
#[derive(Debug, Clone)]
pub struct Eventful {
    api: SharedApi,
    client: QueryClient,
}

impl Eventful {
    /// Creates the root from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API client cannot be built, e.g. for an invalid base URL.
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let api = EventsClient::new(config.api_config())?;
        tracing::debug!(base_url = %api.config().base_url, "created events client");
        Ok(Self::with_api(Arc::new(api), config.query_options()))
    }

    /// Creates the root with a custom backend.
    #[must_use]
    pub fn with_api(api: SharedApi, options: QueryOptions) -> Self {
        Self {
            api,
            client: QueryClient::new(options),
        }
    }

    /// The backend.
    #[must_use]
    pub fn api(&self) -> &SharedApi {
        &self.api
    }

    /// The shared query cache.
    #[must_use]
    pub fn query_client(&self) -> &QueryClient {
        &self.client
    }

    #[must_use]
    pub fn list_view(&self) -> EventListView {
        EventListView::new(self.api.clone(), self.client.clone())
    }

    #[must_use]
    pub fn search_view(&self) -> SearchView {
        SearchView::new(self.api.clone(), self.client.clone())
    }

    #[must_use]
    pub fn detail_view(&self, id: EventId) -> EventDetailView {
        EventDetailView::new(self.api.clone(), self.client.clone(), id)
    }

    #[must_use]
    pub fn new_event_view(&self) -> NewEventView {
        NewEventView::new(self.api.clone(), self.client.clone())
    }

    #[must_use]
    pub fn edit_event_view(&self, id: EventId) -> EditEventView {
        EditEventView::new(self.api.clone(), self.client.clone(), id)
    }
}
