// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use eventful_api::{
    ApiError, CancellationToken, Event, EventDraft, EventId, EventQuery, EventsClient, Image,
};

/// Operations of the events backend as used by the views.
#[async_trait]
pub trait EventsApi: fmt::Debug + Send + Sync {
    /// Lists events, optionally filtered by a search term.
    async fn fetch_events(
        &self,
        query: &EventQuery,
        signal: &CancellationToken,
    ) -> Result<Vec<Event>, ApiError>;

    /// Gets a single event.
    async fn fetch_event(
        &self,
        id: &EventId,
        signal: &CancellationToken,
    ) -> Result<Event, ApiError>;

    /// Creates a new event.
    async fn create_new_event(&self, draft: &EventDraft) -> Result<Event, ApiError>;

    /// Replaces the fields of an event.
    async fn update_event(&self, id: &EventId, draft: &EventDraft) -> Result<Event, ApiError>;

    /// Deletes an event.
    async fn delete_event(&self, id: &EventId) -> Result<(), ApiError>;

    /// Lists the selectable images.
    async fn fetch_selectable_images(
        &self,
        signal: &CancellationToken,
    ) -> Result<Vec<Image>, ApiError>;

    /// Absolute URL of an image asset, if it can be built.
    fn asset_url(&self, path: &str) -> Option<String>;
}

/// Shared handle to an [`EventsApi`] implementation.
pub type SharedApi = Arc<dyn EventsApi>;

#[async_trait]
impl EventsApi for EventsClient {
    async fn fetch_events(
        &self,
        query: &EventQuery,
        signal: &CancellationToken,
    ) -> Result<Vec<Event>, ApiError> {
        Self::fetch_events(self, query, signal).await
    }

    async fn fetch_event(
        &self,
        id: &EventId,
        signal: &CancellationToken,
    ) -> Result<Event, ApiError> {
        Self::fetch_event(self, id, signal).await
    }

    async fn create_new_event(&self, draft: &EventDraft) -> Result<Event, ApiError> {
        Self::create_new_event(self, draft).await
    }

    async fn update_event(&self, id: &EventId, draft: &EventDraft) -> Result<Event, ApiError> {
        Self::update_event(self, id, draft).await
    }

    async fn delete_event(&self, id: &EventId) -> Result<(), ApiError> {
        Self::delete_event(self, id).await
    }

    async fn fetch_selectable_images(
        &self,
        signal: &CancellationToken,
    ) -> Result<Vec<Image>, ApiError> {
        Self::fetch_selectable_images(self, signal).await
    }

    fn asset_url(&self, path: &str) -> Option<String> {
        Self::asset_url(self, path).ok().map(String::from)
    }
}
