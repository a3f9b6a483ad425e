// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Events client for the REST backend.

use std::sync::Arc;

use reqwest::{Method, Url};
use tokio_util::sync::CancellationToken;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::HttpClient;
use crate::types::{
    DraftBody, Event, EventDraft, EventEnvelope, EventId, EventQuery, EventsEnvelope, Image,
    ImagesEnvelope,
};

/// Client for the events REST backend.
///
/// Every operation issues exactly one request. Reads take an abort signal and
/// resolve to [`ApiError::Aborted`] once it fires.
///
/// # Example
///
/// ```ignore
/// use eventful_api::{ApiConfig, CancellationToken, EventQuery, EventsClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = EventsClient::new(ApiConfig::default())?;
/// let signal = CancellationToken::new();
/// let events = client.fetch_events(&EventQuery::search("rust"), &signal).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EventsClient {
    http: Arc<HttpClient>,
    config: ApiConfig,
}

impl EventsClient {
    /// Creates a new events client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or HTTP client initialization fails.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = HttpClient::new(&config)?;
        Ok(Self {
            http: Arc::new(http),
            config,
        })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Lists events, optionally filtered by a search term.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, is aborted, or the server rejects it.
    pub async fn fetch_events(
        &self,
        query: &EventQuery,
        signal: &CancellationToken,
    ) -> Result<Vec<Event>, ApiError> {
        tracing::debug!(search = ?query.search_term(), "fetching events");
        let mut req = self
            .http
            .build_request(Method::GET, self.http.endpoint(&["events"])?);
        if let Some(term) = query.search_term() {
            req = req.query(&[("search", term)]);
        }

        let body: EventsEnvelope = self.http.send_json(req, Some(signal)).await?;
        Ok(body.events)
    }

    /// Gets a single event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event doesn't exist, the request fails or is aborted.
    pub async fn fetch_event(
        &self,
        id: &EventId,
        signal: &CancellationToken,
    ) -> Result<Event, ApiError> {
        tracing::debug!(%id, "fetching event");
        let url = self.http.endpoint(&["events", id.as_str()])?;
        let body: EventEnvelope = self
            .http
            .send_json(self.http.build_request(Method::GET, url), Some(signal))
            .await?;
        Ok(body.event)
    }

    /// Creates a new event from a draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the draft or the request fails.
    pub async fn create_new_event(&self, draft: &EventDraft) -> Result<Event, ApiError> {
        tracing::debug!(title = %draft.title, "creating event");
        let url = self.http.endpoint(&["events"])?;
        let req = self
            .http
            .build_request(Method::POST, url)
            .json(&DraftBody { event: draft });
        let body: EventEnvelope = self.http.send_json(req, None).await?;
        Ok(body.event)
    }

    /// Replaces the fields of an existing event.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the draft or the request fails.
    pub async fn update_event(&self, id: &EventId, draft: &EventDraft) -> Result<Event, ApiError> {
        tracing::debug!(%id, "updating event");
        let url = self.http.endpoint(&["events", id.as_str()])?;
        let req = self
            .http
            .build_request(Method::PUT, url)
            .json(&DraftBody { event: draft });
        let body: EventEnvelope = self.http.send_json(req, None).await?;
        Ok(body.event)
    }

    /// Deletes an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the deletion or the request fails.
    pub async fn delete_event(&self, id: &EventId) -> Result<(), ApiError> {
        tracing::debug!(%id, "deleting event");
        let url = self.http.endpoint(&["events", id.as_str()])?;
        self.http
            .send(self.http.build_request(Method::DELETE, url), None)
            .await
    }

    /// Lists the images selectable for an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, is aborted, or the server rejects it.
    pub async fn fetch_selectable_images(
        &self,
        signal: &CancellationToken,
    ) -> Result<Vec<Image>, ApiError> {
        tracing::debug!("fetching selectable images");
        let url = self.http.endpoint(&["events", "images"])?;
        let body: ImagesEnvelope = self
            .http
            .send_json(self.http.build_request(Method::GET, url), Some(signal))
            .await?;
        Ok(body.images)
    }

    /// Absolute URL of an image asset served by the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built.
    pub fn asset_url(&self, path: &str) -> Result<Url, ApiError> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.http.endpoint(&segments)
    }
}
