// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use eventful_api::{Event, EventDraft, EventId, Image};

use crate::query::{Mutation, QueryClient, QueryError, QueryKey, QueryObserver};
use crate::router::Route;
use crate::source::SharedApi;
use crate::views::draft::{DraftError, validate};
use crate::views::leaf::{ErrorBlock, ImagePicker, LOADING_TEXT};
use crate::views::{Content, content_of, fetch_images, image_picker};

/// Modal form editing an existing event.
#[derive(Debug)]
pub struct EditEventView {
    api: SharedApi,
    client: QueryClient,
    id: EventId,
    event: QueryObserver,
    images: QueryObserver,
    update: Mutation<Event>,
}

impl EditEventView {
    pub(crate) fn new(api: SharedApi, client: QueryClient, id: EventId) -> Self {
        let event = client.observe(QueryKey::event(&id));
        let images = client.observe(QueryKey::images());
        Self {
            api,
            client,
            id,
            event,
            images,
            update: Mutation::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &EventId {
        &self.id
    }

    /// Loads the event being edited.
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

    /// Loads the selectable images.
    pub fn load_images(
        &self,
    ) -> impl Future<Output = Result<Arc<Vec<Image>>, QueryError>> + Send + 'static {
        fetch_images(&self.api, &self.client)
    }

    /// Whether the event should be loaded. Invalidation after the form was
    /// prefilled does not count.
    #[must_use]
    pub fn needs_load(&self) -> bool {
        self.event.state::<Event>().data().is_none() && self.event.needs_fetch()
    }

    #[must_use]
    pub fn needs_images(&self) -> bool {
        self.images.needs_fetch()
    }

    /// The draft to prefill the form with.
    #[must_use]
    pub fn content(&self) -> Content<EventDraft> {
        content_of(
            self.event.state::<Event>(),
            LOADING_TEXT,
            "Failed to load event",
            "Failed to load event. Please check your inputs and try again later.",
            |event| EventDraft::from(event),
        )
    }

    /// Image options, with the image of `draft` preselected.
    #[must_use]
    pub fn image_picker(&self, draft: &EventDraft) -> Content<ImagePicker> {
        image_picker(&self.images, &draft.image)
    }

    /// Validates `draft` and returns the update request.
    ///
    /// On success the events queries are invalidated, the fresh event is stored
    /// under its key and the request resolves to the detail route.
    ///
    /// # Errors
    ///
    /// Returns the validation error without issuing a request.
    pub fn submit(
        &self,
        draft: EventDraft,
    ) -> Result<impl Future<Output = Option<Route>> + Send + 'static, DraftError> {
        validate(&draft)?;
        let api = self.api.clone();
        let client = self.client.clone();
        let mutation = self.update.clone();
        let id = self.id.clone();
        Ok(async move {
            match mutation.mutate(api.update_event(&id, &draft)).await {
                Ok(event) => {
                    tracing::info!(%id, "event updated");
                    // invalidate first, the stored event must stay fresh
                    client.invalidate_queries(&QueryKey::events());
                    client.set_query_data(QueryKey::event(&id), Event::clone(&event));
                    Some(Route::EventDetail(id))
                }
                Err(err) => {
                    tracing::warn!(%id, %err, "failed to update event");
                    None
                }
            }
        })
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.update.is_pending()
    }

    /// The event returned by the last successful update.
    #[must_use]
    pub fn updated(&self) -> Option<Arc<Event>> {
        self.update.state().data().cloned()
    }

    /// Error of the last failed update.
    #[must_use]
    pub fn error(&self) -> Option<ErrorBlock> {
        self.update.state().error().map(|err| {
            ErrorBlock::from_api(
                "Failed to update event",
                err,
                "Failed to update event. Please check your inputs and try again",
            )
        })
    }
}
