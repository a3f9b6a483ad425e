// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use eventful_api::{Event, EventDraft, Image};

use crate::query::{Mutation, QueryClient, QueryError, QueryKey, QueryObserver};
use crate::router::Route;
use crate::source::SharedApi;
use crate::views::draft::{DraftError, validate};
use crate::views::leaf::{ErrorBlock, ImagePicker};
use crate::views::{Content, fetch_images, image_picker};

/// Shown instead of the form buttons while a write is in flight.
pub const SUBMITTING_TEXT: &str = "Submitting...";

/// Modal form creating a new event.
///
/// The draft itself lives in the form; the view validates it and runs the
/// create request.
#[derive(Debug)]
pub struct NewEventView {
    api: SharedApi,
    client: QueryClient,
    images: QueryObserver,
    create: Mutation<Event>,
}

impl NewEventView {
    pub(crate) fn new(api: SharedApi, client: QueryClient) -> Self {
        let images = client.observe(QueryKey::images());
        Self {
            api,
            client,
            images,
            create: Mutation::new(),
        }
    }

    /// Loads the selectable images.
    pub fn load_images(
        &self,
    ) -> impl Future<Output = Result<Arc<Vec<Image>>, QueryError>> + Send + 'static {
        fetch_images(&self.api, &self.client)
    }

    #[must_use]
    pub fn needs_load(&self) -> bool {
        self.images.needs_fetch()
    }

    /// Image options, with the image of `draft` preselected.
    #[must_use]
    pub fn image_picker(&self, draft: &EventDraft) -> Content<ImagePicker> {
        image_picker(&self.images, &draft.image)
    }

    /// Validates `draft` and returns the create request.
    ///
    /// The request resolves to the list route once the event was created and
    /// the events queries were invalidated, or to `None` if it failed.
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
        let mutation = self.create.clone();
        Ok(async move {
            match mutation.mutate(api.create_new_event(&draft)).await {
                Ok(event) => {
                    tracing::info!(id = %event.id, "event created");
                    client.invalidate_queries(&QueryKey::events());
                    Some(Route::Events)
                }
                Err(err) => {
                    tracing::warn!(%err, "failed to create event");
                    None
                }
            }
        })
    }

    /// Whether the create request is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.create.is_pending()
    }

    /// The event created by the last successful request.
    #[must_use]
    pub fn created(&self) -> Option<Arc<Event>> {
        self.create.state().data().cloned()
    }

    /// Error of the last failed create request.
    #[must_use]
    pub fn error(&self) -> Option<ErrorBlock> {
        self.create.state().error().map(|err| {
            ErrorBlock::from_api(
                "Failed to create event",
                err,
                "Failed to create event. Please check your inputs and try again",
            )
        })
    }
}
