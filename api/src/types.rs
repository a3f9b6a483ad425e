// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Server-assigned event identifier.
///
/// The id is stable for the lifetime of an event and is the only key used for
/// the event's cache entry and routes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new `EventId` from a string.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for EventId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// An event as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event id.
    pub id: EventId,
    /// Title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    /// Time of day, `HH:MM`.
    #[serde(default)]
    pub time: String,
    /// Location.
    #[serde(default)]
    pub location: String,
    /// Image path relative to the server root.
    #[serde(default)]
    pub image: String,
}

/// Uncommitted event fields, sent as `{ "event": draft }` when creating or updating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    /// Title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Date, `YYYY-MM-DD`.
    pub date: String,
    /// Time of day, `HH:MM`.
    pub time: String,
    /// Location.
    pub location: String,
    /// Image path, one of the selectable images.
    pub image: String,
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date.clone(),
            time: event.time.clone(),
            location: event.location.clone(),
            image: event.image.clone(),
        }
    }
}

/// An image the server offers for new events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Path relative to the server root.
    pub path: String,
    /// Human readable caption.
    #[serde(default)]
    pub caption: String,
}

/// Parameters for listing events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Full-text search term.
    pub search: Option<String>,
}

impl EventQuery {
    /// Query listing every event.
    #[must_use]
    pub const fn all() -> Self {
        Self { search: None }
    }

    /// Query searching for `term`.
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
        }
    }

    /// The search term, if one is set and not empty.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventsEnvelope {
    pub events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventEnvelope {
    pub event: Event,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImagesEnvelope {
    pub images: Vec<Image>,
}

#[derive(Debug, Serialize)]
pub(crate) struct DraftBody<'a> {
    pub event: &'a EventDraft,
}
