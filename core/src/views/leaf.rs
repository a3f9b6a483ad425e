// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use eventful_api::{ApiError, Event, EventId, Image};

use crate::datetime::human_date;
use crate::source::EventsApi;

/// Text of the generic loading indicator.
pub const LOADING_TEXT: &str = "Loading...";

/// A titled error message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{title}: {message}")]
pub struct ErrorBlock {
    /// Fixed title chosen by the view.
    pub title: String,
    /// The server message, or the view's fallback.
    pub message: String,
}

impl ErrorBlock {
    /// Creates an error block.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Uses the server message of `err` if it has one, else `fallback`.
    #[must_use]
    pub fn from_api(title: &str, err: &ApiError, fallback: &str) -> Self {
        Self::new(title, err.message().unwrap_or(fallback))
    }
}

/// One event in a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    pub id: EventId,
    pub title: String,
    /// Human readable date, e.g. `May 12, 2025`.
    pub date: String,
    pub location: String,
    pub image_url: Option<String>,
}

impl EventItem {
    #[must_use]
    pub fn new(event: &Event, api: &dyn EventsApi) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            date: human_date(&event.date),
            location: event.location.clone(),
            image_url: image_url(api, &event.image),
        }
    }
}

pub(crate) fn image_url(api: &dyn EventsApi, path: &str) -> Option<String> {
    if path.is_empty() {
        None
    } else {
        api.asset_url(path)
    }
}

/// Selectable images with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePicker {
    options: Vec<Image>,
    selected: Option<usize>,
}

impl ImagePicker {
    /// Creates a picker with `selected_path` preselected, if it is one of the options.
    #[must_use]
    pub fn new(options: Vec<Image>, selected_path: &str) -> Self {
        let selected = options.iter().position(|img| img.path == selected_path);
        Self { options, selected }
    }

    #[must_use]
    pub fn options(&self) -> &[Image] {
        &self.options
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Path of the selected image.
    #[must_use]
    pub fn selected_path(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(|img| img.path.as_str())
    }

    /// Selects the next option, wrapping around.
    pub fn select_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1) % self.options.len(),
            None => 0,
        });
    }

    /// Selects the previous option, wrapping around.
    pub fn select_prev(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len();
        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn images() -> Vec<Image> {
        ["a", "b", "c"]
            .into_iter()
            .map(|p| Image {
                path: format!("images/{p}.jpg"),
                caption: p.to_uppercase(),
            })
            .collect()
    }

    #[test]
    fn error_block_prefers_server_message() {
        let err = ApiError::Status {
            code: 404,
            info: Some(serde_json::json!({ "message": "not found" })),
        };
        let block = ErrorBlock::from_api("Failed to load event", &err, "fallback");
        assert_eq!(block.message, "not found");
        assert_eq!(block.to_string(), "Failed to load event: not found");

        let block = ErrorBlock::from_api("t", &ApiError::Transport("down".into()), "fallback");
        assert_eq!(block.message, "fallback");
    }

    #[test]
    fn picker_wraps_around() {
        let mut picker = ImagePicker::new(images(), "");
        assert_eq!(picker.selected_path(), None);
        picker.select_prev();
        assert_eq!(picker.selected_path(), Some("images/c.jpg"));
        picker.select_next();
        assert_eq!(picker.selected_path(), Some("images/a.jpg"));
    }

    #[test]
    fn picker_preselects_known_path() {
        let picker = ImagePicker::new(images(), "images/b.jpg");
        assert_eq!(picker.selected_index(), Some(1));
        let picker = ImagePicker::new(images(), "images/z.jpg");
        assert_eq!(picker.selected_index(), None);
    }
}
