// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use eventful_core::EventDraft;
use eventful_core::views::{Content, ImagePicker, LOADING_TEXT};

use crate::tui::dispatcher::{Action, Dispatcher};

/// Form state of a new or edited event.
#[derive(Debug)]
pub struct EventStore {
    pub data: EventData,
    pub dirty: EventMarker,

    /// Image options, refreshed from the view before each frame.
    pub images: Content<ImagePicker>,

    /// Validation or server error of the last submit.
    pub error: Option<String>,

    /// Whether the write is in flight.
    pub submitting: bool,

    /// Whether the user submit the changes
    pub submit: bool,
}

impl EventStore {
    pub fn new_by_draft(draft: EventDraft) -> Self {
        Self {
            data: EventData {
                title: draft.title,
                description: draft.description,
                date: draft.date,
                time: draft.time,
                location: draft.location,
                image: draft.image,
            },
            dirty: EventMarker::default(),
            images: Content::Loading(LOADING_TEXT),
            error: None,
            submitting: false,
            submit: false,
        }
    }

    /// The draft to submit, with surrounding whitespace removed.
    pub fn draft(&self) -> EventDraft {
        EventDraft {
            title: self.data.title.trim().to_string(),
            description: self.data.description.trim().to_string(),
            date: self.data.date.trim().to_string(),
            time: self.data.time.trim().to_string(),
            location: self.data.location.trim().to_string(),
            image: self.data.image.clone(),
        }
    }

    /// Whether any field was changed since the form opened.
    pub fn is_dirty(&self) -> bool {
        let d = &self.dirty;
        d.title || d.description || d.date || d.time || d.location || d.image
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            let mut that = that.borrow_mut();
            match action {
                Action::UpdateTitle(v) => {
                    that.data.title = v.clone();
                    that.dirty.title = true;
                }
                Action::UpdateDescription(v) => {
                    that.data.description = v.clone();
                    that.dirty.description = true;
                }
                Action::UpdateDate(v) => {
                    that.data.date = v.clone();
                    that.dirty.date = true;
                }
                Action::UpdateTime(v) => {
                    that.data.time = v.clone();
                    that.dirty.time = true;
                }
                Action::UpdateLocation(v) => {
                    that.data.location = v.clone();
                    that.dirty.location = true;
                }
                Action::UpdateImage(v) => {
                    that.data.image = v.clone();
                    that.dirty.image = true;
                }
                Action::SubmitChanges => that.submit = true,
            }
        }));
        dispatcher.register(callback);
    }
}

#[derive(Debug, Default)]
pub struct EventData {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub image: String,
}

#[derive(Debug, Default)]
pub struct EventMarker {
    title: bool,
    description: bool,
    date: bool,
    time: bool,
    location: bool,
    image: bool,
}
