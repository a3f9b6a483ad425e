// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use eventful_core::query::QueryKey;
use eventful_core::views::{DraftError, EditEventView, ErrorBlock, NewEventView};
use eventful_core::{Event, EventDraft, EventId, Eventful};
use futures::FutureExt;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::Clear;

use crate::tui::component::{Component, Message};
use crate::tui::component_page::page_block;
use crate::tui::dispatcher::Dispatcher;
use crate::tui::event_form::{EventForm, new_event_form};
use crate::tui::event_store::EventStore;
use crate::tui::page::{Command, Load, Page, render_content_status};

const DISCARD_PROMPT: &str = "Unsaved changes, press Esc again to discard them";

enum ModalView {
    New(NewEventView),
    Edit(EditEventView),
}

/// The form of `/events/new` and `/events/:id/edit`, drawn over its parent page.
pub struct EventModal {
    view: ModalView,
    form: EventForm,
    dispatcher: Dispatcher,
    /// Set once the draft is known, right away for new events.
    store: Option<Rc<RefCell<EventStore>>>,
    invalid: Option<DraftError>,
    /// Esc was pressed once on a changed form.
    discard_pending: bool,
}

impl EventModal {
    pub fn new_event(app: &Eventful) -> Self {
        let mut modal = Self::new(ModalView::New(app.new_event_view()), "New Event");
        modal.init_store(EventDraft::default());
        modal
    }

    pub fn edit_event(app: &Eventful, id: EventId) -> Self {
        Self::new(ModalView::Edit(app.edit_event_view(id)), "Edit Event")
    }

    fn new(view: ModalView, title: &str) -> Self {
        Self {
            view,
            form: new_event_form(title),
            dispatcher: Dispatcher::new(),
            store: None,
            invalid: None,
            discard_pending: false,
        }
    }

    fn init_store(&mut self, draft: EventDraft) {
        let store = Rc::new(RefCell::new(EventStore::new_by_draft(draft)));
        EventStore::register_to(store.clone(), &mut self.dispatcher);
        self.form.activate(&mut self.dispatcher, &store);
        self.store = Some(store);
    }

    /// The event saved by this form, once the write succeeded.
    pub fn saved(&self) -> Option<Arc<Event>> {
        match &self.view {
            ModalView::New(view) => view.created(),
            ModalView::Edit(view) => view.updated(),
        }
    }

    fn is_submitting(&self) -> bool {
        match &self.view {
            ModalView::New(view) => view.is_submitting(),
            ModalView::Edit(view) => view.is_submitting(),
        }
    }

    fn write_error(&self) -> Option<ErrorBlock> {
        match &self.view {
            ModalView::New(view) => view.error(),
            ModalView::Edit(view) => view.error(),
        }
    }

    fn submit(&mut self, draft: EventDraft) -> Option<Command> {
        let write = match &self.view {
            ModalView::New(view) => view.submit(draft).map(|fut| fut.boxed()),
            ModalView::Edit(view) => view.submit(draft).map(|fut| fut.boxed()),
        };
        match write {
            Ok(fut) => {
                self.invalid = None;
                Some(Command::Write(fut))
            }
            Err(err) => {
                tracing::debug!(%err, "draft rejected");
                self.invalid = Some(err);
                Some(Command::Handled)
            }
        }
    }

    /// The modal area, centered over `area`.
    fn area(area: Rect) -> Rect {
        let width = area.width.saturating_sub(4).clamp(20, 72);
        let height = area.height.saturating_sub(2).clamp(10, 24);
        Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width: width.min(area.width),
            height: height.min(area.height),
        }
    }
}

impl Page for EventModal {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let area = Self::area(area);
        Clear.render(area, buf);
        match &self.store {
            Some(store) => self.form.render(store, area, buf),
            None => {
                let block = page_block("Edit Event", &[("Cancel", "<Esc>")]);
                let inner = block.inner(area);
                block.render(area, buf);
                if let ModalView::Edit(view) = &self.view {
                    render_content_status(&view.content(), inner, buf);
                }
            }
        }
    }

    fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        let store = self.store.as_ref()?;
        self.form.get_cursor_position(store, Self::area(area))
    }

    fn on_key(&mut self, event: KeyEvent) -> Option<Command> {
        let Some(store) = self.store.clone() else {
            return match event.code {
                KeyCode::Esc => Some(Command::CloseModal),
                _ => None,
            };
        };

        // items only use the area for the cursor, which is computed on render
        let msg = self
            .form
            .on_key(&mut self.dispatcher, &store, Rect::default(), event);
        if msg == Some(Message::Exit) {
            if store.borrow().is_dirty() && !self.discard_pending {
                self.discard_pending = true;
                return Some(Command::Handled);
            }
            return Some(Command::CloseModal);
        }
        self.discard_pending = false;

        let submitted = std::mem::take(&mut store.borrow_mut().submit);
        if submitted && !self.is_submitting() {
            let draft = store.borrow().draft();
            return self.submit(draft);
        }
        msg.map(|_| Command::Handled)
    }

    fn loads(&self) -> Vec<Load> {
        let mut loads = Vec::new();
        match &self.view {
            ModalView::New(view) => {
                if view.needs_load() {
                    loads.push(Load::new(QueryKey::images(), view.load_images()));
                }
            }
            ModalView::Edit(view) => {
                if view.needs_load() {
                    loads.push(Load::new(QueryKey::event(view.id()), view.load()));
                }
                if view.needs_images() {
                    loads.push(Load::new(QueryKey::images(), view.load_images()));
                }
            }
        }
        loads
    }

    fn sync(&mut self) {
        if self.store.is_none()
            && let ModalView::Edit(view) = &self.view
            && let Some(draft) = view.content().ready().cloned()
        {
            self.init_store(draft);
        }

        let submitting = self.is_submitting();
        let error = match &self.invalid {
            _ if self.discard_pending => Some(DISCARD_PROMPT.to_string()),
            Some(err) => Some(err.to_string()),
            None => self.write_error().map(|block| block.to_string()),
        };
        let Some(store) = &self.store else {
            return;
        };

        let images = {
            let draft = store.borrow().draft();
            match &self.view {
                ModalView::New(view) => view.image_picker(&draft),
                ModalView::Edit(view) => view.image_picker(&draft),
            }
        };
        let mut store = store.borrow_mut();
        store.images = images;
        store.submitting = submitting;
        store.error = error;
    }
}
