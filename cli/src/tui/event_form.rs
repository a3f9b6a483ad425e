// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use eventful_core::views::{Content, SUBMITTING_TEXT};
use ratatui::crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::component::{Component, Message};
use crate::tui::component_form::{Access, Choice, ChoiceOptions, Form, FormItem, Input};
use crate::tui::component_page::{Instructions, SinglePage};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_store::EventStore;

const INSTRUCTIONS: Instructions = &[
    ("Next", "<Tab>"),
    ("Image", "<Left/Right>"),
    ("Submit", "<Enter>"),
    ("Cancel", "<Esc>"),
];

pub type EventForm = SinglePage<EventStore, EventFormBody>;

pub fn new_event_form(title: &str) -> EventForm {
    SinglePage::new(title, INSTRUCTIONS, EventFormBody::new())
}

/// The fields plus a status line for errors and pending writes.
pub struct EventFormBody(Form<EventStore, Box<dyn FormItem<EventStore>>>);

impl EventFormBody {
    fn new() -> Self {
        Self(Form::new(vec![
            Box::new(new_title()),
            Box::new(new_description()),
            Box::new(new_date()),
            Box::new(new_time()),
            Box::new(new_location()),
            Box::new(Choice::<EventStore, ImageOptions>::new("Image")),
        ]))
    }

    fn split(area: Rect) -> (Rect, Rect) {
        let [form, status] = Layout::vertical([Constraint::Fill(1), Constraint::Max(2)]).areas(area);
        (form, status)
    }
}

impl Component<EventStore> for EventFormBody {
    fn render(&self, store: &RefCell<EventStore>, area: Rect, buf: &mut Buffer) {
        let (form, status) = Self::split(area);
        self.0.render(store, form, buf);

        let store = store.borrow();
        let line = match (&store.error, store.submitting) {
            (_, true) => Line::from(SUBMITTING_TEXT.yellow()),
            (Some(err), false) => Line::from(err.as_str().red()),
            (None, false) => Line::default(),
        };
        Paragraph::new(line)
            .wrap(Wrap { trim: true })
            .render(status, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<EventStore>, area: Rect) -> Option<(u16, u16)> {
        self.0.get_cursor_position(store, Self::split(area).0)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<EventStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        // ignore input while the write is in flight
        if store.borrow().submitting {
            return Some(Message::Handled);
        }
        self.0.on_key(dispatcher, store, Self::split(area).0, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<EventStore>) {
        self.0.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<EventStore>) {
        self.0.deactivate(dispatcher, store);
    }
}

macro_rules! new_input {
    ($fn: ident, $title:expr, $acc: ident, $field: ident, $action: ident) => {
        fn $fn() -> Input<EventStore, $acc> {
            Input::new($title)
        }

        struct $acc;

        impl Access<EventStore, String> for $acc {
            fn get(store: &RefCell<EventStore>) -> String {
                store.borrow().data.$field.clone()
            }

            fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
                dispatcher.dispatch(Action::$action(value));
                true
            }
        }
    };
}

new_input!(new_title, "Title", TitleAccess, title, UpdateTitle);
new_input!(
    new_description,
    "Description",
    DescriptionAccess,
    description,
    UpdateDescription
);
new_input!(new_date, "Date (YYYY-MM-DD)", DateAccess, date, UpdateDate);
new_input!(new_time, "Time (HH:MM)", TimeAccess, time, UpdateTime);
new_input!(
    new_location,
    "Location",
    LocationAccess,
    location,
    UpdateLocation
);

struct ImageOptions;

impl ChoiceOptions<EventStore> for ImageOptions {
    fn options(store: &RefCell<EventStore>) -> Result<(Vec<String>, Option<usize>), String> {
        match &store.borrow().images {
            Content::Ready(picker) => {
                let labels = picker
                    .options()
                    .iter()
                    .map(|img| match img.caption.is_empty() {
                        true => img.path.clone(),
                        false => img.caption.clone(),
                    })
                    .collect();
                Ok((labels, picker.selected_index()))
            }
            Content::Error(block) => Err(block.to_string()),
            Content::Prompt(text) | Content::Loading(text) => Err(text.to_string()),
        }
    }

    fn select(dispatcher: &mut Dispatcher, store: &RefCell<EventStore>, index: usize) -> bool {
        let path = match &store.borrow().images {
            Content::Ready(picker) => picker.options().get(index).map(|img| img.path.clone()),
            _ => None,
        };
        match path {
            Some(path) => {
                dispatcher.dispatch(Action::UpdateImage(path));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use eventful_core::views::ImagePicker;
    use eventful_core::{EventDraft, Image};
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn setup(images: Content<ImagePicker>) -> (Rc<RefCell<EventStore>>, Dispatcher, EventForm) {
        let store = Rc::new(RefCell::new(EventStore::new_by_draft(EventDraft::default())));
        store.borrow_mut().images = images;
        let mut dispatcher = Dispatcher::new();
        EventStore::register_to(store.clone(), &mut dispatcher);
        let mut form = new_event_form("New Event");
        form.activate(&mut dispatcher, &store);
        (store, dispatcher, form)
    }

    fn press(form: &mut EventForm, d: &mut Dispatcher, s: &RefCell<EventStore>, code: KeyCode) {
        let area = Rect::new(0, 0, 60, 30);
        form.on_key(d, s, area, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_fill_and_choose_image() {
        let picker = ImagePicker::new(
            vec![
                Image {
                    path: "images/a.jpg".to_string(),
                    caption: "A".to_string(),
                },
                Image {
                    path: "images/b.jpg".to_string(),
                    caption: "B".to_string(),
                },
            ],
            "",
        );
        let (store, mut d, mut form) = setup(Content::Ready(picker));

        for c in "Meetup".chars() {
            press(&mut form, &mut d, &store, KeyCode::Char(c));
        }
        // the image picker is the last field
        press(&mut form, &mut d, &store, KeyCode::BackTab);
        press(&mut form, &mut d, &store, KeyCode::Right);

        let draft = store.borrow().draft();
        assert_eq!(draft.title, "Meetup");
        assert_eq!(draft.image, "images/a.jpg");
    }

    #[test]
    fn test_escape_exits() {
        let (store, mut d, mut form) = setup(Content::Loading("Loading..."));
        let msg = form.on_key(
            &mut d,
            &store,
            Rect::new(0, 0, 60, 30),
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
        );
        assert_eq!(msg, Some(Message::Exit));
    }

    #[test]
    fn test_input_ignored_while_submitting() {
        let (store, mut d, mut form) = setup(Content::Loading("Loading..."));
        store.borrow_mut().submitting = true;

        press(&mut form, &mut d, &store, KeyCode::Char('x'));
        press(&mut form, &mut d, &store, KeyCode::Enter);

        assert_eq!(store.borrow().data.title, "");
        assert!(!store.borrow().submit);
    }
}
