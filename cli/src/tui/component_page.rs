// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::marker::PhantomData;

use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::Block;

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;

/// Key hints shown at the bottom of a page, as `(label, key)` pairs.
pub type Instructions = &'static [(&'static str, &'static str)];

pub struct SinglePage<S, C: Component<S>> {
    title: String,
    instructions: Instructions,
    inner: C,
    _phantom: PhantomData<S>,
}

impl<S, C: Component<S>> SinglePage<S, C> {
    pub fn new(title: impl ToString, instructions: Instructions, inner: C) -> Self {
        Self {
            title: title.to_string(),
            instructions,
            inner,
            _phantom: PhantomData,
        }
    }
}

impl<S, C: Component<S>> Component<S> for SinglePage<S, C> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        let block = page_block(&self.title, self.instructions);
        let inner_area = block.inner(area);
        block.render(area, buf);
        self.inner.render(store, inner_area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        let inner_area = page_block(&self.title, self.instructions).inner(area);
        self.inner.get_cursor_position(store, inner_area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let inner_area = page_block(&self.title, self.instructions).inner(area);
        if let Some(msg) = self.inner.on_key(dispatcher, store, inner_area, event) {
            return Some(msg);
        }

        match event.code {
            KeyCode::Esc => Some(Message::Exit),
            _ => None,
        }
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.inner.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.inner.deactivate(dispatcher, store);
    }
}

/// The rounded frame of a page, with a centered title and key hints.
pub fn page_block<'a>(title: &str, instructions: Instructions) -> Block<'a> {
    let title = Line::from(format!(" {title} ").bold());
    Block::bordered()
        .border_set(border::ROUNDED)
        .title(title.centered())
        .title_bottom(instructions_line(instructions).centered())
        .white()
}

fn instructions_line(instructions: Instructions) -> Line<'static> {
    let mut spans = Vec::with_capacity(instructions.len() * 2 + 1);
    for (label, key) in instructions {
        spans.push(format!(" {label} ").into());
        spans.push(key.blue().bold());
    }
    spans.push(" ".into());
    Line::from(spans)
}
