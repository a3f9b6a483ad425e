// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use eventful_core::query::{QueryError, QueryKey};
use eventful_core::router::Route;
use eventful_core::views::{Content, ErrorBlock};
use futures::FutureExt;
use futures::future::BoxFuture;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::component_page::{Instructions, page_block};

/// What a key press asks the runtime to do.
pub enum Command {
    /// The page handled the key itself.
    Handled,
    Navigate(Route),
    CloseModal,
    Quit,
    /// Runs a write, then navigates to the route it resolves to.
    Write(BoxFuture<'static, Option<Route>>),
}

/// A read the runtime should spawn unless one for the same key is running.
pub struct Load {
    pub key: QueryKey,
    pub fut: BoxFuture<'static, Result<(), QueryError>>,
}

impl Load {
    pub fn new<T, F>(key: QueryKey, fut: F) -> Self
    where
        F: Future<Output = Result<T, QueryError>> + Send + 'static,
    {
        Self {
            key,
            fut: fut.map(|res| res.map(|_| ())).boxed(),
        }
    }
}

pub trait Page {
    fn render(&self, area: Rect, buf: &mut Buffer);

    fn cursor_position(&self, _area: Rect) -> Option<(u16, u16)> {
        None
    }

    fn on_key(&mut self, event: KeyEvent) -> Option<Command>;

    /// Reads this page needs right now.
    fn loads(&self) -> Vec<Load> {
        Vec::new()
    }

    /// Pulls view state into the page before a frame is drawn.
    fn sync(&mut self) {}
}

/// Shown for unknown routes.
pub struct NotFoundPage {
    path: String,
}

impl NotFoundPage {
    pub fn new(path: String) -> Self {
        Self { path }
    }
}

const NOT_FOUND_INSTRUCTIONS: Instructions = &[("Events", "<Esc>"), ("Quit", "<q>")];

impl Page for NotFoundPage {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let block = page_block("Not Found", NOT_FOUND_INSTRUCTIONS);
        let inner = block.inner(area);
        block.render(area, buf);
        let text = vec![
            Line::from("Page not found".bold()),
            Line::from(format!("Nothing lives at {}.", self.path).dark_gray()),
        ];
        Paragraph::new(text).centered().render(inner, buf);
    }

    fn on_key(&mut self, event: KeyEvent) -> Option<Command> {
        match event.code {
            KeyCode::Esc => Some(Command::Navigate(Route::Events)),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Renders the non-ready states of a read.
pub fn render_content_status<T>(content: &Content<T>, area: Rect, buf: &mut Buffer) {
    let line = match content {
        Content::Prompt(text) => Line::from(text.dark_gray()),
        Content::Loading(text) => Line::from(text.yellow()),
        Content::Error(block) => return render_error_block(block, area, buf),
        Content::Ready(_) => return,
    };
    Paragraph::new(line).render(area, buf);
}

pub fn render_error_block(block: &ErrorBlock, area: Rect, buf: &mut Buffer) {
    let text = vec![
        Line::from(block.title.as_str().red().bold()),
        Line::from(block.message.as_str()),
    ];
    Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}
