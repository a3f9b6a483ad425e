// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use eventful_core::query::QueryKey;
use eventful_core::router::Route;
use eventful_core::views::{Content, EventDetailView};
use eventful_core::{EventId, Eventful};
use futures::FutureExt;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::component_page::{Instructions, page_block};
use crate::tui::page::{Command, Load, Page, render_content_status, render_error_block};

const INSTRUCTIONS: Instructions = &[("Edit", "<e>"), ("Delete", "<d>"), ("Back", "<Esc>")];

/// The `/events/:id` page.
pub struct DetailPage {
    view: EventDetailView,
}

impl DetailPage {
    pub fn new(app: &Eventful, id: EventId) -> Self {
        Self {
            view: app.detail_view(id),
        }
    }
}

impl Page for DetailPage {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        let content = self.view.content();
        let title = match &content {
            Content::Ready(details) => details.title.clone(),
            _ => "Event".to_string(),
        };
        let block = page_block(&title, INSTRUCTIONS);
        let inner = block.inner(area);
        block.render(area, buf);

        let [body, status] =
            Layout::vertical([Constraint::Fill(1), Constraint::Max(2)]).areas(inner);

        let Content::Ready(details) = &content else {
            return render_content_status(&content, body, buf);
        };

        let row = |key: &'static str, value: &str| {
            Line::from(vec![format!("{key:<9}").bold(), value.to_string().into()])
        };
        let mut text = vec![
            row("When", details.when.as_str()),
            row("Location", details.location.as_str()),
        ];
        if let Some(datetime) = &details.datetime {
            text.push(row("ISO", datetime.as_str()));
        }
        if let Some(url) = &details.image_url {
            text.push(row("Image", url.as_str()));
        }
        text.push(Line::default());
        text.extend(details.description.lines().map(|l| Line::from(l.to_string())));
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .render(body, buf);

        if self.view.is_deleting() {
            Paragraph::new("Deleting...".yellow()).render(status, buf);
        } else if let Some(block) = self.view.delete_error() {
            render_error_block(&block, status, buf);
        }
    }

    fn on_key(&mut self, event: KeyEvent) -> Option<Command> {
        match event.code {
            KeyCode::Esc => Some(Command::Navigate(Route::Events)),
            KeyCode::Char('e') => Some(Command::Navigate(Route::EditEvent(self.view.id().clone()))),
            KeyCode::Char('d') if !self.view.is_deleting() => {
                Some(Command::Write(self.view.delete().boxed()))
            }
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }

    fn loads(&self) -> Vec<Load> {
        match self.view.needs_load() {
            true => vec![Load::new(QueryKey::event(self.view.id()), self.view.load())],
            false => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eventful_core::query::QueryOptions;
    use eventful_core::{ApiConfig, EventsClient};
    use ratatui::crossterm::event::KeyModifiers;

    use super::*;

    fn page(id: &str) -> DetailPage {
        let api = EventsClient::new(ApiConfig::with_base_url("http://localhost:4000")).unwrap();
        let app = Eventful::with_api(Arc::new(api), QueryOptions::default());
        DetailPage::new(&app, EventId::from(id))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_detail_keys() {
        let mut page = page("7");
        assert!(matches!(
            page.on_key(key(KeyCode::Char('e'))),
            Some(Command::Navigate(Route::EditEvent(id))) if id.as_str() == "7"
        ));
        assert!(matches!(
            page.on_key(key(KeyCode::Esc)),
            Some(Command::Navigate(Route::Events))
        ));
        assert!(matches!(
            page.on_key(key(KeyCode::Char('d'))),
            Some(Command::Write(_))
        ));
    }

    #[test]
    fn test_loads_event_once_needed() {
        let page = page("7");
        let loads = page.loads();
        assert_eq!(loads.len(), 1);
        assert_eq!(loads[0].key, QueryKey::event(&EventId::from("7")));
    }
}
