// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use eventful_core::Eventful;
use eventful_core::query::QueryKey;
use eventful_core::router::Route;
use eventful_core::views::{Content, EventItem, EventListView, SearchView};
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component_page::{Instructions, page_block};
use crate::tui::page::{Command, Load, Page, render_content_status};
use crate::util::{
    byte_index_of_grapheme, byte_range_of_grapheme_at, grapheme_count, unicode_width_of_slice,
};

const INSTRUCTIONS: Instructions = &[
    ("Search", "</>"),
    ("Open", "<Enter>"),
    ("New", "<n>"),
    ("Refresh", "<r>"),
    ("Quit", "<q>"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    List,
    Search,
}

/// The `/events` page: recently added events, or the results of a search.
pub struct EventsPage {
    app: Eventful,
    list: EventListView,
    search: SearchView,
    focus: Focus,
    input: String,
    cursor: usize,
    selected: usize,
}

impl EventsPage {
    pub fn new(app: Eventful) -> Self {
        Self {
            list: app.list_view(),
            search: app.search_view(),
            app,
            focus: Focus::List,
            input: String::new(),
            cursor: 0,
            selected: 0,
        }
    }

    /// The results of the submitted search, else the recent list.
    fn content(&self) -> Content<Vec<EventItem>> {
        match self.search.term() {
            Some(_) => self.search.content(),
            None => self.list.content(),
        }
    }

    fn heading(&self) -> String {
        match self.search.term() {
            Some(term) => format!("Results for \"{term}\""),
            None => "Recently added events".to_string(),
        }
    }

    fn selected_item(&self) -> Option<EventItem> {
        match self.content() {
            Content::Ready(items) => items.into_iter().nth(self.selected),
            _ => None,
        }
    }

    fn move_selection(&mut self, offset: isize) {
        let len = self.content().ready().map_or(0, Vec::len);
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected as isize + offset).clamp(0, len as isize - 1) as usize;
    }

    fn submit_search(&mut self) {
        if self.search.submit(&self.input) {
            self.selected = 0;
        }
        self.focus = Focus::List;
    }

    fn refresh(&mut self) {
        let count = self.app.query_client().invalidate_queries(&QueryKey::events());
        tracing::debug!(count, "refreshing events");
    }

    fn on_search_key(&mut self, event: KeyEvent) -> Option<Command> {
        match event.code {
            KeyCode::Enter => self.submit_search(),
            KeyCode::Esc => self.focus = Focus::List,
            KeyCode::Left if self.cursor > 0 => self.cursor -= 1,
            KeyCode::Right if self.cursor < grapheme_count(&self.input) => self.cursor += 1,
            KeyCode::Backspace if self.cursor > 0 => {
                if let Some(range) = byte_range_of_grapheme_at(&self.input, self.cursor - 1) {
                    self.input.replace_range(range, "");
                    self.cursor -= 1;
                }
            }
            KeyCode::Char(c) => {
                let index = byte_index_of_grapheme(&self.input, self.cursor);
                self.input.insert(index, c);
                self.cursor += 1;
            }
            _ => {}
        }
        Some(Command::Handled)
    }

    fn on_list_key(&mut self, event: KeyEvent) -> Option<Command> {
        match event.code {
            KeyCode::Char('/') => {
                self.focus = Focus::Search;
                self.cursor = grapheme_count(&self.input);
                Some(Command::Handled)
            }
            KeyCode::Up => {
                self.move_selection(-1);
                Some(Command::Handled)
            }
            KeyCode::Down => {
                self.move_selection(1);
                Some(Command::Handled)
            }
            KeyCode::Enter => self
                .selected_item()
                .map(|item| Command::Navigate(Route::EventDetail(item.id))),
            KeyCode::Esc if self.search.term().is_some() => {
                self.input.clear();
                self.cursor = 0;
                self.submit_search();
                Some(Command::Handled)
            }
            KeyCode::Char('n') => Some(Command::Navigate(Route::NewEvent)),
            KeyCode::Char('r') => {
                self.refresh();
                Some(Command::Handled)
            }
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }

    fn split(area: Rect) -> [Rect; 3] {
        let inner = page_block("", INSTRUCTIONS).inner(area);
        Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(inner)
    }
}

impl Page for EventsPage {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        page_block("Eventful", INSTRUCTIONS).render(area, buf);
        let [search_area, heading_area, list_area] = Self::split(area);

        let search_color = match self.focus {
            Focus::Search => Color::Blue,
            Focus::List => Color::Gray,
        };
        let search_block = Block::bordered().title(" Search ").fg(search_color);
        Paragraph::new(self.input.as_str())
            .white()
            .block(search_block)
            .render(search_area, buf);

        Paragraph::new(self.heading().bold()).render(heading_area, buf);

        let content = self.content();
        let Content::Ready(items) = &content else {
            return render_content_status(&content, list_area, buf);
        };
        if items.is_empty() {
            return Paragraph::new("No events found.".dark_gray()).render(list_area, buf);
        }

        let date_width = items.iter().map(|i| i.date.width()).max().unwrap_or(0);
        let rows = items.iter().map(|item| {
            let mut spans = vec![
                format!("{:<date_width$}", item.date).cyan(),
                "  ".into(),
                item.title.as_str().into(),
            ];
            if !item.location.is_empty() {
                spans.push(format!("  @ {}", item.location).dark_gray());
            }
            ListItem::new(Line::from(spans))
        });
        let list = List::new(rows)
            .highlight_symbol("> ")
            .highlight_style(Style::new().bold().reversed());
        let mut state = ListState::default().with_selected(Some(self.selected));
        StatefulWidget::render(list, list_area, buf, &mut state);
    }

    fn cursor_position(&self, area: Rect) -> Option<(u16, u16)> {
        if self.focus != Focus::Search {
            return None;
        }
        let [search_area, _, _] = Self::split(area);
        let width = unicode_width_of_slice(&self.input, self.cursor) as u16;
        Some((search_area.x + 1 + width, search_area.y + 1))
    }

    fn on_key(&mut self, event: KeyEvent) -> Option<Command> {
        match self.focus {
            Focus::Search => self.on_search_key(event),
            Focus::List => self.on_list_key(event),
        }
    }

    fn loads(&self) -> Vec<Load> {
        let mut loads = Vec::new();
        if self.list.needs_load() {
            loads.push(Load::new(QueryKey::events(), self.list.load()));
        }
        if self.search.needs_load()
            && let (Some(term), Some(load)) = (self.search.term(), self.search.load())
        {
            loads.push(Load::new(QueryKey::search(term), load));
        }
        loads
    }

    fn sync(&mut self) {
        // keep the selection inside the list after a reload
        self.move_selection(0);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use eventful_core::query::QueryOptions;
    use eventful_core::{EventsClient, Eventful};
    use ratatui::crossterm::event::KeyModifiers;

    use super::*;

    fn page() -> EventsPage {
        let api = EventsClient::new(eventful_core::ApiConfig::with_base_url(
            "http://localhost:4000",
        ))
        .unwrap();
        EventsPage::new(Eventful::with_api(Arc::new(api), QueryOptions::default()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_search_is_disabled_until_submitted() {
        let mut page = page();
        assert_eq!(page.loads().len(), 1);

        page.on_key(key(KeyCode::Char('/')));
        for c in "rust".chars() {
            page.on_key(key(KeyCode::Char(c)));
        }
        assert_eq!(page.search.term(), None);

        page.on_key(key(KeyCode::Enter));
        assert_eq!(page.search.term(), Some("rust"));
        assert_eq!(page.focus, Focus::List);

        let keys: Vec<_> = page.loads().into_iter().map(|l| l.key).collect();
        assert!(keys.contains(&QueryKey::search("rust")));
    }

    #[test]
    fn test_list_keys() {
        let mut page = page();
        assert!(matches!(
            page.on_key(key(KeyCode::Char('n'))),
            Some(Command::Navigate(Route::NewEvent))
        ));
        assert!(matches!(
            page.on_key(key(KeyCode::Char('q'))),
            Some(Command::Quit)
        ));
        // nothing to open while loading
        assert!(page.on_key(key(KeyCode::Enter)).is_none());
    }

    #[test]
    fn test_escape_clears_search() {
        let mut page = page();
        page.on_key(key(KeyCode::Char('/')));
        page.on_key(key(KeyCode::Char('x')));
        page.on_key(key(KeyCode::Enter));
        assert_eq!(page.search.term(), Some("x"));

        page.on_key(key(KeyCode::Esc));
        assert_eq!(page.search.term(), None);
        assert_eq!(page.heading(), "Recently added events");
    }
}
