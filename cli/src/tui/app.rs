// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::error::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};

use eventful_core::query::{QueryError, QueryKey};
use eventful_core::router::{Route, Router};
use eventful_core::{Event, Eventful};
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::tui::event_modal::EventModal;
use crate::tui::page::{Command, Load, NotFoundPage, Page};
use crate::tui::page_detail::DetailPage;
use crate::tui::page_events::EventsPage;

/// Poll timeout of the terminal, also the redraw interval while idle.
const POLL_DURATION: Duration = Duration::from_millis(100);

/// How often unobserved cache entries are collected.
const GC_INTERVAL: Duration = Duration::from_secs(30);

/// Outcomes of spawned work, drained by the loop every frame.
#[derive(Debug)]
enum Inbox {
    Loaded(QueryKey, Result<(), QueryError>),
    Written(Option<Route>),
}

/// When the loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Until the user quits.
    App,
    /// Until the modal of the initial route closes or saves.
    Form,
}

pub struct Runtime {
    app: Eventful,
    mode: Mode,
    router: Router,
    page: (Route, Box<dyn Page>),
    modal: Option<(Route, EventModal)>,
    in_flight: HashSet<QueryKey>,
    inbox_tx: mpsc::UnboundedSender<Inbox>,
    inbox_rx: mpsc::UnboundedReceiver<Inbox>,
    last_gc: Instant,
    should_quit: bool,
    /// The event saved by the modal in form mode.
    saved: Option<Arc<Event>>,
}

impl Runtime {
    pub fn new(app: Eventful, route: Route, mode: Mode) -> Self {
        let router = Router::new(route);
        let (page_route, modal_route) = router.current().layers();
        let page = (page_route.clone(), build_page(&app, &page_route));
        let modal = modal_route.and_then(|r| build_modal(&app, &r).map(|m| (r, m)));
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            app,
            mode,
            router,
            page,
            modal,
            in_flight: HashSet::new(),
            inbox_tx,
            inbox_rx,
            last_gc: Instant::now(),
            should_quit: false,
            saved: None,
        }
    }

    /// Runs the loop on `terminal` until the user quits.
    pub fn run(
        mut self,
        terminal: &mut DefaultTerminal,
    ) -> Result<Option<Arc<Event>>, Box<dyn Error>> {
        tracing::info!(route = %self.router.current(), mode = ?self.mode, "tui started");
        if self.mode == Mode::Form && self.modal.is_none() {
            return Err(format!("{} is not a form", self.router.current()).into());
        }

        while !self.should_quit {
            self.spawn_loads();
            self.drain_inbox();
            if self.should_quit {
                break;
            }

            self.page.1.sync();
            if let Some((_, modal)) = &mut self.modal {
                modal.sync();
            }
            self.draw(terminal)?;

            if event::poll(POLL_DURATION)? {
                // drain all pending events before the next frame
                loop {
                    if let event::Event::Key(key) = event::read()?
                        && key.kind == KeyEventKind::Press
                    {
                        self.on_key(key);
                    }
                    if self.should_quit || !event::poll(Duration::ZERO)? {
                        break;
                    }
                }
            }

            if self.last_gc.elapsed() >= GC_INTERVAL {
                self.app.query_client().collect_garbage();
                self.last_gc = Instant::now();
            }
        }

        tracing::info!("tui stopped");
        Ok(self.saved)
    }

    fn draw(&self, terminal: &mut DefaultTerminal) -> Result<(), Box<dyn Error>> {
        terminal.draw(|frame| {
            let area = frame.area();
            let buf = frame.buffer_mut();
            self.page.1.render(area, buf);
            let cursor = match &self.modal {
                Some((_, modal)) => {
                    modal.render(area, buf);
                    modal.cursor_position(area)
                }
                None => self.page.1.cursor_position(area),
            };
            if let Some(position) = cursor {
                frame.set_cursor_position(position);
            }
        })?;
        Ok(())
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        let command = match &mut self.modal {
            Some((_, modal)) => modal.on_key(key),
            None => self.page.1.on_key(key),
        };
        if let Some(command) = command {
            self.execute(command);
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Handled => {}
            Command::Navigate(route) => {
                if self.router.navigate(route) {
                    self.route_changed();
                }
            }
            Command::CloseModal => {
                if self.mode == Mode::Form {
                    self.should_quit = true;
                } else if self.router.close_modal() {
                    self.route_changed();
                }
            }
            Command::Quit => self.should_quit = true,
            Command::Write(fut) => {
                let tx = self.inbox_tx.clone();
                tokio::spawn(async move {
                    let _ = tx.send(Inbox::Written(fut.await));
                });
            }
        }
    }

    /// Rebuilds the layers whose route changed. Dropping a layer drops its
    /// views, which cancels their unobserved fetches.
    fn route_changed(&mut self) {
        let (page_route, modal_route) = self.router.current().layers();
        if self.page.0 != page_route {
            self.page = (page_route.clone(), build_page(&self.app, &page_route));
        }
        if self.modal.as_ref().map(|(r, _)| r) != modal_route.as_ref() {
            self.modal = modal_route.and_then(|r| build_modal(&self.app, &r).map(|m| (r, m)));
        }
    }

    fn spawn_loads(&mut self) {
        let mut loads = self.page.1.loads();
        if let Some((_, modal)) = &self.modal {
            loads.extend(modal.loads());
        }

        for Load { key, fut } in loads {
            if !self.in_flight.insert(key.clone()) {
                continue;
            }
            tracing::debug!(%key, "spawning load");
            let tx = self.inbox_tx.clone();
            tokio::spawn(async move {
                let res = fut.await;
                let _ = tx.send(Inbox::Loaded(key, res));
            });
        }
    }

    fn drain_inbox(&mut self) {
        while let Ok(msg) = self.inbox_rx.try_recv() {
            match msg {
                Inbox::Loaded(key, res) => {
                    if let Err(err) = res {
                        tracing::debug!(%key, %err, "load did not settle");
                    }
                    self.in_flight.remove(&key);
                }
                Inbox::Written(Some(route)) => {
                    if self.mode == Mode::Form {
                        self.saved = self.modal.as_ref().and_then(|(_, m)| m.saved());
                        self.should_quit = true;
                        return;
                    }
                    if self.router.navigate(route) {
                        self.route_changed();
                    }
                }
                // the failure is shown by the layer that issued the write
                Inbox::Written(None) => {}
            }
        }
    }
}

fn build_page(app: &Eventful, route: &Route) -> Box<dyn Page> {
    match route {
        Route::EventDetail(id) => Box::new(DetailPage::new(app, id.clone())),
        Route::NotFound(path) => Box::new(NotFoundPage::new(path.clone())),
        _ => Box::new(EventsPage::new(app.clone())),
    }
}

fn build_modal(app: &Eventful, route: &Route) -> Option<EventModal> {
    match route {
        Route::NewEvent => Some(EventModal::new_event(app)),
        Route::EditEvent(id) => Some(EventModal::edit_event(app, id.clone())),
        _ => None,
    }
}
