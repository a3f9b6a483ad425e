// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Terminal UI over the views of the core crate.
//!
//! The loop is synchronous and polls the terminal with a timeout. Reads and
//! writes run as tokio tasks and report back through an inbox, so it has to be
//! started from within a multi-threaded tokio runtime.

mod app;
mod component;
mod component_form;
mod component_page;
mod dispatcher;
mod event_form;
mod event_modal;
mod event_store;
mod page;
mod page_detail;
mod page_events;

use std::error::Error;
use std::sync::Arc;

use eventful_core::router::Route;
use eventful_core::{Event, Eventful};

use crate::tui::app::{Mode, Runtime};

/// Runs the full terminal UI at `route` until the user quits.
pub fn run_app(app: Eventful, route: Route) -> Result<(), Box<dyn Error>> {
    run(Runtime::new(app, route, Mode::App)).map(|_| ())
}

/// Opens the form of `route` on its own and returns the saved event, or
/// `None` if the user cancelled.
pub fn run_form(app: Eventful, route: Route) -> Result<Option<Arc<Event>>, Box<dyn Error>> {
    run(Runtime::new(app, route, Mode::Form))
}

fn run(runtime: Runtime) -> Result<Option<Arc<Event>>, Box<dyn Error>> {
    tokio::task::block_in_place(|| {
        let mut terminal = ratatui::init();
        let result = runtime.run(&mut terminal);
        ratatui::restore();
        result
    })
}
