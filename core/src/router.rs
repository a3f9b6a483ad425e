// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Client-side routes and navigation history.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use eventful_api::EventId;

/// A client route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, redirects to [`Route::Events`].
    Root,
    /// `/events`, the list and search page.
    Events,
    /// `/events/new`, modal over [`Route::Events`].
    NewEvent,
    /// `/events/:id`, the detail page.
    EventDetail(EventId),
    /// `/events/:id/edit`, modal over the detail page.
    EditEvent(EventId),
    /// Any unknown path.
    NotFound(String),
}

impl Route {
    /// Parses a path. Unknown paths become [`Route::NotFound`].
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let clean = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let segments: Vec<&str> = clean.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Root,
            ["events"] => Self::Events,
            ["events", "new"] => Self::NewEvent,
            ["events", id] => Self::EventDetail(EventId::from(*id)),
            ["events", id, "edit"] => Self::EditEvent(EventId::from(*id)),
            _ => Self::NotFound(path.to_string()),
        }
    }

    /// The path of this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Events => "/events".to_string(),
            Self::NewEvent => "/events/new".to_string(),
            Self::EventDetail(id) => format!("/events/{id}"),
            Self::EditEvent(id) => format!("/events/{id}/edit"),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// The route this one nests in.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        match self {
            Self::NewEvent | Self::EventDetail(_) => Some(Self::Events),
            Self::EditEvent(id) => Some(Self::EventDetail(id.clone())),
            Self::Root | Self::Events | Self::NotFound(_) => None,
        }
    }

    /// Whether this route renders as a modal over its parent.
    #[must_use]
    pub fn is_modal(&self) -> bool {
        matches!(self, Self::NewEvent | Self::EditEvent(_))
    }

    /// The page to render and the modal on top of it, if any.
    #[must_use]
    pub fn layers(&self) -> (Self, Option<Self>) {
        match self.parent() {
            Some(parent) if self.is_modal() => (parent, Some(self.clone())),
            _ => (self.clone(), None),
        }
    }

    /// The route actually shown when navigating to this one.
    #[must_use]
    pub fn redirect(self) -> Self {
        match self {
            Self::Root => Self::Events,
            route => route,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Navigation history.
#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<Route>,
}

impl Router {
    /// Creates a router at `initial`, after redirects.
    #[must_use]
    pub fn new(initial: Route) -> Self {
        Self {
            history: vec![initial.redirect()],
        }
    }

    /// The current route.
    #[must_use]
    pub fn current(&self) -> &Route {
        static FALLBACK: Route = Route::Events;
        // history is never empty
        self.history.last().unwrap_or(&FALLBACK)
    }

    /// Navigates to `route`. Returns whether the current route changed.
    pub fn navigate(&mut self, route: Route) -> bool {
        let route = route.redirect();
        if &route == self.current() {
            return false;
        }
        tracing::info!(from = %self.current(), to = %route, "navigate");
        self.history.push(route);
        true
    }

    /// Goes back one entry. Returns whether the current route changed.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }

    /// Closes the current modal by navigating to its parent.
    pub fn close_modal(&mut self) -> bool {
        let current = self.current();
        match current.parent() {
            Some(parent) if current.is_modal() => self.navigate(parent),
            _ => false,
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Events)
    }
}
