// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::time::Duration;

use eventful_core::{Config, ConfigDuration, EventDraft, Eventful};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Creates an application root talking to the mock server.
///
/// # Panics
///
/// Panics if the mock server URI is not a valid base URL.
#[must_use]
pub fn app_for(server: &MockServer) -> Eventful {
    let config = Config {
        base_url: server.uri(),
        ..Default::default()
    };
    Eventful::new(config).expect("Failed to create app")
}

/// Like [`app_for`], but cached data stays fresh for `stale_time`.
#[must_use]
pub fn app_with_stale_time(server: &MockServer, stale_time: Duration) -> Eventful {
    let config = Config {
        base_url: server.uri(),
        stale_time: Some(ConfigDuration::new(stale_time)),
        ..Default::default()
    };
    Eventful::new(config).expect("Failed to create app")
}

/// JSON of an event as the server sends it.
#[must_use]
pub fn sample_event(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "A description",
        "date": "2025-05-12",
        "time": "14:00",
        "location": "Berlin",
        "image": "images/city.jpg"
    })
}

/// A draft that passes validation.
#[must_use]
pub fn test_draft(title: &str) -> EventDraft {
    EventDraft {
        title: title.to_string(),
        description: "Monthly meetup".to_string(),
        date: "2025-06-01".to_string(),
        time: "18:30".to_string(),
        location: "Hamburg".to_string(),
        image: "images/city.jpg".to_string(),
    }
}
