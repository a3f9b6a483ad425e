// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Mock backend helpers.

use std::time::Duration;

use eventful_core::query::{QueryClient, QueryKey};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves `GET /events` with `events`, expecting `times` requests.
pub async fn mount_events(server: &MockServer, events: Vec<Value>, times: u64) {
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "events": events })))
        .expect(times)
        .mount(server)
        .await;
}

/// Serves `GET /events/:id` with `event`.
pub async fn mount_event(server: &MockServer, id: &str, event: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/events/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "event": event })))
        .mount(server)
        .await;
}

/// Serves `GET /events/images`.
pub async fn mount_images(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/events/images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": [
                { "path": "images/city.jpg", "caption": "A city at night" },
                { "path": "images/park.jpg", "caption": "A park" }
            ]
        })))
        .mount(server)
        .await;
}

/// Polls until `key` has a fetch in flight.
///
/// # Panics
///
/// Panics if no fetch starts within a second.
pub async fn wait_until_fetching(client: &QueryClient, key: &QueryKey) {
    for _ in 0..100 {
        if client.is_fetching(key) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("No fetch started for {key}");
}
