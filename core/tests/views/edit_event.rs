// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use eventful_core::query::QueryKey;
use eventful_core::router::Route;
use eventful_core::{Event, EventId};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{
    app_for, app_with_stale_time, mount_event, mount_events, sample_event, test_draft,
};

#[tokio::test]
async fn edit_prefills_draft() {
    let server = MockServer::start().await;
    mount_event(&server, "5", sample_event("5", "Old title")).await;
    let app = app_for(&server);
    let view = app.edit_event_view(EventId::from("5"));
    assert!(view.needs_load());

    view.load().await.unwrap();

    let draft = view.content().ready().cloned().unwrap();
    assert_eq!(draft.title, "Old title");
    assert_eq!(draft.date, "2025-05-12");
    assert!(!view.needs_load());
}

#[tokio::test]
async fn update_stores_fresh_event_and_navigates() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/events/5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "event": sample_event("5", "Renamed") })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server);
    let view = app.edit_event_view(EventId::from("5"));

    // Act
    let route = view.submit(test_draft("Renamed")).unwrap().await;

    // Assert
    assert_eq!(route, Some(Route::EventDetail(EventId::from("5"))));
    let cached = app
        .query_client()
        .get_query_data::<Event>(&QueryKey::event(&EventId::from("5")))
        .unwrap();
    assert_eq!(cached.title, "Renamed");
}

#[tokio::test]
async fn update_keeps_stored_event_fresh() {
    // Arrange
    let server = MockServer::start().await;
    mount_events(&server, vec![sample_event("5", "Old title")], 1).await;
    Mock::given(method("GET"))
        .and(path("/events/5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/events/5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "event": sample_event("5", "Renamed") })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let app = app_with_stale_time(&server, Duration::from_secs(60));
    let list = app.list_view();
    list.load().await.unwrap();
    let view = app.edit_event_view(EventId::from("5"));

    // Act
    view.submit(test_draft("Renamed")).unwrap().await;

    // Assert
    assert!(list.needs_load());
    let detail = app.detail_view(EventId::from("5"));
    assert!(!detail.needs_load());
    let event = detail.load().await.unwrap();
    assert_eq!(event.title, "Renamed");
}

#[tokio::test]
async fn update_failure_shows_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/events/5"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let app = app_for(&server);
    let view = app.edit_event_view(EventId::from("5"));

    let route = view.submit(test_draft("Renamed")).unwrap().await;

    assert_eq!(route, None);
    let block = view.error().unwrap();
    assert_eq!(block.title, "Failed to update event");
    assert_eq!(
        block.message,
        "Failed to update event. Please check your inputs and try again"
    );
}

#[tokio::test]
async fn load_failure_shows_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/5"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;
    let app = app_for(&server);
    let view = app.edit_event_view(EventId::from("5"));

    assert!(view.load().await.is_err());

    let block = view.content().error().cloned().unwrap();
    assert_eq!(block.title, "Failed to load event");
    assert_eq!(
        block.message,
        "Failed to load event. Please check your inputs and try again later."
    );
}
