// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use eventful_core::EventId;
use eventful_core::router::Route;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{app_for, app_with_stale_time, mount_event, mount_events, sample_event};

#[tokio::test]
async fn detail_renders_event() {
    let server = MockServer::start().await;
    mount_event(&server, "7", sample_event("7", "Gig")).await;
    let app = app_for(&server);
    let view = app.detail_view(EventId::from("7"));

    view.load().await.unwrap();

    let details = view.content().ready().cloned().unwrap();
    assert_eq!(details.title, "Gig");
    assert_eq!(details.when, "May 12, 2025 @ 14:00");
    assert_eq!(details.datetime.as_deref(), Some("2025-05-12T14:00"));
    assert_eq!(details.location, "Berlin");
}

#[tokio::test]
async fn detail_shows_raw_date_when_unparsable() {
    let server = MockServer::start().await;
    let mut event = sample_event("7", "Gig");
    event["date"] = json!("someday");
    mount_event(&server, "7", event).await;
    let app = app_for(&server);
    let view = app.detail_view(EventId::from("7"));

    view.load().await.unwrap();

    let details = view.content().ready().cloned().unwrap();
    assert_eq!(details.when, "someday @ 14:00");
    assert_eq!(details.datetime, None);
}

#[tokio::test]
async fn detail_not_found_shows_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "not found" })))
        .mount(&server)
        .await;
    let app = app_for(&server);
    let view = app.detail_view(EventId::from("42"));

    assert!(view.load().await.is_err());

    let block = view.content().error().cloned().unwrap();
    assert_eq!(block.title, "Failed to load event");
    assert_eq!(block.message, "not found");
}

#[tokio::test]
async fn delete_invalidates_events_and_navigates() {
    // Arrange
    let server = MockServer::start().await;
    mount_events(&server, vec![sample_event("3", "Doomed")], 2).await;
    mount_event(&server, "3", sample_event("3", "Doomed")).await;
    Mock::given(method("DELETE"))
        .and(path("/events/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Deleted" })))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_with_stale_time(&server, Duration::from_secs(60));
    let list = app.list_view();
    let detail = app.detail_view(EventId::from("3"));
    list.load().await.unwrap();
    detail.load().await.unwrap();
    assert!(!list.needs_load());

    // Act
    let route = detail.delete().await;

    // Assert
    assert_eq!(route, Some(Route::Events));
    assert!(list.needs_load());
    assert!(!detail.needs_load());
    list.load().await.unwrap();
}

#[tokio::test]
async fn delete_failure_shows_error_and_stays() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/events/3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let app = app_for(&server);
    let detail = app.detail_view(EventId::from("3"));

    let route = detail.delete().await;

    assert_eq!(route, None);
    let block = detail.delete_error().unwrap();
    assert_eq!(block.title, "Failed to delete event");
    assert_eq!(
        block.message,
        "Failed to delete event, please try again later"
    );
    assert!(!detail.is_deleting());
}
