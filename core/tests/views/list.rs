// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use eventful_core::views::{Content, LOADING_TEXT};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{app_for, mount_events, sample_event};

#[tokio::test]
async fn list_renders_event_items() {
    // Arrange
    let server = MockServer::start().await;
    mount_events(&server, vec![sample_event("1", "A")], 1).await;
    let app = app_for(&server);
    let view = app.list_view();
    assert_eq!(view.content(), Content::Loading(LOADING_TEXT));
    assert!(view.needs_load());

    // Act
    view.load().await.unwrap();

    // Assert
    let content = view.content();
    let items = content.ready().expect("list should be ready");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "A");
    assert_eq!(items[0].date, "May 12, 2025");
    assert_eq!(items[0].location, "Berlin");
    assert_eq!(
        items[0].image_url.as_deref(),
        Some(format!("{}/images/city.jpg", server.uri()).as_str())
    );
    assert!(!view.needs_load());
}

#[tokio::test]
async fn list_error_shows_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&server)
        .await;
    let app = app_for(&server);
    let view = app.list_view();

    assert!(view.load().await.is_err());

    let content = view.content();
    let block = content.error().expect("list should show an error");
    assert_eq!(block.title, "An error occurred");
    assert_eq!(block.message, "boom");
}

#[tokio::test]
async fn list_error_falls_back_without_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;
    let app = app_for(&server);
    let view = app.list_view();

    assert!(view.load().await.is_err());

    let block = view.content().error().cloned().unwrap();
    assert_eq!(block.message, "Failed to fetch events.");
}

#[tokio::test]
async fn list_views_share_the_cache() {
    let server = MockServer::start().await;
    mount_events(&server, vec![sample_event("1", "A")], 1).await;
    let app = app_for(&server);
    let first = app.list_view();
    let second = app.list_view();

    first.load().await.unwrap();

    assert_eq!(second.events().unwrap().len(), 1);
    assert!(!second.needs_load());
}
