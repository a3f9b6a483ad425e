// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use eventful_core::EventDraft;
use eventful_core::router::Route;
use eventful_core::views::DraftError;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{app_with_stale_time, mount_events, mount_images, sample_event, test_draft};

#[tokio::test]
async fn create_invalidates_events_and_navigates() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "events": [] })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    mount_events(&server, vec![sample_event("9", "Meetup")], 1).await;
    let draft = test_draft("Meetup");
    Mock::given(method("POST"))
        .and(path("/events"))
        .and(body_json(json!({ "event": draft })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "event": sample_event("9", "Meetup") })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let app = app_with_stale_time(&server, Duration::from_secs(60));
    let list = app.list_view();
    assert!(list.load().await.unwrap().is_empty());
    let view = app.new_event_view();

    // Act
    let route = view.submit(draft).unwrap().await;

    // Assert
    assert_eq!(route, Some(Route::Events));
    assert!(view.error().is_none());
    assert!(list.needs_load());
    let events = list.load().await.unwrap();
    assert!(events.iter().any(|e| e.id.as_str() == "9"));
    let items = list.content().ready().cloned().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Meetup");
}

#[tokio::test]
async fn create_failure_keeps_form_open() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Invalid data provided." })),
        )
        .mount(&server)
        .await;
    let app = app_with_stale_time(&server, Duration::ZERO);
    let view = app.new_event_view();

    let route = view.submit(test_draft("Meetup")).unwrap().await;

    assert_eq!(route, None);
    assert!(!view.is_submitting());
    let block = view.error().unwrap();
    assert_eq!(block.title, "Failed to create event");
    assert_eq!(block.message, "Invalid data provided.");
}

#[tokio::test]
async fn invalid_draft_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let app = app_with_stale_time(&server, Duration::ZERO);
    let view = app.new_event_view();

    let result = view.submit(EventDraft::default());

    assert!(matches!(result, Err(DraftError::Missing("title"))));
    assert!(!view.is_submitting());
}

#[tokio::test]
async fn image_picker_lists_selectable_images() {
    let server = MockServer::start().await;
    mount_images(&server).await;
    let app = app_with_stale_time(&server, Duration::ZERO);
    let view = app.new_event_view();
    assert!(view.needs_load());

    view.load_images().await.unwrap();

    let draft = EventDraft {
        image: "images/park.jpg".to_string(),
        ..Default::default()
    };
    let picker = view.image_picker(&draft).ready().cloned().unwrap();
    assert_eq!(picker.options().len(), 2);
    assert_eq!(picker.selected_path(), Some("images/park.jpg"));
}
