// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use eventful_core::views::{Content, SEARCH_PROMPT};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{app_for, sample_event};

#[tokio::test]
async fn search_issues_no_request_before_submit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "events": [] })))
        .expect(0)
        .mount(&server)
        .await;
    let app = app_for(&server);
    let view = app.search_view();

    assert_eq!(view.content(), Content::Prompt(SEARCH_PROMPT));
    assert!(view.load().is_none());
    assert!(!view.needs_load());
}

#[tokio::test]
async fn search_sends_term() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("search", "jazz"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "events": [sample_event("4", "Jazz night")] })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server);
    let mut view = app.search_view();

    // Act
    assert!(view.submit("  jazz "));
    assert!(view.needs_load());
    view.load().unwrap().await.unwrap();

    // Assert
    assert_eq!(view.term(), Some("jazz"));
    let content = view.content();
    assert_eq!(content.ready().unwrap()[0].title, "Jazz night");
}

#[tokio::test]
async fn search_terms_cache_independently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("search", "a"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "events": [sample_event("1", "A")] })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("search", "b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "events": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server);
    let mut view = app.search_view();

    view.submit("a");
    view.load().unwrap().await.unwrap();
    view.submit("b");
    view.load().unwrap().await.unwrap();

    assert_eq!(view.content(), Content::Ready(Vec::new()));
    assert!(!view.submit("b"));
}

#[tokio::test]
async fn blank_term_returns_to_prompt() {
    let server = MockServer::start().await;
    let app = app_for(&server);
    let mut view = app.search_view();

    assert!(!view.submit("   "));
    view.submit("x");
    assert!(view.submit(""));

    assert_eq!(view.term(), None);
    assert_eq!(view.content(), Content::Prompt(SEARCH_PROMPT));
}

#[tokio::test]
async fn search_error_block() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let app = app_for(&server);
    let mut view = app.search_view();

    view.submit("x");
    assert!(view.load().unwrap().await.is_err());

    let block = view.content().error().cloned().unwrap();
    assert_eq!(block.title, "An error occurred");
    assert_eq!(block.message, "Failed to fetch events");
}
