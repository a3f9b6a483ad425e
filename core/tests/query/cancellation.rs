// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use eventful_core::ApiError;
use eventful_core::query::{QueryClient, QueryError, QueryKey};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{app_for, wait_until_fetching};

async fn slow_events(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "events": [] }))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn unmount_cancels_in_flight_fetch() {
    // Arrange
    let server = MockServer::start().await;
    slow_events(&server).await;
    let app = app_for(&server);
    let client = app.query_client().clone();
    let view = app.list_view();
    let load = tokio::spawn(view.load());
    wait_until_fetching(&client, &QueryKey::events()).await;

    // Act
    drop(view);

    // Assert
    let result = tokio::time::timeout(Duration::from_secs(2), load)
        .await
        .expect("load should finish once cancelled")
        .unwrap();
    assert!(matches!(result, Err(QueryError::Cancelled)));
    assert!(!client.is_fetching(&QueryKey::events()));
}

#[tokio::test]
async fn changing_search_term_cancels_previous_fetch() {
    let server = MockServer::start().await;
    slow_events(&server).await;
    let app = app_for(&server);
    let client = app.query_client().clone();
    let mut view = app.search_view();

    view.submit("first");
    let load = tokio::spawn(view.load().unwrap());
    wait_until_fetching(&client, &QueryKey::search("first")).await;
    view.submit("second");

    let result = tokio::time::timeout(Duration::from_secs(2), load)
        .await
        .expect("load should finish once cancelled")
        .unwrap();
    assert!(matches!(result, Err(QueryError::Cancelled)));
}

#[tokio::test]
async fn invalidation_cancels_in_flight_fetch() {
    let server = MockServer::start().await;
    slow_events(&server).await;
    let app = app_for(&server);
    let client = app.query_client().clone();
    let view = app.list_view();
    let load = tokio::spawn(view.load());
    wait_until_fetching(&client, &QueryKey::events()).await;

    client.invalidate_queries(&QueryKey::events());

    let result = tokio::time::timeout(Duration::from_secs(2), load)
        .await
        .expect("load should finish once cancelled")
        .unwrap();
    assert!(matches!(result, Err(QueryError::Cancelled)));
    assert!(view.needs_load());
}

#[tokio::test]
async fn dropped_fetch_leaves_key_refetchable() {
    // Arrange
    let client = QueryClient::default();
    let dropped = tokio::time::timeout(
        Duration::from_millis(50),
        client.fetch_query(QueryKey::events(), |_| {
            std::future::pending::<Result<u32, ApiError>>()
        }),
    )
    .await;
    assert!(dropped.is_err());

    // Act
    let refetched = tokio::time::timeout(
        Duration::from_millis(500),
        client.fetch_query(QueryKey::events(), |_| async { Ok::<_, ApiError>(7_u32) }),
    )
    .await
    .expect("fetch should not wait on the dropped one");

    // Assert
    assert_eq!(*refetched.unwrap(), 7);
    assert!(!client.is_fetching(&QueryKey::events()));
}

#[tokio::test]
async fn waiter_resolves_when_joined_fetch_is_dropped() {
    let client = QueryClient::default();
    let fetch = tokio::spawn({
        let client = client.clone();
        async move {
            client
                .fetch_query(QueryKey::events(), |_| {
                    std::future::pending::<Result<u32, ApiError>>()
                })
                .await
        }
    });
    wait_until_fetching(&client, &QueryKey::events()).await;
    let waiter = tokio::spawn({
        let client = client.clone();
        async move {
            client
                .fetch_query(QueryKey::events(), |_| async { Ok::<_, ApiError>(1_u32) })
                .await
        }
    });
    tokio::task::yield_now().await;

    fetch.abort();

    let result = tokio::time::timeout(Duration::from_secs(2), waiter)
        .await
        .expect("waiter should finish once the fetch is dropped")
        .unwrap();
    assert!(matches!(result, Err(QueryError::Cancelled)));
    assert!(!client.is_fetching(&QueryKey::events()));
}
