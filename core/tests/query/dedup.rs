// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{app_for, app_with_stale_time, mount_events, sample_event};

#[tokio::test]
async fn concurrent_reads_issue_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "events": [sample_event("1", "A")] }))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server);
    let first = app.list_view();
    let second = app.list_view();

    let (a, b) = tokio::join!(first.load(), second.load());

    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.len(), 1);
    assert_eq!(a, b);
}

#[tokio::test]
async fn fresh_data_is_not_refetched() {
    let server = MockServer::start().await;
    mount_events(&server, vec![sample_event("1", "A")], 1).await;
    let app = app_with_stale_time(&server, Duration::from_secs(60));
    let view = app.list_view();

    view.load().await.unwrap();
    view.load().await.unwrap();
}

#[tokio::test]
async fn read_after_invalidation_issues_one_request() {
    let server = MockServer::start().await;
    mount_events(&server, vec![sample_event("1", "A")], 2).await;
    let app = app_with_stale_time(&server, Duration::from_secs(60));
    let view = app.list_view();
    view.load().await.unwrap();

    let touched = app
        .query_client()
        .invalidate_queries(&eventful_core::query::QueryKey::events());

    assert_eq!(touched, 1);
    view.load().await.unwrap();
    view.load().await.unwrap();
}
