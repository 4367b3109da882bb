// ABOUTME: HTTP integration tests for health and liveness routes
// ABOUTME: Tests the health report shape and the ping probe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use helpers::axum_test::AxumTestRequest;

#[tokio::test]
async fn test_health_endpoint() {
    let resources = common::create_test_resources()
        .await
        .expect("Setup failed");
    let app = common::test_app(resources);

    let response = AxumTestRequest::get("/health").send(app).await;

    assert_eq!(response.status(), 200);
    let body = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "recipeshare-server");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["imageService"], "configured");
    assert!(body["version"].as_str().is_some());
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_health_reports_unconfigured_image_service() {
    let resources =
        common::create_test_resources_with_config(common::test_config_without_images())
            .await
            .expect("Setup failed");
    let app = common::test_app(resources);

    let response = AxumTestRequest::get("/health").send(app).await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.json()["imageService"], "unconfigured");
}

#[tokio::test]
async fn test_ping_endpoint() {
    let resources = common::create_test_resources()
        .await
        .expect("Setup failed");
    let app = common::test_app(resources);

    let response = AxumTestRequest::get("/api/ping").send(app).await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.json()["message"], "ping");
}
